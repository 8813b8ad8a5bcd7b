//! Terrain tile kinds and their movement effects
//!
//! Traversability depends on the tile kind, the unit's locomotion class,
//! and (over water) the current bridge state.

use serde::{Deserialize, Serialize};

/// Locomotion class of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locomotion {
    #[default]
    Ground,
    Water,
    Air,
}

/// Primary terrain kind for a hex tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileKind {
    #[default]
    Farmland, // Open working land, easiest going
    Forest,   // Dense growth, slows ground movement
    Hill,     // Too steep for ground units
    Mountain, // Impassable except by air
    Water,    // River and lake tiles, bridgeable
}

impl TileKind {
    /// Movement cost multiplier for pathfinding (1.0 = baseline)
    ///
    /// Only meaningful for tiles the class can enter at all; impassable
    /// combinations are rejected by the traversability check, not priced.
    pub fn movement_cost(&self) -> f32 {
        match self {
            TileKind::Farmland => 0.9,
            TileKind::Forest => 1.2,
            TileKind::Hill => 1.0,
            TileKind::Mountain => 1.0,
            TileKind::Water => 1.0,
        }
    }

    /// Can this kind ever be entered by the class, ignoring bridges?
    ///
    /// Water is the special case: ground units need a Fully_Down bridge,
    /// which only the oracle can decide.
    pub fn passable_on_foot(&self) -> bool {
        matches!(self, TileKind::Farmland | TileKind::Forest)
    }

    /// Is this a water tile?
    pub fn is_water(&self) -> bool {
        matches!(self, TileKind::Water)
    }

    /// Does this kind block ground and water units outright?
    pub fn is_highland(&self) -> bool {
        matches!(self, TileKind::Mountain | TileKind::Hill)
    }
}

/// Side of the map a bridge zone sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BridgeSide {
    Left,
    Right,
}

/// Animation state of a drawbridge
///
/// Only FullyDown carries ground traffic; the intermediate states exist
/// because the bridge collaborator animates between endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BridgeState {
    FullyUp,
    AlmostUp,
    AlmostDown,
    #[default]
    FullyDown,
}

impl BridgeState {
    /// Does this state carry ground units?
    pub fn is_traversable(&self) -> bool {
        matches!(self, BridgeState::FullyDown)
    }
}

/// Latest bridge states, injected by the game-state collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BridgeSnapshot {
    pub left: BridgeState,
    pub right: BridgeState,
}

impl BridgeSnapshot {
    pub fn state(&self, side: BridgeSide) -> BridgeState {
        match side {
            BridgeSide::Left => self.left,
            BridgeSide::Right => self.right,
        }
    }
}
