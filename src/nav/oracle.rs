//! Terrain oracle: "can locomotion class L occupy position H right now?"
//!
//! Owns the generated map and the latest bridge snapshot. The pathfinder
//! and the movement tick both route every traversability question through
//! here so the rules live in exactly one place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::nav::hex::{HexCoord, HexLayout};
use crate::nav::map::TerrainMap;
use crate::nav::terrain::{BridgeSnapshot, Locomotion, TileKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainOracle {
    map: TerrainMap,
    layout: HexLayout,
    bridges: BridgeSnapshot,
}

impl TerrainOracle {
    pub fn new(map: TerrainMap, layout: HexLayout) -> Self {
        Self {
            map,
            layout,
            bridges: BridgeSnapshot::default(),
        }
    }

    pub fn map(&self) -> &TerrainMap {
        &self.map
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn bridges(&self) -> BridgeSnapshot {
        self.bridges
    }

    /// Replace the bridge snapshot with the collaborator's latest state
    ///
    /// Latest snapshot only; no history. Called between ticks by the
    /// game-state owner.
    pub fn set_bridge_state(&mut self, snapshot: BridgeSnapshot) {
        self.bridges = snapshot;
    }

    /// Tile kind at a hex, None when off the map
    pub fn classify(&self, hex: HexCoord) -> Option<TileKind> {
        self.map.kind(hex)
    }

    /// Tile kind at a world position, None when off the map
    pub fn classify_world(&self, point: Vec2) -> Option<TileKind> {
        self.classify(self.layout.to_hex(point))
    }

    /// Can the class occupy this hex right now?
    pub fn is_traversable(&self, hex: HexCoord, class: Locomotion) -> bool {
        // Air ignores terrain and map bounds entirely
        if class == Locomotion::Air {
            return true;
        }

        let Some(kind) = self.map.kind(hex) else {
            return false;
        };

        match kind {
            TileKind::Water => {
                if class == Locomotion::Water {
                    true
                } else {
                    // Ground crosses water only on a lowered bridge
                    self.map
                        .bridge_at(hex)
                        .map(|side| self.bridges.state(side).is_traversable())
                        .unwrap_or(false)
                }
            }
            TileKind::Mountain | TileKind::Hill => false,
            TileKind::Forest | TileKind::Farmland => true,
        }
    }

    /// Can the class occupy this world position right now?
    pub fn is_traversable_world(&self, point: Vec2, class: Locomotion) -> bool {
        class == Locomotion::Air || self.is_traversable(self.layout.to_hex(point), class)
    }

    /// Coarse straight-line validity check between two world positions
    ///
    /// Samples `segments + 1` evenly spaced points and requires every one
    /// to be traversable. Quick rejection only; a passing segment can still
    /// cut a corner the full search would route around.
    pub fn is_path_valid(&self, class: Locomotion, start: Vec2, end: Vec2, segments: u32) -> bool {
        if class == Locomotion::Air {
            return true;
        }

        for i in 0..=segments {
            let t = i as f32 / segments.max(1) as f32;
            let point = start.lerp(end, t);
            if !self.is_traversable_world(point, class) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::hex::HexOrientation;
    use crate::nav::terrain::{BridgeSide, BridgeState};

    fn layout() -> HexLayout {
        HexLayout::new(HexOrientation::Pointy, 60.0)
    }

    fn oracle_with(map: TerrainMap) -> TerrainOracle {
        TerrainOracle::new(map, layout())
    }

    #[test]
    fn test_air_traversable_everywhere() {
        let oracle = oracle_with(TerrainMap::uniform(3, TileKind::Mountain));

        for hex in HexCoord::new(0, 0).range(3) {
            assert!(oracle.is_traversable(hex, Locomotion::Air));
        }
        // Including far out of bounds
        assert!(oracle.is_traversable(HexCoord::new(999, 999), Locomotion::Air));
    }

    #[test]
    fn test_out_of_bounds_blocks_ground_and_water() {
        let oracle = oracle_with(TerrainMap::new(2));
        let outside = HexCoord::new(50, 0);
        assert!(!oracle.is_traversable(outside, Locomotion::Ground));
        assert!(!oracle.is_traversable(outside, Locomotion::Water));
    }

    #[test]
    fn test_highland_blocks_ground_and_water() {
        let mut map = TerrainMap::new(3);
        map.set_kind(HexCoord::new(1, 0), TileKind::Mountain);
        map.set_kind(HexCoord::new(0, 1), TileKind::Hill);
        let oracle = oracle_with(map);

        for hex in [HexCoord::new(1, 0), HexCoord::new(0, 1)] {
            assert!(!oracle.is_traversable(hex, Locomotion::Ground));
            assert!(!oracle.is_traversable(hex, Locomotion::Water));
            assert!(oracle.is_traversable(hex, Locomotion::Air));
        }
    }

    #[test]
    fn test_water_class_crosses_water_regardless_of_bridge() {
        let mut map = TerrainMap::new(3);
        let water = HexCoord::new(1, 1);
        map.carve_channel(&[water]);
        map.add_bridge(BridgeSide::Left, vec![water]);
        let mut oracle = oracle_with(map);

        for state in [
            BridgeState::FullyUp,
            BridgeState::AlmostUp,
            BridgeState::AlmostDown,
            BridgeState::FullyDown,
        ] {
            oracle.set_bridge_state(BridgeSnapshot {
                left: state,
                right: state,
            });
            assert!(oracle.is_traversable(water, Locomotion::Water));
        }
    }

    #[test]
    fn test_ground_needs_fully_down_bridge() {
        let mut map = TerrainMap::new(3);
        let bridged = HexCoord::new(0, 2);
        let open_water = HexCoord::new(0, -2);
        map.carve_channel(&[bridged, open_water]);
        map.add_bridge(BridgeSide::Right, vec![bridged]);
        let mut oracle = oracle_with(map);

        // Default snapshot is FullyDown
        assert!(oracle.is_traversable(bridged, Locomotion::Ground));
        assert!(!oracle.is_traversable(open_water, Locomotion::Ground));

        oracle.set_bridge_state(BridgeSnapshot {
            left: BridgeState::FullyDown,
            right: BridgeState::AlmostDown,
        });
        assert!(!oracle.is_traversable(bridged, Locomotion::Ground));
    }

    #[test]
    fn test_classify_world_round_trips_tile() {
        let mut map = TerrainMap::new(3);
        map.set_kind(HexCoord::new(2, -1), TileKind::Forest);
        let oracle = oracle_with(map);

        let center = layout().to_pixel(HexCoord::new(2, -1));
        assert_eq!(oracle.classify_world(center), Some(TileKind::Forest));
    }

    #[test]
    fn test_path_valid_over_open_land() {
        let config = crate::core::config::NavConfig::default();
        let oracle = oracle_with(TerrainMap::new(5));
        let start = layout().to_pixel(HexCoord::new(-3, 0));
        let end = layout().to_pixel(HexCoord::new(3, 0));
        assert!(oracle.is_path_valid(Locomotion::Ground, start, end, config.path_check_segments));
    }

    #[test]
    fn test_path_invalid_through_mountain() {
        let mut map = TerrainMap::new(5);
        // Wall the middle so no sampling gap slips through
        for r in -5..=5 {
            map.set_kind(HexCoord::new(0, r), TileKind::Mountain);
        }
        let oracle = oracle_with(map);

        let start = layout().to_pixel(HexCoord::new(-3, 0));
        let end = layout().to_pixel(HexCoord::new(3, 0));
        assert!(!oracle.is_path_valid(Locomotion::Ground, start, end, 8));
        assert!(oracle.is_path_valid(Locomotion::Air, start, end, 8));
    }
}
