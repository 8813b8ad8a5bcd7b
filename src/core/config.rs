//! Navigation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{NavError, Result};
use crate::nav::hex::{HexLayout, HexOrientation};

/// Configuration for the navigation core
///
/// These values have been tuned against the shipped maps. Changing them
/// affects pathing latency and how units track their waypoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    // === LAYOUT ===
    /// Hex size in world pixels (center to corner)
    ///
    /// Everything in pixel space scales with this; movement threshold and
    /// unit speeds are expressed in the same units.
    pub hex_size: f32,

    /// Grid orientation used for pixel projection
    pub orientation: HexOrientation,

    // === PATHFINDING ===
    /// Hard cap on A* expansions per search
    ///
    /// The search runs to completion within one tick, so this is the de
    /// facto timeout. At 500, a worst-case search on the default map stays
    /// well under a frame. Searches past the cap report BudgetExhausted.
    pub max_expansions: usize,

    /// Capacity of the reusable search-node arena
    ///
    /// Should comfortably exceed max_expansions times the branching factor
    /// actually reached in practice. A full arena aborts the search with an
    /// explicit error rather than recycling live nodes.
    pub arena_capacity: usize,

    // === MOVEMENT ===
    /// Distance (pixels) at which a unit counts as having reached a waypoint
    ///
    /// Too small and units oscillate around waypoints they can never hit
    /// exactly; too large and paths get visibly cut short.
    pub movement_threshold: f32,

    /// External speed multiplier applied to every unit each tick
    ///
    /// Owned by the caller (debug tooling, game-speed settings). Applied
    /// multiplicatively with the unit's own speed and the tick delta,
    /// never compounded across ticks.
    pub speed_multiplier: f32,

    /// Sample segments for straight-line path validity checks
    ///
    /// `is_path_valid` probes segments + 1 evenly spaced points. Five
    /// segments resolves anything wider than a fifth of the checked hop.
    pub path_check_segments: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            hex_size: 60.0,
            orientation: HexOrientation::Pointy,
            max_expansions: 500,
            arena_capacity: 1000,
            movement_threshold: 10.0,
            speed_multiplier: 1.0,
            path_check_segments: 5,
        }
    }
}

impl NavConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel projection for the configured grid
    pub fn layout(&self) -> HexLayout {
        HexLayout::new(self.orientation, self.hex_size)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.hex_size <= 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "hex_size ({}) must be positive",
                self.hex_size
            )));
        }

        if self.max_expansions == 0 {
            return Err(NavError::InvalidConfig(
                "max_expansions must be at least 1".into(),
            ));
        }

        // Every expansion can push up to 6 neighbors plus the node itself
        if self.arena_capacity < self.max_expansions {
            return Err(NavError::InvalidConfig(format!(
                "arena_capacity ({}) should be >= max_expansions ({})",
                self.arena_capacity, self.max_expansions
            )));
        }

        if self.movement_threshold <= 0.0 || self.speed_multiplier <= 0.0 {
            return Err(NavError::InvalidConfig(
                "movement_threshold and speed_multiplier must be positive".into(),
            ));
        }

        Ok(())
    }
}
