//! Wildfront - hex-grid navigation core for a real-time strategy game
//!
//! Terrain classification, bounded A* pathfinding, and per-tick unit
//! movement. Rendering, input handling, and game-loop orchestration live
//! elsewhere; this crate only answers "can this unit stand here?" and
//! "where does it move this tick?".

pub mod core;
pub mod nav;
