//! Navigation core - hex math, terrain rules, pathfinding, movement
//!
//! Data flows one direction: the oracle classifies terrain, the pathfinder
//! searches using that classification, and the movement tick executes the
//! result, querying the oracle again each step for collisions. Everything
//! runs synchronously inside the caller's update; no globals, all
//! dependencies passed in.

pub mod hex;
pub mod map;
pub mod movement;
pub mod oracle;
pub mod pathfinding;
pub mod terrain;

// Re-exports for convenient access
pub use hex::{HexCoord, HexLayout, HexOrientation, OffsetKind};
pub use map::{BridgeZone, TerrainMap, TerrainWeights};
pub use movement::{order_move, stop, tick_unit, MotionResult, MotionState, Unit};
pub use oracle::TerrainOracle;
pub use pathfinding::{path_cost, Pathfinder, SearchFailure};
pub use terrain::{BridgeSide, BridgeSnapshot, BridgeState, Locomotion, TileKind};
