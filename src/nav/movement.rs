//! Per-tick unit movement
//!
//! Units follow a computed path waypoint by waypoint, or fall back to
//! direct movement when no path exists. Collisions against dynamic terrain
//! trigger one replan; a failed replan abandons the order.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::NavConfig;
use crate::core::types::UnitId;
use crate::nav::hex::HexCoord;
use crate::nav::oracle::TerrainOracle;
use crate::nav::pathfinding::Pathfinder;
use crate::nav::terrain::Locomotion;

/// Movement state of a unit
///
/// A unit is in exactly one of these at any tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum MotionState {
    #[default]
    Idle,
    /// Following a computed path; `path` excludes the hex the unit started
    /// on, `cursor` indexes the next waypoint
    PathFollowing {
        path: Vec<HexCoord>,
        cursor: usize,
        goal: HexCoord,
    },
    /// Straight-line fallback toward a fixed pixel target
    DirectMoving { target: Vec2, goal: HexCoord },
}

/// Motion-relevant unit state
///
/// Spawning and removal are external; this core only mutates position,
/// heading, and motion state each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub position: Vec2,
    /// Facing in radians, updated to match movement direction
    pub heading: f32,
    pub locomotion: Locomotion,
    /// Pixels per second
    pub speed: f32,
    pub state: MotionState,
}

impl Unit {
    pub fn new(id: UnitId, locomotion: Locomotion, speed: f32, position: Vec2) -> Self {
        Self {
            id,
            position,
            heading: 0.0,
            locomotion,
            speed,
            state: MotionState::Idle,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.state != MotionState::Idle
    }
}

/// Result of a movement tick
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionResult {
    pub moved: bool,
    pub reached_waypoint: bool,
    pub arrived: bool,
    pub replanned: bool,
    pub blocked: bool,
}

/// Order a unit to move to a hex goal
///
/// Air units always move directly. Otherwise the pathfinder is consulted;
/// on any failure the unit falls back to direct movement toward the goal's
/// pixel position. Returns true when a path was found.
pub fn order_move(
    unit: &mut Unit,
    goal: HexCoord,
    oracle: &TerrainOracle,
    pathfinder: &mut Pathfinder,
) -> bool {
    let target = oracle.layout().to_pixel(goal);

    if unit.locomotion == Locomotion::Air {
        unit.state = MotionState::DirectMoving { target, goal };
        return false;
    }

    let start = oracle.layout().to_hex(unit.position);
    match pathfinder.find_path(oracle, start, goal, unit.locomotion) {
        Ok(path) => {
            // Drop the hex the unit is already standing on
            let steps: Vec<HexCoord> = path.into_iter().skip(1).collect();
            if steps.is_empty() {
                unit.state = MotionState::DirectMoving { target, goal };
                false
            } else {
                debug!(unit = ?unit.id, steps = steps.len(), "following path");
                unit.state = MotionState::PathFollowing {
                    path: steps,
                    cursor: 0,
                    goal,
                };
                true
            }
        }
        Err(failure) => {
            debug!(unit = ?unit.id, %failure, "direct movement fallback");
            unit.state = MotionState::DirectMoving { target, goal };
            false
        }
    }
}

/// Stop a unit immediately, discarding any path or target
pub fn stop(unit: &mut Unit) {
    unit.state = MotionState::Idle;
}

/// Advance a unit's movement by one tick
pub fn tick_unit(
    unit: &mut Unit,
    dt: f32,
    oracle: &TerrainOracle,
    pathfinder: &mut Pathfinder,
    config: &NavConfig,
) -> MotionResult {
    let mut result = MotionResult::default();
    let state = std::mem::take(&mut unit.state);

    match state {
        MotionState::Idle => {}
        MotionState::PathFollowing { path, cursor, goal } => {
            let Some(&waypoint) = path.get(cursor) else {
                // Degenerate cursor, treat as arrived
                result.arrived = true;
                return result;
            };
            let target = oracle.layout().to_pixel(waypoint);
            let distance = unit.position.distance(target);

            if distance <= config.movement_threshold {
                result.reached_waypoint = true;
                let cursor = cursor + 1;
                if cursor >= path.len() {
                    result.arrived = true;
                } else {
                    unit.state = MotionState::PathFollowing { path, cursor, goal };
                }
            } else if step_toward(unit, target, distance, dt, oracle, config) {
                result.moved = true;
                unit.state = MotionState::PathFollowing { path, cursor, goal };
            } else {
                result.replanned = true;
                result.blocked = !replan(unit, goal, oracle, pathfinder);
            }
        }
        MotionState::DirectMoving { target, goal } => {
            let distance = unit.position.distance(target);

            if distance <= config.movement_threshold {
                result.arrived = true;
            } else if step_toward(unit, target, distance, dt, oracle, config) {
                result.moved = true;
                unit.state = MotionState::DirectMoving { target, goal };
            } else {
                result.replanned = true;
                result.blocked = !replan(unit, goal, oracle, pathfinder);
            }
        }
    }

    result
}

/// Try to advance toward a pixel target, committing only collision-free
/// steps. Returns false when the candidate position is blocked.
fn step_toward(
    unit: &mut Unit,
    target: Vec2,
    distance: f32,
    dt: f32,
    oracle: &TerrainOracle,
    config: &NavConfig,
) -> bool {
    let step = (unit.speed * config.speed_multiplier * dt).min(distance);
    let direction = (target - unit.position) / distance;
    let candidate = unit.position + direction * step;

    // Air units never collide with terrain
    if unit.locomotion != Locomotion::Air
        && !oracle.is_traversable_world(candidate, unit.locomotion)
    {
        return false;
    }

    unit.position = candidate;
    unit.heading = direction.y.atan2(direction.x);
    true
}

/// Recompute a path from the unit's current position to its goal
///
/// Success converts the unit to PathFollowing; failure leaves it Idle.
fn replan(
    unit: &mut Unit,
    goal: HexCoord,
    oracle: &TerrainOracle,
    pathfinder: &mut Pathfinder,
) -> bool {
    let start = oracle.layout().to_hex(unit.position);
    match pathfinder.find_path(oracle, start, goal, unit.locomotion) {
        Ok(path) => {
            let steps: Vec<HexCoord> = path.into_iter().skip(1).collect();
            if steps.is_empty() {
                debug!(unit = ?unit.id, "replan produced no steps, stopping");
                false
            } else {
                debug!(unit = ?unit.id, steps = steps.len(), "replanned after collision");
                unit.state = MotionState::PathFollowing {
                    path: steps,
                    cursor: 0,
                    goal,
                };
                true
            }
        }
        Err(failure) => {
            debug!(unit = ?unit.id, %failure, "replan failed, abandoning order");
            false
        }
    }
}
