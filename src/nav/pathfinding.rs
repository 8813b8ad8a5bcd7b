//! Bounded A* pathfinding over the hex grid
//!
//! The search is capped: a fixed expansion budget bounds worst-case latency
//! because there is no way to suspend a search across ticks. Nodes come
//! from a fixed-capacity arena of indices that is reused between searches;
//! a full arena fails the search explicitly instead of recycling nodes the
//! open set still references.

use ahash::AHashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::NavConfig;
use crate::core::error::NavError;
use crate::nav::hex::HexCoord;
use crate::nav::oracle::TerrainOracle;
use crate::nav::terrain::Locomotion;

/// Penalty for steps that change both axial axes at once
///
/// A hex-specific tie-break nudging paths toward axis-aligned runs, not a
/// physical diagonal cost.
const CROSS_AXIS_PENALTY: f32 = 1.1;

/// Why a search produced no path
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SearchFailure {
    #[error("start and goal are the same hex")]
    NullRequest,

    #[error("goal is not traversable for {0:?}")]
    Unreachable(Locomotion),

    #[error("search budget of {0} expansions exhausted")]
    BudgetExhausted(usize),

    #[error("node arena capacity {0} reached")]
    ArenaFull(usize),

    #[error("air units move directly and never search")]
    Airborne,
}

impl From<SearchFailure> for NavError {
    fn from(failure: SearchFailure) -> Self {
        NavError::NavigationError(failure.to_string())
    }
}

/// Node in the search arena
#[derive(Debug, Clone, Copy)]
struct PathNode {
    hex: HexCoord,
    g: f32,
    h: f32,
    f: f32,
    parent: Option<usize>,
}

/// A* pathfinder with a reusable node arena
///
/// One search at a time per instance; `find_path` takes `&mut self` so the
/// borrow checker enforces that.
#[derive(Debug)]
pub struct Pathfinder {
    arena: Vec<PathNode>,
    max_expansions: usize,
    arena_capacity: usize,
}

impl Pathfinder {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            arena: Vec::with_capacity(config.arena_capacity),
            max_expansions: config.max_expansions,
            arena_capacity: config.arena_capacity,
        }
    }

    /// Find a path from start to goal for the given locomotion class
    ///
    /// Returns the full hex sequence including the start. Every failure is
    /// recoverable; callers fall back to direct movement or abandon the
    /// order.
    pub fn find_path(
        &mut self,
        oracle: &TerrainOracle,
        start: HexCoord,
        goal: HexCoord,
        class: Locomotion,
    ) -> Result<Vec<HexCoord>, SearchFailure> {
        // Air short-circuits: always reachable, never a path
        if class == Locomotion::Air {
            return Err(SearchFailure::Airborne);
        }

        if start == goal {
            return Err(SearchFailure::NullRequest);
        }

        // Quick rejection: a goal the class can never stand on would only
        // burn the whole budget
        if !oracle.is_traversable(goal, class) {
            return Err(SearchFailure::Unreachable(class));
        }

        self.arena.clear();
        let mut open: Vec<usize> = Vec::new();
        let mut closed: AHashSet<HexCoord> = AHashSet::new();

        let start_idx = self.alloc(PathNode {
            hex: start,
            g: 0.0,
            h: start.distance(&goal) as f32,
            f: start.distance(&goal) as f32,
            parent: None,
        })?;
        open.push(start_idx);

        let mut expansions = 0;

        while !open.is_empty() && expansions < self.max_expansions {
            expansions += 1;

            // Linear scan for the lowest f, ties broken by lower h. O(n)
            // per pop; acceptable only because the expansion cap bounds n.
            let mut best = 0;
            for i in 1..open.len() {
                let a = &self.arena[open[i]];
                let b = &self.arena[open[best]];
                if a.f < b.f || (a.f == b.f && a.h < b.h) {
                    best = i;
                }
            }
            let current_idx = open.swap_remove(best);
            let current = self.arena[current_idx];

            if current.hex == goal {
                let path = self.reconstruct(current_idx);
                debug!(steps = path.len(), expansions, "path found");
                return Ok(path);
            }

            closed.insert(current.hex);

            for neighbor in current.hex.neighbors() {
                if closed.contains(&neighbor) || !oracle.is_traversable(neighbor, class) {
                    continue;
                }

                let g = current.g + step_cost(oracle, current.hex, neighbor);
                let h = neighbor.distance(&goal) as f32;

                match open.iter().position(|&idx| self.arena[idx].hex == neighbor) {
                    None => {
                        let idx = self.alloc(PathNode {
                            hex: neighbor,
                            g,
                            h,
                            f: g + h,
                            parent: Some(current_idx),
                        })?;
                        open.push(idx);
                    }
                    Some(pos) => {
                        if g < self.arena[open[pos]].g {
                            let idx = self.alloc(PathNode {
                                hex: neighbor,
                                g,
                                h,
                                f: g + h,
                                parent: Some(current_idx),
                            })?;
                            open[pos] = idx;
                        }
                    }
                }
            }
        }

        if open.is_empty() {
            debug!(?start, ?goal, expansions, "goal unreachable");
            Err(SearchFailure::Unreachable(class))
        } else {
            debug!(?start, ?goal, budget = self.max_expansions, "search budget exhausted");
            Err(SearchFailure::BudgetExhausted(self.max_expansions))
        }
    }

    /// Take a node slot, failing the search when the arena is full
    fn alloc(&mut self, node: PathNode) -> Result<usize, SearchFailure> {
        if self.arena.len() >= self.arena_capacity {
            warn!(capacity = self.arena_capacity, "search node arena full, aborting search");
            return Err(SearchFailure::ArenaFull(self.arena_capacity));
        }
        self.arena.push(node);
        Ok(self.arena.len() - 1)
    }

    /// Walk parent indices from the goal node back to the start
    fn reconstruct(&self, goal_idx: usize) -> Vec<HexCoord> {
        let mut path = Vec::new();
        let mut current = Some(goal_idx);
        while let Some(idx) = current {
            path.push(self.arena[idx].hex);
            current = self.arena[idx].parent;
        }
        path.reverse();
        path
    }
}

/// Cost of stepping from one hex onto an adjacent one
fn step_cost(oracle: &TerrainOracle, from: HexCoord, to: HexCoord) -> f32 {
    let mut cost = oracle
        .classify(to)
        .map(|kind| kind.movement_cost())
        .unwrap_or(1.0);

    if from.q != to.q && from.r != to.r {
        cost *= CROSS_AXIS_PENALTY;
    }

    cost
}

/// Total cost of a path (sum of step costs)
pub fn path_cost(oracle: &TerrainOracle, path: &[HexCoord]) -> f32 {
    path.windows(2)
        .map(|pair| step_cost(oracle, pair[0], pair[1]))
        .sum()
}
