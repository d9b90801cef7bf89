//! Breadth-first path planner.
//!
//! Paths are chains of parent links stored in a flat arena and addressed by
//! `NodeId`. Every frontier entry owns one chain, so the same square can be
//! reached by several paths; the only cycle guard is that a path never
//! revisits one of its own squares.
//!
//! Body squares are treated as passable once the path is long enough for the
//! occupying segment to have been predicted clear: a segment with index `k`
//! can be crossed by a path arriving after more than `k` moves.
//!
//! A path only qualifies once it is longer than the agent. Among the paths
//! that qualify at the shallowest such depth, the one that touched its
//! objective earliest wins, so food right next to the head is approached
//! directly instead of by a detour that passes it late.

use std::collections::VecDeque;
use std::time::Instant;

use log::debug;

use crate::context::TurnContext;
use crate::grid::Cell;
use crate::mode::Mode;
use crate::types::{Coord, Direction};

/// Caps how much work one search may do
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    /// Maximum number of frontier nodes expanded.
    pub max_expansions: usize,
    /// Wall-clock point after which the search gives up.
    pub deadline: Option<Instant>,
}

impl SearchBudget {
    pub fn new(max_expansions: usize, deadline: Option<Instant>) -> Self {
        SearchBudget {
            max_expansions,
            deadline,
        }
    }

    pub fn unlimited() -> Self {
        SearchBudget {
            max_expansions: usize::MAX,
            deadline: None,
        }
    }
}

// Deadline is polled on this expansion stride.
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// Handle into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy)]
struct PathNode {
    coord: Coord,
    parent: Option<NodeId>,
    /// Move that produced this node; `None` only for the root.
    dir: Option<Direction>,
    /// Moves from the root.
    depth: usize,
    /// Depth at which this path first touched its objective.
    objective_at: Option<usize>,
}

#[derive(Debug, Default)]
struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    fn push(&mut self, node: PathNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn get(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    /// Nodes from `tip` back to the root, tip first
    fn chain(&self, tip: NodeId) -> Chain<'_> {
        Chain {
            arena: self,
            next: Some(tip),
            remaining: self.get(tip).depth + 1,
        }
    }

    fn path_contains(&self, tip: NodeId, coord: Coord) -> bool {
        self.chain(tip).any(|node| node.coord == coord)
    }

    fn first_step(&self, tip: NodeId) -> Option<Direction> {
        self.chain(tip).find(|node| node.depth == 1).and_then(|node| node.dir)
    }
}

/// Parent-link walk, bounded by the tip's depth so a corrupt chain cannot spin
struct Chain<'a> {
    arena: &'a PathArena,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a PathNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.get(self.next?);
        self.remaining -= 1;
        self.next = node.parent;
        Some(node)
    }
}

/// Work done by one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: usize,
    pub nodes: usize,
    pub max_depth: usize,
    pub budget_exhausted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanReport {
    /// First move of the winning path, `None` when no path qualified.
    pub direction: Option<Direction>,
    pub stats: SearchStats,
}

/// Searches outward from the agent's head for a path that satisfies `mode`
///
/// # Arguments
/// * `ctx` - Turn context holding the grid
/// * `mode` - Forage (reach food) or pursuit (cut into a rival's body)
/// * `priority` - Order in which neighbours are expanded
/// * `budget` - Expansion and time cap
pub fn plan(
    ctx: &TurnContext,
    mode: Mode,
    priority: &[Direction],
    budget: &SearchBudget,
) -> PlanReport {
    let own_length = ctx.own_length();
    let mut arena = PathArena::default();
    let mut frontier = VecDeque::new();
    let mut stats = SearchStats::default();

    let root = arena.push(PathNode {
        coord: ctx.head(),
        parent: None,
        dir: None,
        depth: 0,
        objective_at: None,
    });
    frontier.push_back(root);

    // Best qualifying tip as (objective_at, tip), and the depth it qualified at.
    let mut best: Option<(usize, NodeId)> = None;
    let mut settle_depth = None;

    while let Some(id) = frontier.pop_front() {
        let node = *arena.get(id);
        if settle_depth.is_some_and(|level| node.depth >= level) {
            break;
        }
        if stats.expansions >= budget.max_expansions || deadline_passed(budget, stats.expansions) {
            stats.budget_exhausted = true;
            break;
        }
        stats.expansions += 1;

        let depth = node.depth + 1;

        for &dir in priority {
            if node.dir.map(|d| d.opposite()) == Some(dir) {
                continue;
            }
            let next = dir.apply(&node.coord);
            let cell = match ctx.grid.get(&next) {
                Some(cell) => cell,
                None => continue,
            };
            if arena.path_contains(id, next) {
                continue;
            }
            if !passable(cell, depth) {
                continue;
            }

            let objective_at = node
                .objective_at
                .or_else(|| objective_here(ctx, cell, depth, mode).then_some(depth));
            let child = arena.push(PathNode {
                coord: next,
                parent: Some(id),
                dir: Some(dir),
                depth,
                objective_at,
            });
            stats.max_depth = stats.max_depth.max(depth);

            if depth > own_length {
                if let Some(at) = objective_at {
                    if best.map_or(true, |(best_at, _)| at < best_at) {
                        best = Some((at, child));
                    }
                    settle_depth = Some(depth);
                    continue;
                }
            }
            if settle_depth.is_none() {
                frontier.push_back(child);
            }
        }
    }

    let found = best.and_then(|(_, tip)| arena.first_step(tip));

    stats.nodes = arena.nodes.len();
    debug!(
        "planner({}): {:?} after {} expansions, {} nodes, depth {}{}",
        mode.as_str(),
        found,
        stats.expansions,
        stats.nodes,
        stats.max_depth,
        if stats.budget_exhausted { " (budget exhausted)" } else { "" }
    );

    PlanReport {
        direction: found,
        stats,
    }
}

fn deadline_passed(budget: &SearchBudget, expansions: usize) -> bool {
    match budget.deadline {
        Some(deadline) if expansions % DEADLINE_CHECK_INTERVAL == 0 => Instant::now() >= deadline,
        _ => false,
    }
}

/// Whether a path arriving after `depth` moves may enter `cell`
fn passable(cell: Cell, depth: usize) -> bool {
    match cell {
        Cell::Empty | Cell::Food => true,
        Cell::Body { segment, .. } => segment < depth,
    }
}

/// Whether arriving on `cell` after `depth` moves satisfies `mode`
fn objective_here(ctx: &TurnContext, cell: Cell, depth: usize, mode: Mode) -> bool {
    match (mode, cell) {
        (Mode::Forage, Cell::Food) => true,
        (Mode::Pursuit, Cell::Body { snake, segment }) => {
            snake != ctx.you_index() && segment < depth
        }
        _ => false,
    }
}
