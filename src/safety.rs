//! One-ply safety classification of a candidate move.
//!
//! Only the destination and its immediate neighbours are inspected. Deeper
//! traps are the planner's concern.

use serde::Serialize;

use crate::context::TurnContext;
use crate::grid::Cell;
use crate::types::Direction;

/// How dangerous a move looks, ordered `Unsafe < Risky < Safe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Safety {
    /// Off the board, into a body that stays put, or into a dead end.
    Unsafe = 0,
    /// An equal-or-longer rival head could contest the same square.
    Risky = 1,
    Safe = 2,
}

/// Classifies moving the agent's head one step in `dir`
pub fn classify(ctx: &TurnContext, dir: Direction) -> Safety {
    let head = ctx.head();
    let dest = dir.apply(&head);

    let cell = match ctx.grid.get(&dest) {
        Some(cell) => cell,
        None => return Safety::Unsafe,
    };
    if ctx.is_solid(cell) {
        return Safety::Unsafe;
    }

    // Forward and lateral neighbours of the destination: everything except
    // the square we came from.
    let onward: Vec<Cell> = Direction::all()
        .iter()
        .filter(|d| **d != dir.opposite())
        .filter_map(|d| ctx.grid.get(&d.apply(&dest)))
        .collect();

    if onward.iter().all(|c| ctx.is_solid(*c)) {
        return Safety::Unsafe;
    }

    let own_length = ctx.own_length();
    let contested = onward.iter().any(|c| match *c {
        Cell::Body { snake, segment: 0 } => {
            snake != ctx.you_index() && ctx.snake(snake).length() >= own_length
        }
        _ => false,
    });

    if contested {
        Safety::Risky
    } else {
        Safety::Safe
    }
}
