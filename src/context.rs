//! Per-decision bundle passed through every component call.
//!
//! A `TurnContext` is created for one turn and dropped with it. Nothing in it is
//! shared between turns, so concurrent decisions need no synchronisation.

use crate::grid::{Cell, Grid};
use crate::snapshot::{Snake, TurnSnapshot};
use crate::types::Coord;

pub struct TurnContext<'a> {
    pub snapshot: &'a TurnSnapshot,
    pub grid: Grid,
}

impl<'a> TurnContext<'a> {
    pub fn new(snapshot: &'a TurnSnapshot) -> Self {
        TurnContext {
            snapshot,
            grid: Grid::build(snapshot),
        }
    }

    pub fn you(&self) -> &Snake {
        self.snapshot.you()
    }

    pub fn you_index(&self) -> usize {
        self.snapshot.you_index()
    }

    pub fn head(&self) -> Coord {
        self.you().head()
    }

    pub fn own_length(&self) -> usize {
        self.you().length()
    }

    pub fn snake(&self, index: usize) -> &Snake {
        &self.snapshot.snakes[index]
    }

    /// True if `cell` is a body segment that will still be there after one move
    pub fn is_solid(&self, cell: Cell) -> bool {
        match cell {
            Cell::Body { snake, segment } => {
                let owner = self.snake(snake);
                segment + 1 != owner.length() || !owner.tail_vacates()
            }
            _ => false,
        }
    }
}
