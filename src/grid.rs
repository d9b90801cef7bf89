//! Positional grid of cell states, rebuilt from scratch every turn.

use crate::snapshot::TurnSnapshot;
use crate::types::Coord;

/// State of one board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Food,
    /// `snake` indexes `TurnSnapshot::snakes`; `segment` counts from the head (0).
    Body { snake: usize, segment: usize },
}

impl Cell {
    pub fn is_body(&self) -> bool {
        matches!(self, Cell::Body { .. })
    }
}

/// Width x Height array of cells, row-major by `y`
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds the grid for a snapshot.
    ///
    /// Food is marked first, then every snake in snapshot order, so a later
    /// snake overwrites an earlier one on a shared coordinate. Coordinates and
    /// dimensions (at most `MAX_BOARD_CELLS` squares) were validated when the
    /// snapshot was built.
    pub fn build(snapshot: &TurnSnapshot) -> Self {
        let mut grid = Grid {
            width: snapshot.width,
            height: snapshot.height,
            cells: vec![Cell::Empty; (snapshot.width * snapshot.height) as usize],
        };

        for food in &snapshot.food {
            let idx = grid.index(food);
            grid.cells[idx] = Cell::Food;
        }

        for (snake, body) in snapshot.snakes.iter().map(|s| &s.body).enumerate() {
            for (segment, coord) in body.iter().enumerate() {
                let idx = grid.index(coord);
                grid.cells[idx] = Cell::Body { snake, segment };
            }
        }

        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Cell at `coord`, or `None` off the board
    pub fn get(&self, coord: &Coord) -> Option<Cell> {
        if self.in_bounds(coord) {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    /// Number of cells that are not empty
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    fn index(&self, coord: &Coord) -> usize {
        (coord.y * self.width + coord.x) as usize
    }
}
