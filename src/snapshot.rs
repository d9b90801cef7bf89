//! Immutable per-turn view of the board handed to the decision core.
//!
//! The wire `Board` is validated here once, at the boundary, so the rest of the
//! core can index the grid without re-checking coordinates.

use std::fmt;

use crate::types::{Board, Coord};

/// A snake as the decision core sees it: head first, tail last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub id: String,
    pub health: i32,
    pub body: Vec<Coord>,
}

impl Snake {
    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn tail(&self) -> Coord {
        self.body[self.body.len() - 1]
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether the tail cell will be free after this snake's next move.
    ///
    /// A snake that just ate carries its tail twice, so the last cell stays
    /// occupied for one more turn.
    pub fn tail_vacates(&self) -> bool {
        let len = self.body.len();
        len == 1 || self.body[len - 1] != self.body[len - 2]
    }
}

/// Largest board (in squares) the decision core accepts.
pub const MAX_BOARD_CELLS: i64 = 1 << 16;

/// Reasons a wire board cannot be turned into a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Width or height is not positive, or the board exceeds `MAX_BOARD_CELLS`.
    InvalidDimensions { width: i32, height: i32 },
    /// The agent's own snake is not on the board.
    OwnSnakeMissing { id: String },
    /// A snake arrived without any body segments.
    EmptyBody { id: String },
    /// A food or body coordinate lies outside the board.
    OutOfBounds { coord: Coord, width: i32, height: i32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {width}x{height}")
            }
            Self::OwnSnakeMissing { id } => write!(f, "own snake '{id}' not on the board"),
            Self::EmptyBody { id } => write!(f, "snake '{id}' has an empty body"),
            Self::OutOfBounds {
                coord,
                width,
                height,
            } => write!(
                f,
                "coordinate ({}, {}) outside {width}x{height} board",
                coord.x, coord.y
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Everything the core needs for one decision
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    pub width: i32,
    pub height: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Snake>,
    you: usize,
}

impl TurnSnapshot {
    /// Validates a wire board and captures it for the decision core
    ///
    /// # Arguments
    /// * `board` - Board as received from the game engine
    /// * `you_id` - Identifier of the snake this agent controls
    pub fn from_board(board: &Board, you_id: &str) -> Result<Self, SnapshotError> {
        let (width, height) = (board.width, board.height);
        let cells = i64::from(width) * i64::from(height);
        if width <= 0 || height <= 0 || cells > MAX_BOARD_CELLS {
            return Err(SnapshotError::InvalidDimensions { width, height });
        }

        let check = |coord: &Coord| -> Result<(), SnapshotError> {
            if coord.x < 0 || coord.y < 0 || coord.x >= width || coord.y >= height {
                Err(SnapshotError::OutOfBounds {
                    coord: *coord,
                    width,
                    height,
                })
            } else {
                Ok(())
            }
        };

        for food in &board.food {
            check(food)?;
        }

        let mut snakes = Vec::with_capacity(board.snakes.len());
        for snake in &board.snakes {
            if snake.body.is_empty() {
                return Err(SnapshotError::EmptyBody {
                    id: snake.id.clone(),
                });
            }
            for segment in &snake.body {
                check(segment)?;
            }
            snakes.push(Snake {
                id: snake.id.clone(),
                health: snake.health,
                body: snake.body.clone(),
            });
        }

        let you = snakes
            .iter()
            .position(|s| s.id == you_id)
            .ok_or_else(|| SnapshotError::OwnSnakeMissing {
                id: you_id.to_string(),
            })?;

        Ok(TurnSnapshot {
            width,
            height,
            food: board.food.clone(),
            snakes,
            you,
        })
    }

    /// Index of the agent's own snake in `snakes`
    pub fn you_index(&self) -> usize {
        self.you
    }

    pub fn you(&self) -> &Snake {
        &self.snakes[self.you]
    }

    /// Living snakes other than our own
    pub fn rivals(&self) -> impl Iterator<Item = &Snake> {
        self.snakes
            .iter()
            .enumerate()
            .filter(move |(i, s)| *i != self.you && s.is_alive())
            .map(|(_, s)| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Battlesnake;

    fn wire_snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 90,
            head: body.first().copied().unwrap_or(Coord::new(0, 0)),
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn board(snakes: Vec<Battlesnake>, food: Vec<Coord>) -> Board {
        Board {
            height: 5,
            width: 5,
            food,
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_snapshot_finds_own_snake() {
        let b = board(
            vec![
                wire_snake("other", &[(0, 0), (0, 1)]),
                wire_snake("me", &[(2, 2), (2, 1), (2, 0)]),
            ],
            vec![],
        );
        let snapshot = TurnSnapshot::from_board(&b, "me").unwrap();
        assert_eq!(snapshot.you_index(), 1);
        assert_eq!(snapshot.you().head(), Coord::new(2, 2));
        assert_eq!(snapshot.you().tail(), Coord::new(2, 0));
        assert_eq!(snapshot.rivals().count(), 1);
    }

    #[test]
    fn test_missing_own_snake_is_rejected() {
        let b = board(vec![wire_snake("other", &[(0, 0)])], vec![]);
        let err = TurnSnapshot::from_board(&b, "me").unwrap_err();
        assert_eq!(err, SnapshotError::OwnSnakeMissing { id: "me".to_string() });
    }

    #[test]
    fn test_out_of_bounds_food_is_rejected() {
        let b = board(vec![wire_snake("me", &[(1, 1)])], vec![Coord::new(5, 0)]);
        let err = TurnSnapshot::from_board(&b, "me").unwrap_err();
        assert!(matches!(err, SnapshotError::OutOfBounds { .. }));
        assert!(err.to_string().contains("(5, 0)"));
    }

    #[test]
    fn test_oversized_board_is_rejected() {
        let mut b = board(vec![wire_snake("me", &[(1, 1)])], vec![]);
        b.width = 100_000;
        b.height = 100_000;
        assert_eq!(
            TurnSnapshot::from_board(&b, "me").unwrap_err(),
            SnapshotError::InvalidDimensions {
                width: 100_000,
                height: 100_000
            }
        );

        b.width = 256;
        b.height = 256;
        assert!(TurnSnapshot::from_board(&b, "me").is_ok());
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let b = board(vec![wire_snake("me", &[])], vec![]);
        assert!(matches!(
            TurnSnapshot::from_board(&b, "me"),
            Err(SnapshotError::EmptyBody { .. })
        ));
    }

    #[test]
    fn test_stacked_tail_does_not_vacate() {
        let fed = Snake {
            id: "a".into(),
            health: 100,
            body: vec![Coord::new(1, 1), Coord::new(1, 2), Coord::new(1, 2)],
        };
        let moving = Snake {
            id: "b".into(),
            health: 100,
            body: vec![Coord::new(1, 1), Coord::new(1, 2), Coord::new(1, 3)],
        };
        assert!(!fed.tail_vacates());
        assert!(moving.tail_vacates());
    }
}
