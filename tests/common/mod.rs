// Shared fixtures for the integration tests
//
// Boards are drawn as text, top row first, one `|`-delimited cell per square:
//   "  "  empty
//   "F "  food
//   "Y0"  segment 0 (the head) of our snake, id "me"
//   "A3"  segment 3 of rival "a"
//   "A4+" segments 4 and 5 stacked on one square (a snake that just ate)
// Segment indices are base 36, so "Ya" is segment 10.

#![allow(dead_code)]

use std::collections::BTreeMap;

use pursuit_snake::types::{Battlesnake, Board, Coord, Game, GameState};

pub const DEFAULT_HEALTH: i32 = 80;

pub fn board_from_text(text: &str) -> Board {
    board_with_health(text, &[])
}

/// Like `board_from_text`, overriding health for the listed snake letters
pub fn board_with_health(text: &str, health: &[(char, i32)]) -> Board {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|row| row.starts_with('|'))
        .collect();

    let height = rows.len() as i32;
    let mut width = 0;
    let mut food = Vec::new();
    let mut segments: BTreeMap<char, Vec<(u32, Coord)>> = BTreeMap::new();

    for (y, row) in rows.iter().rev().enumerate() {
        let cells: Vec<&str> = row.trim_start_matches('|').split_terminator('|').collect();
        width = width.max(cells.len() as i32);

        for (x, cell) in cells.iter().enumerate() {
            let coord = Coord::new(x as i32, y as i32);
            let chars: Vec<char> = cell.chars().collect();
            match chars.first() {
                None | Some(' ') => {}
                Some('F') => food.push(coord),
                Some(&letter) => {
                    let segment = chars
                        .get(1)
                        .and_then(|c| c.to_digit(36))
                        .unwrap_or_else(|| panic!("bad cell '{}' at {:?}", cell, coord));
                    let body = segments.entry(letter).or_default();
                    body.push((segment, coord));
                    if chars.get(2) == Some(&'+') {
                        body.push((segment + 1, coord));
                    }
                }
            }
        }
    }

    let snakes = segments
        .into_iter()
        .map(|(letter, mut body)| {
            body.sort_by_key(|(segment, _)| *segment);
            let body: Vec<Coord> = body.into_iter().map(|(_, coord)| coord).collect();
            let hp = health
                .iter()
                .find(|(l, _)| *l == letter)
                .map(|(_, hp)| *hp)
                .unwrap_or(DEFAULT_HEALTH);
            snake(&snake_id(letter), hp, body)
        })
        .collect();

    Board {
        height,
        width,
        food,
        snakes,
        hazards: vec![],
    }
}

pub fn snake_id(letter: char) -> String {
    if letter == 'Y' {
        "me".to_string()
    } else {
        letter.to_ascii_lowercase().to_string()
    }
}

pub fn snake(id: &str, health: i32, body: Vec<Coord>) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

pub fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: Default::default(),
        timeout: 500,
    }
}

pub fn you(board: &Board) -> Battlesnake {
    board
        .snakes
        .iter()
        .find(|s| s.id == "me")
        .cloned()
        .expect("board has no 'Y' snake")
}

pub fn game_state(turn: i32, board: Board) -> GameState {
    GameState {
        game: game(),
        turn,
        you: you(&board),
        board,
    }
}
