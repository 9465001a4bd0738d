// Shared builders for integration tests
#![allow(dead_code)]

use lucky_snake::occupancy::{Cell, Grid};
use lucky_snake::types::{Battlesnake, Board, Coord, Game, GameState};

/// Parses a picture of a board, top row first
///
/// `s` snake body, `p` prey head, `f` food, `h` hazard, anything else empty.
pub fn grid(picture: &str) -> Grid {
    let rows: Vec<&str> = picture
        .trim()
        .lines()
        .map(|l| l.trim())
        .rev()
        .collect();
    let height = rows.len() as i32;
    let width = rows[0].len() as i32;
    let mut grid = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let cell = match c {
                's' => Cell::Body,
                'p' => Cell::Prey,
                'f' => Cell::Food,
                'h' => Cell::Hazard,
                _ => continue,
            };
            grid.set(Coord::new(x as i32, y as i32), cell);
        }
    }
    grid
}

pub fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        ..Default::default()
    }
}

pub fn board(width: i32, height: i32, snakes: Vec<Battlesnake>, food: &[(i32, i32)]) -> Board {
    Board {
        width,
        height,
        food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        snakes,
        hazards: vec![],
    }
}

pub fn state(game_id: &str, turn: i32, board: Board, you: Battlesnake) -> GameState {
    GameState {
        game: Game {
            id: game_id.to_string(),
            timeout: 500,
            ..Default::default()
        },
        turn,
        board,
        you,
    }
}

/// A quiet 7x7 game where we sit in the lower left with room to roam
pub fn open_game(game_id: &str, turn: i32) -> GameState {
    let you = snake("me", &[(1, 2), (1, 1), (1, 0)]);
    let board = board(7, 7, vec![you.clone()], &[]);
    state(game_id, turn, board, you)
}
