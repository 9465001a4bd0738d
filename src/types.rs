// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    #[serde(default)]
    pub timeout: u32,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    #[serde(default)]
    pub food: Vec<Coord>,
    #[serde(default)]
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
    #[serde(default)]
    pub squad: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions, in the order moves are evaluated
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Position of this direction in `Direction::all()`
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

impl GameState {
    /// Session key for this request: one engine per game and player
    pub fn session_key(&self) -> String {
        format!("{}{}", self.game.id, self.you.id)
    }
}

/// Response body for POST /move
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: String,
    pub shout: String,
}

/// Response body for GET /
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InfoResponse {
    pub apiversion: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub head: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tail: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_apply_is_cardinal() {
        let c = Coord::new(3, 3);
        assert_eq!(Direction::Up.apply(&c), Coord::new(3, 4));
        assert_eq!(Direction::Down.apply(&c), Coord::new(3, 2));
        assert_eq!(Direction::Left.apply(&c), Coord::new(2, 3));
        assert_eq!(Direction::Right.apply(&c), Coord::new(4, 3));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_game_state_parses_minimal_wire_request() {
        let raw = r#"{
            "game": {"id": "g1", "ruleset": {"name": "standard"}, "timeout": 500},
            "turn": 3,
            "board": {
                "height": 11, "width": 11,
                "food": [{"x": 1, "y": 2}],
                "hazards": [],
                "snakes": [{"id": "s1", "name": "me", "health": 90,
                    "body": [{"x": 5, "y": 5}], "head": {"x": 5, "y": 5},
                    "length": 1, "latency": "12", "shout": ""}]
            },
            "you": {"id": "s1", "name": "me", "health": 90,
                "body": [{"x": 5, "y": 5}], "head": {"x": 5, "y": 5},
                "length": 1, "latency": "12", "shout": ""}
        }"#;
        let state: GameState = serde_json::from_str(raw).expect("valid request");
        assert_eq!(state.session_key(), "g1s1");
        assert_eq!(state.board.food, vec![Coord::new(1, 2)]);
        assert_eq!(state.you.squad, None);
    }

    #[test]
    fn test_move_response_uses_wire_field_name() {
        let body = serde_json::to_value(MoveResponse {
            direction: "left".to_string(),
            shout: String::new(),
        })
        .unwrap();
        assert_eq!(body["move"], "left");
        assert_eq!(body["shout"], "");
    }
}
