// Occupancy model of the current turn
//
// The grid is rebuilt from the request on every turn and never cached.
// It is the single source of truth for what is passable, including the
// board edges: anything outside the board reads as a wall.

use std::collections::HashMap;

use crate::types::{Battlesnake, Board, Coord};

/// What occupies a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    /// Any snake segment, our own included
    Body,
    /// Head of an opposing snake strictly shorter than us
    Prey,
    Food,
    Hazard,
}

impl Cell {
    /// Walls and bodies end a branch of exploration
    pub fn is_passable(&self) -> bool {
        !matches!(self, Cell::Wall | Cell::Body)
    }
}

/// Sparse cell labels for a `width` x `height` board
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: HashMap<Coord, Cell>,
}

impl Grid {
    /// Creates an empty grid with the given dimensions
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Labels a cell, overwriting any earlier label
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells.insert(coord, cell);
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Label at `coord`; out of bounds is always a wall
    pub fn get(&self, coord: &Coord) -> Cell {
        if !self.in_bounds(coord) {
            return Cell::Wall;
        }
        self.cells.get(coord).copied().unwrap_or(Cell::Empty)
    }
}

/// Builds the occupancy grid for one turn from our point of view
///
/// Bodies and prey heads are written first, then food, then hazards, so a
/// later label wins where coordinates collide.
pub fn classify(board: &Board, you: &Battlesnake) -> Grid {
    let mut grid = Grid::new(board.width, board.height);

    for snake in &board.snakes {
        for (i, segment) in snake.body.iter().enumerate() {
            if i == 0 && snake.length < you.length {
                grid.set(*segment, Cell::Prey);
            } else {
                grid.set(*segment, Cell::Body);
            }
        }
    }
    for food in &board.food {
        grid.set(*food, Cell::Food);
    }
    for hazard in &board.hazards {
        grid.set(*hazard, Cell::Hazard);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: Vec<Coord>) -> Battlesnake {
        Battlesnake {
            id: id.to_string(),
            head: body[0],
            length: body.len() as i32,
            body,
            ..Default::default()
        }
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let grid = Grid::new(7, 7);
        assert_eq!(grid.get(&Coord::new(-1, 0)), Cell::Wall);
        assert_eq!(grid.get(&Coord::new(0, -1)), Cell::Wall);
        assert_eq!(grid.get(&Coord::new(7, 3)), Cell::Wall);
        assert_eq!(grid.get(&Coord::new(3, 7)), Cell::Wall);
        assert_eq!(grid.get(&Coord::new(6, 6)), Cell::Empty);
    }

    #[test]
    fn test_out_of_bounds_ignores_backing_map() {
        let mut grid = Grid::new(3, 3);
        grid.set(Coord::new(3, 0), Cell::Food);
        assert_eq!(grid.get(&Coord::new(3, 0)), Cell::Wall);
    }

    #[test]
    fn test_shorter_opponent_head_is_prey() {
        let you = snake("me", vec![Coord::new(3, 3), Coord::new(3, 2), Coord::new(3, 1)]);
        let small = snake("small", vec![Coord::new(1, 1), Coord::new(1, 0)]);
        let equal = snake("equal", vec![Coord::new(5, 5), Coord::new(5, 4), Coord::new(5, 3)]);
        let board = Board {
            width: 7,
            height: 7,
            snakes: vec![you.clone(), small, equal],
            ..Default::default()
        };

        let grid = classify(&board, &you);
        assert_eq!(grid.get(&Coord::new(1, 1)), Cell::Prey);
        assert_eq!(grid.get(&Coord::new(1, 0)), Cell::Body);
        assert_eq!(grid.get(&Coord::new(5, 5)), Cell::Body);
        assert_eq!(grid.get(&Coord::new(3, 3)), Cell::Body);
    }

    #[test]
    fn test_hazard_overwrites_food() {
        let you = snake("me", vec![Coord::new(0, 0)]);
        let board = Board {
            width: 5,
            height: 5,
            snakes: vec![you.clone()],
            food: vec![Coord::new(2, 2), Coord::new(4, 4)],
            hazards: vec![Coord::new(2, 2)],
        };

        let grid = classify(&board, &you);
        assert_eq!(grid.get(&Coord::new(2, 2)), Cell::Hazard);
        assert_eq!(grid.get(&Coord::new(4, 4)), Cell::Food);
    }

    #[test]
    fn test_passability() {
        assert!(!Cell::Wall.is_passable());
        assert!(!Cell::Body.is_passable());
        assert!(Cell::Prey.is_passable());
        assert!(Cell::Hazard.is_passable());
    }
}
