use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use Direction::*;

/// A grid position. Signed so that a step off the edge is still representable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Cell { row: self.row + d_row, col: self.col + d_col }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Cell { row, col }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector as `(d_row, d_col)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Body segments, head at the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Snake { body: VecDeque::from(vec![head]) }
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for an empty body.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Cell {
        // never empty: both constructors guarantee at least one segment
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Any segment, tail included.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepends `new_head`; the tail is kept when growing, dropped otherwise.
    /// Returns the vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Cell, grow: bool) -> Option<Cell> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_in_each_direction() {
        let c = Cell::new(5, 5);
        assert_eq!(c.step(Up), Cell::new(4, 5));
        assert_eq!(c.step(Down), Cell::new(6, 5));
        assert_eq!(c.step(Left), Cell::new(5, 4));
        assert_eq!(c.step(Right), Cell::new(5, 6));
    }

    #[test]
    fn test_opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let cells = vec![Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3)];
        let mut snake = Snake::from_cells(cells).unwrap();

        let vacated = snake.advance(Cell::new(5, 6), false);

        assert_eq!(vacated, Some(Cell::new(5, 3)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 6));
        assert_eq!(snake.tail(), Cell::new(5, 4));
    }

    #[test]
    fn test_advance_with_growth() {
        let mut snake = Snake::new(Cell::new(0, 0));

        assert_eq!(snake.advance(Cell::new(0, 1), true), None);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail(), Cell::new(0, 0));
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert!(Snake::from_cells(Vec::new()).is_none());
    }
}
