use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};
use crate::snake::Cell;

/// Where new food may appear.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoodPlacement {
    /// Uniform over the whole grid, including cells under the snake.
    #[default]
    Anywhere,
    /// Uniform over the cells the snake does not occupy.
    AvoidSnake,
}

// Largest grid whose cells, border and score line still fit in u16 terminal coordinates
pub const MAX_WIDTH: u16 = (u16::MAX - 2) / 2;
pub const MAX_HEIGHT: u16 = u16::MAX - 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns
    pub width: u16,
    /// Number of rows
    pub height: u16,
    /// Cell the snake starts on after every (re)start
    pub origin: Cell,
    /// Period of the game tick, in milliseconds
    pub tick_ms: u64,
    /// How many input commands may wait between two ticks
    pub queue_capacity: usize,
    pub food_placement: FoodPlacement,
    /// Fixed RNG seed, for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 20,
            height: 20,
            origin: Cell::new(10, 9),
            tick_ms: 100,
            queue_capacity: 16,
            food_placement: FoodPlacement::Anywhere,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(width: u16, height: u16) -> Self {
        GameConfig { width, height, ..Default::default() }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0
            && cell.row < self.height as i32 && cell.col < self.width as i32
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SnakeError::Config(format!(
                "grid must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(SnakeError::Config(format!(
                "grid {}x{} exceeds the {}x{} maximum",
                self.width, self.height, MAX_WIDTH, MAX_HEIGHT
            )));
        }
        if !self.contains(self.origin) {
            return Err(SnakeError::Config(format!(
                "origin ({}, {}) lies outside the {}x{} grid",
                self.origin.row, self.origin.col, self.width, self.height
            )));
        }
        if self.tick_ms == 0 {
            return Err(SnakeError::Config("tick period must be at least 1ms".into()));
        }
        if self.queue_capacity == 0 {
            return Err(SnakeError::Config("input queue capacity must be at least 1".into()));
        }

        Ok(())
    }
}
