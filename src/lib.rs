//! Terminal Snake.
//!
//! - `snake`, `game`: board model and the pure tick/turn/restart transitions
//! - `scheduler`, `input`: the ticking task and the bounded command queue
//! - `game_loop`: ties them together around a single owned state
//! - `render`, `term`: drawing traits and their crossterm implementation

pub mod config;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod snake;
pub mod term;

pub use config::{FoodPlacement, GameConfig};
pub use error::{Result, SnakeError};
pub use game::{Crash, GameState, Phase, TickOutcome};
pub use game_loop::GameLoop;
pub use snake::{Cell, Direction, Snake};
