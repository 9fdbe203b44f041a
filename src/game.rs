//! Snake rules as pure transitions over [`GameState`].
//!
//! Nothing here touches the terminal or the clock: [`tick`], [`change_direction`]
//! and [`restart`] take a state by value and hand back the next one. The
//! [`GameLoop`](crate::game_loop::GameLoop) decides when they run.

use log::{debug, info, trace};
use rand::{seq::SliceRandom, Rng};

use crate::config::{FoodPlacement, GameConfig};
use crate::snake::{Cell, Direction, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Game over. Only a restart leaves this phase.
    Stopped,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crash {
    Wall,
    SelfCollision,
}

/// What a single tick did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No heading chosen yet, the snake stays put
    Idle,
    Moved,
    /// The snake ate and grew by one
    Ate,
    /// This tick ended the game
    Crashed(Crash),
    /// The game was already over, nothing changed
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` until the first directional input.
    pub heading: Option<Direction>,
    pub food: Cell,
    pub score: u32,
    pub phase: Phase,
}

impl GameState {
    pub fn new(snake: Snake, heading: Option<Direction>, food: Cell) -> Self {
        GameState { snake, heading, food, score: 0, phase: Phase::Running }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

/// Fresh game: a one-cell snake on the origin, no heading, score 0, new food.
pub fn restart<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> GameState {
    let snake = Snake::new(config.origin);
    let food = place_food(config, &snake, rng);

    info!(
        "New game on a {}x{} grid, food at ({}, {})",
        config.width, config.height, food.row, food.col
    );
    GameState::new(snake, None, food)
}

/// Applies a directional input. Ignored once the game is over, and when it
/// would reverse the current heading.
pub fn change_direction(mut state: GameState, direction: Direction) -> GameState {
    if !state.is_running() {
        return state;
    }

    match state.heading {
        Some(current) if current.is_opposite(direction) => {
            debug!("Rejected turn {:?} while heading {:?}", direction, current);
        }
        _ => state.heading = Some(direction),
    }

    state
}

/// Advances the game by one step.
pub fn tick<R: Rng + ?Sized>(
    mut state: GameState,
    config: &GameConfig,
    rng: &mut R,
) -> (GameState, TickOutcome) {
    if !state.is_running() {
        return (state, TickOutcome::Stopped);
    }

    let heading = match state.heading {
        Some(dir) => dir,
        None => return (state, TickOutcome::Idle),
    };

    let candidate = state.snake.head().step(heading);

    let crash = if !config.contains(candidate) {
        Some(Crash::Wall)
    } else if state.snake.occupies(candidate) {
        Some(Crash::SelfCollision)
    } else {
        None
    };

    if let Some(crash) = crash {
        state.phase = Phase::Stopped;
        info!(
            "Game over ({:?}) at ({}, {}), score {}",
            crash, candidate.row, candidate.col, state.score
        );
        return (state, TickOutcome::Crashed(crash));
    }

    let ate = candidate == state.food;
    state.snake.advance(candidate, ate);
    trace!("Head moved to ({}, {})", candidate.row, candidate.col);

    if ate {
        state.score += 1;
        state.food = place_food(config, &state.snake, rng);
        debug!(
            "Ate food, score {}, next food at ({}, {})",
            state.score, state.food.row, state.food.col
        );
        (state, TickOutcome::Ate)
    } else {
        (state, TickOutcome::Moved)
    }
}

/// Picks a food cell according to the configured placement policy.
pub fn place_food<R: Rng + ?Sized>(config: &GameConfig, snake: &Snake, rng: &mut R) -> Cell {
    match config.food_placement {
        FoodPlacement::Anywhere => random_cell(config, rng),
        FoodPlacement::AvoidSnake => {
            let free: Vec<Cell> = (0..config.height as i32)
                .flat_map(|row| (0..config.width as i32).map(move |col| Cell::new(row, col)))
                .filter(|cell| !snake.occupies(*cell))
                .collect();

            // A snake filling the whole board leaves no free cell
            free.choose(rng).copied().unwrap_or_else(|| random_cell(config, rng))
        }
    }
}

fn random_cell<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Cell {
    Cell::new(
        rng.gen_range(0..config.height as i32),
        rng.gen_range(0..config.width as i32),
    )
}
