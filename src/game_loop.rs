use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::mpsc;

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{self, GameState, TickOutcome};
use crate::input::Command;
use crate::render::{draw_frame, StatusSink, Surface};
use crate::scheduler::Ticker;

/// Drives a game: owns the state and is the only place it is mutated.
///
/// Ticks and queued commands are handled one at a time on the same task,
/// so a direction change never races with a step.
pub struct GameLoop<D> {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    display: D,
    commands: mpsc::Receiver<Command>,
}

impl<D: Surface + StatusSink> GameLoop<D> {
    pub fn new(config: GameConfig, display: D, commands: mpsc::Receiver<Command>) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = game::restart(&config, &mut rng);

        Ok(GameLoop { config, state, rng, display, commands })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs until a `Quit` command arrives or every sender is dropped, then
    /// hands back the final state and the display.
    pub async fn run(self) -> Result<(GameState, D)> {
        let GameLoop { config, mut state, mut rng, mut display, mut commands } = self;
        let mut ticker = Ticker::new();

        start_game(&config, &state, &mut ticker, &mut display)?;

        loop {
            tokio::select! {
                biased;

                cmd = commands.recv() => match cmd {
                    Some(Command::Quit) | None => break,
                    Some(Command::Turn(dir)) => state = game::change_direction(state, dir),
                    Some(Command::Restart) => {
                        ticker.cancel();
                        state = game::restart(&config, &mut rng);
                        start_game(&config, &state, &mut ticker, &mut display)?;
                    }
                },

                _ = ticker.tick() => {
                    let (next, outcome) = game::tick(state, &config, &mut rng);
                    state = next;
                    show_outcome(&state, outcome, &mut ticker, &mut display)?;
                }
            }
        }

        info!("Leaving game loop, final score {}", state.score);
        Ok((state, display))
    }
}

fn start_game<D: Surface + StatusSink>(
    config: &GameConfig,
    state: &GameState,
    ticker: &mut Ticker,
    display: &mut D,
) -> Result<()> {
    display.show_game_over(false, 0)?;
    display.show_score(state.score)?;
    draw_frame(display, state)?;
    ticker.start(config.tick_period());
    Ok(())
}

fn show_outcome<D: Surface + StatusSink>(
    state: &GameState,
    outcome: TickOutcome,
    ticker: &mut Ticker,
    display: &mut D,
) -> Result<()> {
    match outcome {
        TickOutcome::Crashed(_) => {
            ticker.cancel();
            draw_frame(display, state)?;
            display.show_game_over(true, state.score)?;
        }
        TickOutcome::Ate => {
            draw_frame(display, state)?;
            display.show_score(state.score)?;
        }
        TickOutcome::Idle | TickOutcome::Moved => draw_frame(display, state)?,
        TickOutcome::Stopped => debug!("Tick after game over ignored"),
    }

    Ok(())
}
