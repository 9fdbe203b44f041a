use std::{fs::File, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use log::info;

use snake::input::{command_queue, forward_terminal_events};
use snake::term::TermManager;
use snake::{FoodPlacement, GameConfig, GameLoop};

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between two game steps
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Max number of key presses waiting for the next step
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Never spawn food under the snake
    #[arg(long)]
    avoid_snake: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(capacity) = self.queue_capacity {
            config.queue_capacity = capacity;
        }
        if self.avoid_snake {
            config.food_placement = FoodPlacement::AvoidSnake;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // Without a log file nothing is logged unless RUST_LOG asks for it,
    // since stderr shares the screen with the game
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;
    let config = cli.game_config()?;
    info!("Starting with {:?}", config);

    let mut term = TermManager::new(&config).context("Failed to set up the terminal")?;
    if let Err(e) = term.setup() {
        restore_terminal();
        return Err(e).context("Failed to enter game screen");
    }

    let (sender, receiver) = command_queue(config.queue_capacity);
    let input = tokio::spawn(forward_terminal_events(sender));

    // Run the game, then restore the terminal whatever the outcome
    let result = match GameLoop::new(config, term, receiver) {
        Ok(game) => game.run().await,
        Err(e) => Err(e),
    };
    input.abort();

    match result {
        Ok((state, mut term)) => {
            term.restore().context("Failed to restore the terminal")?;
            info!("Final score {}", state.score);
            Ok(())
        }
        Err(e) => {
            restore_terminal();
            Err(e).context("Game loop failed")
        }
    }
}

// Best effort: used on error paths, where the `TermManager` is gone or half set up
fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        cursor::Show,
        cursor::EnableBlinking,
        terminal::LeaveAlternateScreen
    );
}
