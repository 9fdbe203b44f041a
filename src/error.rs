use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not parse config file: {0}")]
    ConfigFile(#[from] serde_json::Error),

    #[error("Terminal is too small: need {needed:?}, have {actual:?} (columns, rows)")]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },
}

pub type Result<T> = std::result::Result<T, SnakeError>;
