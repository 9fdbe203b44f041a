//! Keyboard input, turned into [`Command`]s and queued for the game loop.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use log::{debug, warn};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
}

pub fn map_key(ev: &KeyEvent) -> Option<Command> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Bounded command queue. The sending side never waits: a full queue drops the command.
pub fn command_queue(capacity: usize) -> (CommandSender, mpsc::Receiver<Command>) {
    let (tx, rx) = mpsc::channel(capacity);
    (CommandSender { tx }, rx)
}

#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<Command>,
}

impl CommandSender {
    /// Queues `cmd`. Returns `false` once the receiving loop is gone.
    pub fn offer(&self, cmd: Command) -> bool {
        match self.tx.try_send(cmd) {
            Ok(()) => true,
            Err(TrySendError::Full(cmd)) => {
                warn!("Input queue full, dropping {:?}", cmd);
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// Forwards key presses from `events` until the stream ends or the loop hangs up.
pub async fn forward_events<S>(mut events: S, sender: CommandSender)
where
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    while let Some(ev) = events.next().await {
        let ev = match ev {
            Ok(ev) => ev,
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                break;
            }
        };

        if let Event::Key(key) = ev {
            if let Some(cmd) = map_key(&key) {
                debug!("Key {:?} -> {:?}", key.code, cmd);
                if !sender.offer(cmd) {
                    break;
                }
            }
        }
    }
}

pub async fn forward_terminal_events(sender: CommandSender) {
    forward_events(EventStream::new(), sender).await
}
