// Keyboard input: raw key events mapped to game actions, read on a helper thread

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread;
use tracing::debug;

use crate::tm_error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    MoveUp,
    MoveLeft,
    MoveDown,
    MoveRight,
    ToggleFlag,
    Reveal,
}

/// Blocking source of game actions, one per call
pub trait InputSource {
    fn next_event(&mut self) -> Result<InputEvent>;
}

/// Translate a key press into a game action; None for keys the game ignores
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    // Windows reports releases as well
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        // raw mode swallows SIGINT
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Up => Some(InputEvent::MoveUp),
        KeyCode::Left => Some(InputEvent::MoveLeft),
        KeyCode::Down => Some(InputEvent::MoveDown),
        KeyCode::Right => Some(InputEvent::MoveRight),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(InputEvent::Quit),
            'w' => Some(InputEvent::MoveUp),
            'a' => Some(InputEvent::MoveLeft),
            's' => Some(InputEvent::MoveDown),
            'd' => Some(InputEvent::MoveRight),
            'f' => Some(InputEvent::ToggleFlag),
            'r' | ' ' => Some(InputEvent::Reveal),
            _ => None,
        },
        _ => None,
    }
}

/// Terminal keyboard read on a dedicated thread.
/// Each request yields exactly one terminal event through a single-slot channel,
/// so nothing is read ahead while the game is busy with the previous key.
pub struct KeyboardInput {
    request: SyncSender<()>,
    reply: Receiver<io::Result<Event>>,
}

impl KeyboardInput {
    pub fn spawn() -> Result<Self> {
        let (request, requests) = sync_channel::<()>(1);
        let (replies, reply) = sync_channel::<io::Result<Event>>(1);
        thread::Builder::new()
            .name("keyboard".to_string())
            .spawn(move || {
                // ends once the game drops its request sender
                for () in requests.iter() {
                    if replies.send(event::read()).is_err() {
                        break;
                    }
                }
            })
            .map_err(GameError::Input)?;
        Ok(KeyboardInput { request, reply })
    }
}

impl InputSource for KeyboardInput {
    fn next_event(&mut self) -> Result<InputEvent> {
        loop {
            self.request.send(()).map_err(|_| GameError::InputClosed)?;
            let ev = self
                .reply
                .recv()
                .map_err(|_| GameError::InputClosed)?
                .map_err(GameError::Input)?;
            if let Event::Key(key) = ev {
                if let Some(action) = map_key(key) {
                    return Ok(action);
                }
                debug!(?key, "ignored key");
            }
        }
    }
}
