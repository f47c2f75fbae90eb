// Error types shared by the board model, the game loop and the terminal glue

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("cannot place {requested} mines, only {eligible} cells are eligible")]
    TooManyMines { requested: usize, eligible: usize },
    #[error("mines have already been placed on this board")]
    MinesAlreadyPlaced,
    #[error("invalid rules: {0}")]
    InvalidRules(String),
    #[error("failed to read keyboard input: {0}")]
    Input(#[source] io::Error),
    #[error("failed to write to the terminal: {0}")]
    Display(#[source] io::Error),
    #[error("keyboard reader stopped unexpectedly")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, GameError>;
