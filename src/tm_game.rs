// Game session and the input-driven loop
// Handles event dispatch, lazy mine placement, win/loss detection and re-rendering

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::tm_board::{Board, Direction, RevealOutcome};
use crate::tm_config::Rules;
use crate::tm_error::Result;
use crate::tm_input::{InputEvent, InputSource};
use crate::tm_lang::Lang;
use crate::tm_render::Renderer;
use crate::tm_term::Display;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Quit,
}

/// One game from start to finish
pub struct Session {
    pub board: Board,
    rules: Rules,
    rng: StdRng,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(rules: Rules) -> Result<Self> {
        rules.validate()?;
        let board = Board::new(rules.width, rules.height).with_mine_total(rules.mines);
        Ok(Session::with_board(rules, board, StdRng::from_entropy()))
    }

    /// Reproducible mine layout
    #[cfg(test)]
    pub fn seeded(rules: Rules, seed: u64) -> Result<Self> {
        rules.validate()?;
        Ok(Session::with_board(
            rules,
            Board::new(rules.width, rules.height).with_mine_total(rules.mines),
            StdRng::seed_from_u64(seed),
        ))
    }

    /// Continue from an existing board, mines possibly already placed
    pub fn with_board(rules: Rules, board: Board, rng: StdRng) -> Self {
        Session {
            board,
            rules,
            rng,
            outcome: None,
        }
    }

    #[cfg(test)]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Apply one action; returns the outcome once the session is over.
    /// Events after the end are ignored.
    pub fn apply(&mut self, event: InputEvent) -> Result<Option<Outcome>> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }
        debug!(?event, "input");
        match event {
            InputEvent::Quit => {
                self.outcome = Some(Outcome::Quit);
                return Ok(self.outcome);
            }
            InputEvent::MoveUp => self.board.move_cursor(Direction::Up),
            InputEvent::MoveLeft => self.board.move_cursor(Direction::Left),
            InputEvent::MoveDown => self.board.move_cursor(Direction::Down),
            InputEvent::MoveRight => self.board.move_cursor(Direction::Right),
            InputEvent::ToggleFlag => {
                let cursor = self.board.cursor();
                self.board.toggle_flag(cursor);
            }
            InputEvent::Reveal => {
                let cursor = self.board.cursor();
                // first reveal decides the layout, keeping the cursor square clear
                if !self.board.is_initialized() {
                    self.board.place_mines(self.rules.mines, cursor, &mut self.rng)?;
                }
                match self.board.reveal(cursor) {
                    RevealOutcome::Mine => {
                        info!(col = cursor.col, row = cursor.row, "mine hit");
                        self.outcome = Some(Outcome::Lost);
                    }
                    RevealOutcome::Safe { opened } => debug!(opened, "cells opened"),
                    RevealOutcome::Blocked => debug!("reveal blocked by flag"),
                }
            }
        }
        if self.outcome.is_none() && self.board.check_victory() {
            self.outcome = Some(Outcome::Won);
        }
        Ok(self.outcome)
    }
}

/// Drive a session until it ends: block for an action, apply it, redraw.
/// Finishes with the outcome message and the uncovered board.
pub fn run<I, D>(
    session: &mut Session,
    input: &mut I,
    display: &mut D,
    renderer: &Renderer,
    lang: &Lang,
) -> Result<Outcome>
where
    I: InputSource + ?Sized,
    D: Display + ?Sized,
{
    renderer.draw_player(&session.board, lang, display)?;
    loop {
        let event = input.next_event()?;
        if let Some(outcome) = session.apply(event)? {
            info!(?outcome, "session over");
            renderer.draw_final(&session.board, outcome, lang, display)?;
            return Ok(outcome);
        }
        renderer.draw_player(&session.board, lang, display)?;
    }
}
