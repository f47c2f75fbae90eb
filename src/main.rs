// Entry point for the terminal Minesweeper
// Loads preferences, sets up logging, then runs one game in raw terminal mode

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::error::Error;
use std::io;
use tracing::warn;

// Module declarations
mod tm_board;  // Grid, mine placement, flood-fill reveal
mod tm_color;  // Palette and terminal color depth matching
mod tm_config; // Fixed rules and user preferences
mod tm_error;  // Error types
mod tm_game;   // Session state and the game loop
mod tm_input;  // Keyboard mapping and reader thread
mod tm_lang;   // Localized strings
mod tm_log;    // File logging
mod tm_render; // Board drawing
mod tm_term;   // Terminal display surface

use tm_color::Palette;
use tm_config::{Rules, load_config};
use tm_game::{Session, run};
use tm_input::KeyboardInput;
use tm_lang::Lang;
use tm_render::{Glyphs, Renderer};
use tm_term::{TermDisplay, enter_game_mode, leave_game_mode};

fn main() -> Result<(), Box<dyn Error>> {
    let (cfg, problem) = load_config();
    tm_log::init(&cfg);
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    let lang = Lang::new(&cfg.language);
    let renderer = Renderer::new(Palette::detect(), Glyphs::new(cfg.ascii_glyphs, lang.is_cjk()));
    let mut session = Session::new(Rules::CLASSIC)?;
    let mut input = KeyboardInput::spawn()?;

    let mut stdout = io::stdout();
    enter_game_mode(&mut stdout, enable_raw_mode)?;
    let mut display = TermDisplay::new(io::stdout());

    let result = run(&mut session, &mut input, &mut display, &renderer, &lang);

    // restore the terminal before reporting anything
    leave_game_mode(&mut stdout, disable_raw_mode)?;
    println!();
    result?;
    Ok(())
}
