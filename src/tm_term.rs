// Terminal output: the display surface the renderer draws onto

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::{execute, queue};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

use crate::tm_error::{GameError, Result};

/// Foreground plus optional background overlay for one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    pub fg: Color,
    pub bg: Option<Color>,
}

impl GlyphStyle {
    pub fn fg(fg: Color) -> Self {
        GlyphStyle { fg, bg: None }
    }

    pub fn on(self, bg: Color) -> Self {
        GlyphStyle { bg: Some(bg), ..self }
    }
}

/// Something the board can be drawn on, row by row
pub trait Display {
    fn clear(&mut self) -> Result<()>;
    fn write_glyph(&mut self, style: GlyphStyle, glyph: &str) -> Result<()>;
    fn write_text(&mut self, text: &str) -> Result<()>;
    fn end_line(&mut self) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// ANSI terminal display on top of crossterm commands
pub struct TermDisplay<W: Write> {
    out: W,
}

impl<W: Write> TermDisplay<W> {
    pub fn new(out: W) -> Self {
        TermDisplay { out }
    }
}

impl<W: Write> Display for TermDisplay<W> {
    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)).map_err(GameError::Display)
    }

    fn write_glyph(&mut self, style: GlyphStyle, glyph: &str) -> Result<()> {
        queue!(self.out, SetForegroundColor(style.fg)).map_err(GameError::Display)?;
        if let Some(bg) = style.bg {
            queue!(self.out, SetBackgroundColor(bg)).map_err(GameError::Display)?;
        }
        queue!(self.out, Print(glyph), ResetColor).map_err(GameError::Display)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text)).map_err(GameError::Display)
    }

    // raw mode needs an explicit carriage return
    fn end_line(&mut self) -> Result<()> {
        queue!(self.out, Print("\r\n")).map_err(GameError::Display)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(GameError::Display)
    }
}

/// Hide the cursor, then switch to raw mode via `raw`.
/// The cursor comes back if raw mode cannot be entered.
pub fn enter_game_mode<W: Write>(out: &mut W, raw: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    execute!(out, Hide)?;
    if let Err(e) = raw() {
        let _ = execute!(out, Show);
        return Err(e);
    }
    Ok(())
}

/// Leave raw mode via `cooked` and show the cursor; both are attempted even if one fails
pub fn leave_game_mode<W: Write>(out: &mut W, cooked: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    let restored = cooked();
    let shown = execute!(out, Show);
    restored.and(shown)
}
