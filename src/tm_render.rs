// Board rendering: a read-only walk over the board producing styled glyphs

use unicode_width::UnicodeWidthStr;

use crate::tm_board::{Board, Cell, CellState, Coord};
use crate::tm_color::Palette;
use crate::tm_error::Result;
use crate::tm_game::Outcome;
use crate::tm_lang::Lang;
use crate::tm_term::{Display, GlyphStyle};

/// Player view hides covered cells; debug view shows everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Player,
    Debug,
}

/// Symbols for the non-numeric cell kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub covered: &'static str,
    pub flag: &'static str,
    pub mine: &'static str,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        covered: "■",
        flag: "¶",
        mine: "☼",
    };

    pub const ASCII: Glyphs = Glyphs {
        covered: "#",
        flag: "F",
        mine: "*",
    };

    /// Unicode symbols unless ASCII is requested or a symbol would not fit one column.
    /// CJK terminals draw ambiguous-width symbols two columns wide.
    pub fn new(ascii: bool, cjk: bool) -> Self {
        if ascii {
            return Glyphs::ASCII;
        }
        let g = Glyphs::UNICODE;
        let fits = [g.covered, g.flag, g.mine].iter().all(|s| {
            let w = if cjk { s.width_cjk() } else { s.width() };
            w == 1
        });
        if fits { g } else { Glyphs::ASCII }
    }
}

pub struct Renderer {
    pub palette: Palette,
    pub glyphs: Glyphs,
}

impl Renderer {
    pub fn new(palette: Palette, glyphs: Glyphs) -> Self {
        Renderer { palette, glyphs }
    }

    /// Glyph and style for a single cell, cursor overlay included
    pub fn cell_glyph(&self, board: &Board, cell: &Cell, view: View) -> (GlyphStyle, String) {
        let p = &self.palette;
        let show = match view {
            View::Player => cell.is_revealed(),
            View::Debug => board.is_initialized(),
        };
        let (mut style, glyph) = if show {
            let (style, glyph) = if cell.mine {
                (GlyphStyle::fg(p.mine), self.glyphs.mine.to_string())
            } else if cell.adj > 0 {
                (GlyphStyle::fg(p.number), cell.adj.to_string())
            } else {
                (GlyphStyle::fg(p.empty), " ".to_string())
            };
            if view == View::Debug && cell.mine && cell.is_flagged() {
                (GlyphStyle::fg(p.flagged_mine), glyph)
            } else {
                (style, glyph)
            }
        } else {
            match cell.state {
                CellState::Flagged => (GlyphStyle::fg(p.flag), self.glyphs.flag.to_string()),
                _ => (GlyphStyle::fg(p.covered), self.glyphs.covered.to_string()),
            }
        };
        if cell.position == board.cursor() {
            style = style.on(p.cursor_bg);
        }
        (style, glyph)
    }

    /// Index rulers, then every row left to right
    pub fn draw_board<D: Display + ?Sized>(&self, board: &Board, out: &mut D, view: View) -> Result<()> {
        out.write_text(" ")?;
        for col in 0..board.width {
            out.write_text(&(col % 10).to_string())?;
        }
        out.end_line()?;
        for row in 0..board.height {
            out.write_text(&(row % 10).to_string())?;
            for col in 0..board.width {
                let (style, glyph) = self.cell_glyph(board, board.cell(Coord::new(col, row)), view);
                out.write_glyph(style, &glyph)?;
            }
            out.end_line()?;
        }
        Ok(())
    }

    /// Frame shown while playing
    pub fn draw_player<D: Display + ?Sized>(&self, board: &Board, lang: &Lang, out: &mut D) -> Result<()> {
        out.clear()?;
        self.draw_board(board, out, View::Player)?;
        out.end_line()?;
        out.write_text(&lang.status_mines(board.remaining_mines()))?;
        out.end_line()?;
        out.write_text(lang.assets.help_line)?;
        out.end_line()?;
        out.flush()
    }

    /// Outcome message followed by the fully uncovered board
    pub fn draw_final<D: Display + ?Sized>(
        &self,
        board: &Board,
        outcome: Outcome,
        lang: &Lang,
        out: &mut D,
    ) -> Result<()> {
        out.clear()?;
        match outcome {
            Outcome::Won => out.write_glyph(GlyphStyle::fg(self.palette.win), lang.assets.win_message)?,
            Outcome::Lost => out.write_glyph(GlyphStyle::fg(self.palette.loss), lang.assets.loss_message)?,
            Outcome::Quit => out.write_text(lang.assets.quit_message)?,
        }
        out.end_line()?;
        self.draw_board(board, out, View::Debug)?;
        out.flush()
    }
}
