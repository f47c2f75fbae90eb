use crossterm::style::Color;
use term_color_support::ColorSupport;

/// How many colors the attached terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Ansi256,
    Basic,
}

impl ColorDepth {
    /// Detect terminal color support on stdout
    pub fn detect() -> Self {
        let support = ColorSupport::stdout();
        if support.has_16m {
            ColorDepth::TrueColor
        } else if support.has_256 {
            ColorDepth::Ansi256
        } else {
            ColorDepth::Basic
        }
    }
}

/// Extends crossterm's Color with a depth-aware variant of the game's pure RGB palette.
pub trait DepthMatch {
    fn fit(self, depth: ColorDepth) -> Color;
}

impl DepthMatch for Color {
    fn fit(self, depth: ColorDepth) -> Color {
        // Format: Some(((R, G, B), ANSI_256_Index))
        let mapping = match self {
            Color::Red => Some(((255, 0, 0), 196)),
            Color::Blue => Some(((0, 0, 255), 21)),
            Color::Green => Some(((0, 255, 0), 46)),
            Color::White => Some(((255, 255, 255), 231)),
            Color::Magenta => Some(((255, 0, 255), 201)),
            _ => None,
        };

        match (mapping, depth) {
            (Some(((r, g, b), _)), ColorDepth::TrueColor) => Color::Rgb { r, g, b },
            (Some((_, index256)), ColorDepth::Ansi256) => Color::AnsiValue(index256),
            _ => self,
        }
    }
}

/// Colors used by the board renderer and end-of-game messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mine: Color,
    pub number: Color,
    pub empty: Color,
    pub flag: Color,
    pub covered: Color,
    pub cursor_bg: Color,
    pub flagged_mine: Color, // Debug view only
    pub win: Color,
    pub loss: Color,
}

impl Palette {
    pub fn new(depth: ColorDepth) -> Self {
        Palette {
            mine: Color::Red.fit(depth),
            number: Color::Blue.fit(depth),
            empty: Color::White.fit(depth),
            flag: Color::Red.fit(depth),
            covered: Color::White.fit(depth),
            cursor_bg: Color::Green.fit(depth),
            flagged_mine: Color::Magenta.fit(depth),
            win: Color::Green.fit(depth),
            loss: Color::Red.fit(depth),
        }
    }

    pub fn detect() -> Self {
        Palette::new(ColorDepth::detect())
    }
}
