// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Display configuration

use crate::command::CONFIG_5X10_DOTS;
use crate::command::CONFIG_TWO_LINES;
use crate::command::FUNCTION_SET;

/// Number of display lines
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineCount {
    /// A single line
    One,

    /// Two lines
    #[default]
    Two,
}

/// Character font
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Font {
    /// 5×8 dots
    #[default]
    Dots5x8,

    /// 5×10 dots
    Dots5x10,
}

/// Display configuration
///
/// The default matches the 16×2 module on the `EduBase` board.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Number of display lines
    pub line_count: LineCount,

    /// Character font
    pub font: Font,
}

impl Config {
    /// Set the number of display lines
    #[must_use]
    pub const fn with_line_count(mut self, line_count: LineCount) -> Self {
        self.line_count = line_count;
        self
    }

    /// Set the character font
    #[must_use]
    pub const fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Function set command selecting 4-bit bus, line count and font
    #[must_use]
    pub const fn function_set_command(&self) -> u8 {
        let lines = match self.line_count {
            LineCount::One => 0x00,
            LineCount::Two => CONFIG_TWO_LINES,
        };
        let font = match self.font {
            Font::Dots5x8 => 0x00,
            Font::Dots5x10 => CONFIG_5X10_DOTS,
        };
        FUNCTION_SET | lines | font
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_two_lines_small_font() {
        assert_eq!(Config::default().function_set_command(), 0x28);
    }

    #[test]
    fn single_line_large_font() {
        let config = Config::default()
            .with_line_count(LineCount::One)
            .with_font(Font::Dots5x10);
        assert_eq!(config.function_set_command(), 0x24);
    }
}
