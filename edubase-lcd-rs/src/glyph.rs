// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Custom glyphs stored in the character generator RAM
//!
//! The controller has room for eight 5×8 glyphs. Each glyph is eight rows of
//! five pixels, the pixels being the five least significant bits of each row.
//! Once uploaded, glyph `n` is displayed by printing character code `n`.

use crate::command::SET_CGRAM_ADDRESS;

/// Pixel rows of a 5×8 glyph
pub type GlyphPattern = [u8; 8];

/// Number of CGRAM slots
pub const SLOTS: u8 = 8;

/// Compute the set CGRAM address command for a glyph slot
///
/// Only the three least significant bits of `slot` are used, larger indices
/// alias onto slots 0 to 7.
#[must_use]
pub const fn cgram_address_command(slot: u8) -> u8 {
    SET_CGRAM_ADDRESS | ((slot & 0x07) << 3)
}

/// An arrow pointing up
pub const UP_ARROW: GlyphPattern = [0x00, 0x04, 0x0e, 0x15, 0x04, 0x04, 0x04, 0x04];

/// An arrow pointing down
pub const DOWN_ARROW: GlyphPattern = [0x04, 0x04, 0x04, 0x04, 0x04, 0x15, 0x0e, 0x04];

/// An arrow pointing left
pub const LEFT_ARROW: GlyphPattern = [0x00, 0x04, 0x08, 0x1f, 0x08, 0x04, 0x00, 0x00];

/// An arrow pointing right
pub const RIGHT_ARROW: GlyphPattern = [0x00, 0x04, 0x02, 0x1f, 0x02, 0x04, 0x00, 0x00];

/// A heart
pub const HEART: GlyphPattern = [0x00, 0x00, 0x0a, 0x1f, 0x1f, 0x0e, 0x04, 0x00];

/// A predefined glyph with its conventional slot
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Glyph {
    /// Arrow pointing up, slot 0
    UpArrow,

    /// Arrow pointing down, slot 1
    DownArrow,

    /// Arrow pointing left, slot 2
    LeftArrow,

    /// Arrow pointing right, slot 3
    RightArrow,

    /// Heart, slot 4
    Heart,
}

impl Glyph {
    /// All predefined glyphs, in slot order
    pub const ALL: [Self; 5] = [
        Self::UpArrow,
        Self::DownArrow,
        Self::LeftArrow,
        Self::RightArrow,
        Self::Heart,
    ];

    /// Slot the glyph is uploaded to
    #[must_use]
    pub const fn slot(self) -> u8 {
        match self {
            Self::UpArrow => 0,
            Self::DownArrow => 1,
            Self::LeftArrow => 2,
            Self::RightArrow => 3,
            Self::Heart => 4,
        }
    }

    /// Pixel rows of the glyph
    #[must_use]
    pub const fn pattern(self) -> &'static GlyphPattern {
        match self {
            Self::UpArrow => &UP_ARROW,
            Self::DownArrow => &DOWN_ARROW,
            Self::LeftArrow => &LEFT_ARROW,
            Self::RightArrow => &RIGHT_ARROW,
            Self::Heart => &HEART,
        }
    }

    /// Character code that displays the glyph once uploaded
    #[must_use]
    pub const fn character(self) -> char {
        self.slot() as char
    }
}
