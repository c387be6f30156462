// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Bounded formatting of numbers

use core::fmt::Arguments;
use core::fmt::Write;

use heapless::String;

/// Capacity of the formatting buffer, in bytes
pub const CAPACITY: usize = 32;

/// Text formatted into a fixed-capacity buffer
///
/// Formatting never fails: whatever does not fit in [`CAPACITY`] bytes is
/// dropped at a character boundary and the text is flagged as truncated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BoundedText {
    /// Formatted text
    text: String<CAPACITY>,

    /// Whether some output did not fit
    truncated: bool,
}

impl BoundedText {
    /// Format arguments into a new bounded text
    #[must_use]
    pub fn format(arguments: Arguments) -> Self {
        let mut text = Self::default();
        // `write_str` below never returns an error
        let _result = text.write_fmt(arguments);
        text
    }

    /// Format an integer in decimal
    #[must_use]
    pub fn integer(value: i32) -> Self {
        Self::format(format_args!("{value}"))
    }

    /// Format a floating point number with six decimal places
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::format(format_args!("{value:.6}"))
    }

    /// Get the formatted text
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Check whether the formatted text was truncated
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Write for BoundedText {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.truncated {
            return Ok(());
        }
        for character in s.chars() {
            if self.text.push(character).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}
