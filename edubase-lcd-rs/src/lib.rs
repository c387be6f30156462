// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Interface to the HD44780 16×2 character display of the `EduBase` board
//!
//! The display is driven over a write-only 4-bit parallel bus: four data
//! lines, a register select line and an enable line. Every byte is sent as
//! two nibbles, and the driver waits a fixed time after each transfer instead
//! of polling the busy flag.
//!
//! ```ignore
//! let lines = PinLines::new((d4, d5, d6, d7), rs, en);
//! let mut display = Display::new(lines, delay);
//! display.initialize()?;
//! display.set_cursor(0, 1)?;
//! display.print("Hello")?;
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "blocking")]
mod blocking;
#[cfg(feature = "blocking")]
pub use self::blocking::Display;

pub mod command;

mod config;
pub use self::config::Config;
pub use self::config::Font;
pub use self::config::LineCount;

#[cfg(feature = "blocking")]
mod error;
#[cfg(feature = "blocking")]
pub use self::error::Error;

pub mod glyph;
pub use self::glyph::Glyph;
pub use self::glyph::GlyphPattern;

#[cfg(feature = "blocking")]
mod lines;
#[cfg(feature = "blocking")]
pub use self::lines::ControlLines;
#[cfg(feature = "blocking")]
pub use self::lines::OutputPort;
#[cfg(feature = "blocking")]
pub use self::lines::PinLines;
#[cfg(feature = "blocking")]
pub use self::lines::PortLines;
#[cfg(feature = "blocking")]
pub use self::lines::RegisterSelect;
#[cfg(feature = "blocking")]
pub use self::lines::EDUBASE_DATA_SHIFT;

pub mod position;
pub use self::position::ddram_address;

mod state;
pub use self::state::DisplayState;

pub mod text;
pub use self::text::BoundedText;
