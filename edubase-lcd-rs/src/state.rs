// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Mirror of the controller mode registers
//!
//! The controller cannot be read back, so the driver keeps a copy of the
//! last display control and entry mode flags it sent. Toggling a single flag
//! means updating the copy and sending it whole.

use crate::command::DISPLAY_CONTROL;
use crate::command::ENTRY_MODE_SET;

/// Mode flags last sent to the controller
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DisplayState {
    /// Display, cursor and blink flags
    display_control: u8,

    /// Increment and shift flags
    entry_mode: u8,
}

impl DisplayState {
    /// Create a state with all flags cleared
    #[must_use]
    pub const fn new() -> Self {
        Self {
            display_control: 0x00,
            entry_mode: 0x00,
        }
    }

    /// Get the display control flags
    #[must_use]
    pub const fn display_control(&self) -> u8 {
        self.display_control
    }

    /// Get the entry mode flags
    #[must_use]
    pub const fn entry_mode(&self) -> u8 {
        self.entry_mode
    }

    /// Set or clear a display control flag and return the command to send
    pub fn update_display_control(&mut self, flag: u8, enabled: bool) -> u8 {
        self.display_control = apply(self.display_control, flag, enabled);
        DISPLAY_CONTROL | self.display_control
    }

    /// Set or clear an entry mode flag and return the command to send
    pub fn update_entry_mode(&mut self, flag: u8, enabled: bool) -> u8 {
        self.entry_mode = apply(self.entry_mode, flag, enabled);
        ENTRY_MODE_SET | self.entry_mode
    }
}

/// Set or clear a flag in a mask
const fn apply(mask: u8, flag: u8, enabled: bool) -> u8 {
    if enabled {
        mask | flag
    } else {
        mask & !flag
    }
}
