// Copyright Claudio Mattera 2024.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files License-MIT.txt and License-Apache-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Commands
//!
//! Instruction set of the HD44780 controller, see pages 24-25 of the
//! datasheet.

/// Command for clearing display
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Command for returning cursor to home position
pub const RETURN_HOME: u8 = 0x02;

/// Command for setting entry mode
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Command for display on/off control
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Command for shifting cursor or display
pub const CURSOR_OR_DISPLAY_SHIFT: u8 = 0x10;

/// Command for setting bus width, line count and font
pub const FUNCTION_SET: u8 = 0x20;

/// Command for setting CGRAM address
pub const SET_CGRAM_ADDRESS: u8 = 0x40;

/// Command for setting DDRAM address
pub const SET_DDRAM_ADDRESS: u8 = 0x80;

/// Entry mode flag for shifting the display on every write
pub const ENTRY_SHIFT_ENABLE: u8 = 0x01;

/// Entry mode flag for incrementing the address on every write
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x02;

/// Display control flag for cursor blink
pub const CURSOR_BLINK_ON: u8 = 0x01;

/// Display control flag for cursor
pub const CURSOR_ON: u8 = 0x02;

/// Display control flag for display
pub const DISPLAY_ON: u8 = 0x04;

/// Shift flag for moving the display instead of the cursor
pub const DISPLAY_MOVE: u8 = 0x08;

/// Shift flag for moving right instead of left
pub const MOVE_RIGHT: u8 = 0x04;

/// Function set flag for 5×10 dots font
pub const CONFIG_5X10_DOTS: u8 = 0x04;

/// Function set flag for two display lines
pub const CONFIG_TWO_LINES: u8 = 0x08;

/// Function set flag for 8-bit bus
pub const CONFIG_EIGHT_BIT_MODE: u8 = 0x10;

/// Commands below this value need the long execution time
const LONG_EXECUTION_THRESHOLD: u8 = 0x03;

/// Execution time of clear display and return home, in microseconds
pub const LONG_EXECUTION_US: u32 = 1520;

/// Execution time of every other command, in microseconds
pub const SHORT_EXECUTION_US: u32 = 37;

/// Return how long the controller needs to execute a command, in microseconds
#[must_use]
pub const fn execution_time_us(command: u8) -> u32 {
    if command < LONG_EXECUTION_THRESHOLD {
        LONG_EXECUTION_US
    } else {
        SHORT_EXECUTION_US
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_and_home_need_long_execution() {
        assert_eq!(execution_time_us(CLEAR_DISPLAY), LONG_EXECUTION_US);
        assert_eq!(execution_time_us(RETURN_HOME), LONG_EXECUTION_US);
    }

    #[test]
    fn other_commands_need_short_execution() {
        assert_eq!(execution_time_us(0x03), SHORT_EXECUTION_US);
        assert_eq!(execution_time_us(ENTRY_MODE_SET), SHORT_EXECUTION_US);
        assert_eq!(
            execution_time_us(DISPLAY_CONTROL | DISPLAY_ON),
            SHORT_EXECUTION_US
        );
        assert_eq!(execution_time_us(SET_DDRAM_ADDRESS | 0x45), SHORT_EXECUTION_US);
    }

    #[test]
    fn scroll_commands_match_datasheet() {
        assert_eq!(CURSOR_OR_DISPLAY_SHIFT | DISPLAY_MOVE, 0x18);
        assert_eq!(CURSOR_OR_DISPLAY_SHIFT | DISPLAY_MOVE | MOVE_RIGHT, 0x1c);
        assert_eq!(FUNCTION_SET | CONFIG_TWO_LINES, 0x28);
    }
}
