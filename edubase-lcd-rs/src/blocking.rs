// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Blocking display

use log::debug;
use log::trace;
use log::warn;

use embedded_hal::delay::DelayNs;

use crate::command;
use crate::glyph::cgram_address_command;
use crate::glyph::Glyph;
use crate::glyph::GlyphPattern;
use crate::lines::ControlLines;
use crate::lines::RegisterSelect;
use crate::position::ddram_address;
use crate::text::BoundedText;
use crate::Config;
use crate::DisplayState;
use crate::Error;

/// Duration of each half of the enable pulse, in microseconds
///
/// The datasheet requires at least 450 ns (page 49).
const ENABLE_PULSE_US: u32 = 1;

/// Settle time after every nibble, in microseconds
const NIBBLE_SETTLE_US: u32 = 1000;

/// Time for the controller to power up, in milliseconds
const POWER_ON_MS: u32 = 50;

/// Function set for an 8-bit bus, sent as a single nibble to wake up the
/// controller
const WAKE_UP: u8 = command::FUNCTION_SET | command::CONFIG_EIGHT_BIT_MODE;

/// Delay after each of the wake-up nibbles, in microseconds
const WAKE_UP_DELAYS_US: [u32; 3] = [4500, 4500, 150];

/// Function set for a 4-bit bus, sent as a single nibble
const FOUR_BIT_MODE: u8 = command::FUNCTION_SET;

/// A HD44780 character display on a 4-bit parallel bus
///
/// The display is write-only: every operation drives the bus and then waits
/// long enough for the controller to process it, there is no busy flag
/// polling.
pub struct Display<LINES: ControlLines, DELAY: DelayNs> {
    /// Bus lines
    lines: LINES,

    /// Delay
    delay: DELAY,

    /// Configuration applied during initialization
    config: Config,

    /// Mode flags last sent to the controller
    state: DisplayState,
}

impl<LINES, DELAY> Display<LINES, DELAY>
where
    LINES: ControlLines,
    DELAY: DelayNs,
{
    /// Create a new display with the default configuration
    #[must_use]
    pub fn new(lines: LINES, delay: DELAY) -> Self {
        Self::with_config(lines, delay, Config::default())
    }

    /// Create a new display
    #[must_use]
    pub fn with_config(lines: LINES, delay: DELAY, config: Config) -> Self {
        Self {
            lines,
            delay,
            config,
            state: DisplayState::new(),
        }
    }

    /// Get the mode flags last sent to the controller
    #[must_use]
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Initialize display
    ///
    /// Runs the initialization by instruction sequence of pages 45-46 of the
    /// datasheet, which works whether the controller powered up in 8-bit or
    /// 4-bit mode. The display ends up on, with the cursor at home position,
    /// empty, and with cursor and blink off.
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn initialize(&mut self) -> Result<(), Error> {
        debug!("Initialize display");

        trace!("Wait {POWER_ON_MS}ms for power on");
        self.delay.delay_ms(POWER_ON_MS);

        for wait in WAKE_UP_DELAYS_US {
            self.write_nibble(WAKE_UP, RegisterSelect::Command)?;
            self.delay.delay_us(wait);
        }

        trace!("Select 4-bit bus");
        self.write_nibble(FOUR_BIT_MODE, RegisterSelect::Command)?;

        self.send_command(self.config.function_set_command())?;
        self.enable_display()?;
        self.return_home()?;
        self.clear_display()?;
        self.disable_cursor()?;
        self.disable_cursor_blink()?;

        debug!("Initialize display / Done");

        Ok(())
    }

    /// Clear display and move cursor to home position
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn clear_display(&mut self) -> Result<(), Error> {
        debug!("Clear display");
        self.send_command(command::CLEAR_DISPLAY)
    }

    /// Move cursor to home position and undo any display shift
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn return_home(&mut self) -> Result<(), Error> {
        self.send_command(command::RETURN_HOME)
    }

    /// Move cursor to a column and row
    ///
    /// Positions outside the 16×2 screen are ignored and nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), Error> {
        if let Some(address) = ddram_address(column, row) {
            self.send_command(command::SET_DDRAM_ADDRESS | address)
        } else {
            debug!("Ignore cursor position ({column}, {row}) outside of screen");
            Ok(())
        }
    }

    /// Turn display on
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn enable_display(&mut self) -> Result<(), Error> {
        self.update_display_control(command::DISPLAY_ON, true)
    }

    /// Turn display off, keeping its content
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn disable_display(&mut self) -> Result<(), Error> {
        self.update_display_control(command::DISPLAY_ON, false)
    }

    /// Show cursor
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn enable_cursor(&mut self) -> Result<(), Error> {
        self.update_display_control(command::CURSOR_ON, true)
    }

    /// Hide cursor
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn disable_cursor(&mut self) -> Result<(), Error> {
        self.update_display_control(command::CURSOR_ON, false)
    }

    /// Blink character at cursor position
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn enable_cursor_blink(&mut self) -> Result<(), Error> {
        self.update_display_control(command::CURSOR_BLINK_ON, true)
    }

    /// Stop blinking character at cursor position
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn disable_cursor_blink(&mut self) -> Result<(), Error> {
        self.update_display_control(command::CURSOR_BLINK_ON, false)
    }

    /// Shift the whole display content one position to the left
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn scroll_display_left(&mut self) -> Result<(), Error> {
        self.send_command(command::CURSOR_OR_DISPLAY_SHIFT | command::DISPLAY_MOVE)
    }

    /// Shift the whole display content one position to the right
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn scroll_display_right(&mut self) -> Result<(), Error> {
        self.send_command(
            command::CURSOR_OR_DISPLAY_SHIFT | command::DISPLAY_MOVE | command::MOVE_RIGHT,
        )
    }

    /// Move cursor one position to the left without writing
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn move_cursor_left(&mut self) -> Result<(), Error> {
        self.send_command(command::CURSOR_OR_DISPLAY_SHIFT)
    }

    /// Move cursor one position to the right without writing
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn move_cursor_right(&mut self) -> Result<(), Error> {
        self.send_command(command::CURSOR_OR_DISPLAY_SHIFT | command::MOVE_RIGHT)
    }

    /// Write text from left to right
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn left_to_right(&mut self) -> Result<(), Error> {
        self.update_entry_mode(command::ENTRY_SHIFT_INCREMENT, true)
    }

    /// Write text from right to left
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn right_to_left(&mut self) -> Result<(), Error> {
        self.update_entry_mode(command::ENTRY_SHIFT_INCREMENT, false)
    }

    /// Shift the display on every write, keeping the cursor in place
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn enable_autoscroll(&mut self) -> Result<(), Error> {
        self.update_entry_mode(command::ENTRY_SHIFT_ENABLE, true)
    }

    /// Move the cursor on every write, keeping the display in place
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn disable_autoscroll(&mut self) -> Result<(), Error> {
        self.update_entry_mode(command::ENTRY_SHIFT_ENABLE, false)
    }

    /// Store a custom glyph in one of the eight CGRAM slots
    ///
    /// Only the three least significant bits of `slot` are used. The
    /// controller is left in CGRAM addressing mode, call
    /// [`set_cursor`](Self::set_cursor), [`return_home`](Self::return_home)
    /// or [`clear_display`](Self::clear_display) before printing text again.
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn create_custom_character(
        &mut self,
        slot: u8,
        pattern: &GlyphPattern,
    ) -> Result<(), Error> {
        debug!("Store custom character in slot {}", slot & 0x07);
        self.send_command(cgram_address_command(slot))?;
        for row in pattern {
            self.send_data(*row)?;
        }
        Ok(())
    }

    /// Store a predefined glyph in its slot
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn upload_glyph(&mut self, glyph: Glyph) -> Result<(), Error> {
        self.create_custom_character(glyph.slot(), glyph.pattern())
    }

    /// Store all predefined glyphs
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn upload_default_glyphs(&mut self) -> Result<(), Error> {
        for glyph in Glyph::ALL {
            self.upload_glyph(glyph)?;
        }
        Ok(())
    }

    /// Print text at cursor position
    ///
    /// Every byte is sent as a character code, so only ASCII text and the
    /// custom glyph codes 0 to 7 display as expected.
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn print(&mut self, text: &str) -> Result<(), Error> {
        trace!("Print {} bytes", text.len());
        for byte in text.bytes() {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Print an integer in decimal at cursor position
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn print_integer(&mut self, value: i32) -> Result<(), Error> {
        self.print_bounded(&BoundedText::integer(value))
    }

    /// Print a floating point number with six decimal places at cursor
    /// position
    ///
    /// Numbers longer than the formatting buffer are truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn print_float(&mut self, value: f64) -> Result<(), Error> {
        self.print_bounded(&BoundedText::float(value))
    }

    /// Release display and return inner hardware
    pub fn release(self) -> (LINES, DELAY) {
        debug!("Release display");
        (self.lines, self.delay)
    }

    /// Send a command byte and wait for the controller to execute it
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn send_command(&mut self, command: u8) -> Result<(), Error> {
        trace!("Send command {command:#04x}");
        self.send_byte(command, RegisterSelect::Command)?;
        self.delay.delay_us(command::execution_time_us(command));
        Ok(())
    }

    /// Send a data byte to the current DDRAM or CGRAM address
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    pub fn send_data(&mut self, data: u8) -> Result<(), Error> {
        trace!("Send data {data:#04x}");
        self.send_byte(data, RegisterSelect::Data)
    }

    /// Print formatted text, reporting truncation
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    fn print_bounded(&mut self, text: &BoundedText) -> Result<(), Error> {
        if text.is_truncated() {
            warn!("Number does not fit in formatting buffer, printing {}", text.as_str());
        }
        self.print(text.as_str())
    }

    /// Update a display control flag and send the whole mask
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    fn update_display_control(&mut self, flag: u8, enabled: bool) -> Result<(), Error> {
        let command = self.state.update_display_control(flag, enabled);
        self.send_command(command)
    }

    /// Update an entry mode flag and send the whole mask
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    fn update_entry_mode(&mut self, flag: u8, enabled: bool) -> Result<(), Error> {
        let command = self.state.update_entry_mode(flag, enabled);
        self.send_command(command)
    }

    /// Send a byte as two nibbles, most significant first
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    fn send_byte(&mut self, byte: u8, register: RegisterSelect) -> Result<(), Error> {
        self.write_nibble(byte & 0xf0, register)?;
        self.write_nibble(byte << 4, register)
    }

    /// Transfer the upper nibble of `value` to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if setting any line fails.
    fn write_nibble(&mut self, value: u8, register: RegisterSelect) -> Result<(), Error> {
        trace!("Write nibble {:#03x} to {register:?} register", value >> 4);
        self.lines.set_data(value >> 4)?;
        self.lines.set_register_select(register)?;

        self.pulse_enable()?;

        self.lines.clear_data()?;
        self.delay.delay_us(NIBBLE_SETTLE_US);

        Ok(())
    }

    /// Strobe the enable line so the controller latches the bus
    ///
    /// # Errors
    ///
    /// Returns an error if setting the enable line fails.
    fn pulse_enable(&mut self) -> Result<(), Error> {
        self.lines.set_enable(false)?;
        self.delay.delay_us(ENABLE_PULSE_US);

        self.lines.set_enable(true)?;
        self.delay.delay_us(ENABLE_PULSE_US);

        self.lines.set_enable(false)
    }
}

impl<LINES, DELAY> core::fmt::Write for Display<LINES, DELAY>
where
    LINES: ControlLines,
    DELAY: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print(s).map_err(|_error| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::cell::RefCell;
    use core::fmt::Write as _;

    use proptest::prelude::*;

    /// Something that happened on the bus or the clock
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Event {
        /// Nibble presented on the data lines
        Data(u8),

        /// Data lines cleared
        ClearData,

        /// Register select driven
        Select(RegisterSelect),

        /// Enable driven
        Enable(bool),

        /// Delay requested, in microseconds
        Delay(u32),
    }

    /// Log of events shared by the lines and the delay
    type Log = RefCell<Vec<Event>>;

    /// Control lines recording every change
    struct RecordingLines<'log> {
        /// Log
        log: &'log Log,
    }

    impl ControlLines for RecordingLines<'_> {
        fn set_data(&mut self, nibble: u8) -> Result<(), Error> {
            self.log.borrow_mut().push(Event::Data(nibble));
            Ok(())
        }

        fn clear_data(&mut self) -> Result<(), Error> {
            self.log.borrow_mut().push(Event::ClearData);
            Ok(())
        }

        fn set_register_select(&mut self, register: RegisterSelect) -> Result<(), Error> {
            self.log.borrow_mut().push(Event::Select(register));
            Ok(())
        }

        fn set_enable(&mut self, high: bool) -> Result<(), Error> {
            self.log.borrow_mut().push(Event::Enable(high));
            Ok(())
        }
    }

    /// Delay recording requested durations instead of waiting
    struct RecordingDelay<'log> {
        /// Log
        log: &'log Log,
    }

    impl DelayNs for RecordingDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns / 1000));
        }

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::Delay(us));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Delay(ms * 1000));
        }
    }

    fn display(log: &Log) -> Display<RecordingLines<'_>, RecordingDelay<'_>> {
        Display::new(RecordingLines { log }, RecordingDelay { log })
    }

    fn take(log: &Log) -> Vec<Event> {
        log.borrow_mut().drain(..).collect()
    }

    /// Events of a single nibble transfer
    fn nibble_events(value: u8, register: RegisterSelect) -> Vec<Event> {
        vec![
            Event::Data(value >> 4),
            Event::Select(register),
            Event::Enable(false),
            Event::Delay(1),
            Event::Enable(true),
            Event::Delay(1),
            Event::Enable(false),
            Event::ClearData,
            Event::Delay(1000),
        ]
    }

    fn command_events(value: u8, execution_us: u32) -> Vec<Event> {
        let mut events = nibble_events(value & 0xf0, RegisterSelect::Command);
        events.extend(nibble_events(value << 4, RegisterSelect::Command));
        events.push(Event::Delay(execution_us));
        events
    }

    fn data_events(value: u8) -> Vec<Event> {
        let mut events = nibble_events(value & 0xf0, RegisterSelect::Data);
        events.extend(nibble_events(value << 4, RegisterSelect::Data));
        events
    }

    /// Decode bytes latched by the controller on enable rising edges
    fn latched_bytes(events: &[Event]) -> Vec<(u8, RegisterSelect)> {
        let mut nibbles = Vec::new();
        let mut bus = 0;
        let mut register = RegisterSelect::Command;
        for event in events {
            match *event {
                Event::Data(value) => bus = value,
                Event::ClearData => bus = 0,
                Event::Select(selected) => register = selected,
                Event::Enable(true) => nibbles.push((bus, register)),
                Event::Enable(false) | Event::Delay(_) => {}
            }
        }
        nibbles
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0].1, pair[1].1, "Nibbles of a byte must share register");
                ((pair[0].0 << 4) | pair[1].0, pair[0].1)
            })
            .collect()
    }

    fn commands(events: &[Event]) -> Vec<u8> {
        latched_bytes(events)
            .into_iter()
            .filter(|&(_, register)| register == RegisterSelect::Command)
            .map(|(byte, _)| byte)
            .collect()
    }

    fn data_bytes(events: &[Event]) -> Vec<u8> {
        latched_bytes(events)
            .into_iter()
            .filter(|&(_, register)| register == RegisterSelect::Data)
            .map(|(byte, _)| byte)
            .collect()
    }

    #[test]
    fn initialize_from_power_on() {
        let log = Log::default();
        let mut display = display(&log);
        display.initialize().unwrap();

        let mut expected = vec![Event::Delay(50_000)];
        expected.extend(nibble_events(0x30, RegisterSelect::Command));
        expected.push(Event::Delay(4500));
        expected.extend(nibble_events(0x30, RegisterSelect::Command));
        expected.push(Event::Delay(4500));
        expected.extend(nibble_events(0x30, RegisterSelect::Command));
        expected.push(Event::Delay(150));
        expected.extend(nibble_events(0x20, RegisterSelect::Command));
        expected.extend(command_events(0x28, 37));
        expected.extend(command_events(0x0c, 37));
        expected.extend(command_events(0x02, 1520));
        expected.extend(command_events(0x01, 1520));
        expected.extend(command_events(0x0c, 37));
        expected.extend(command_events(0x0c, 37));

        assert_eq!(take(&log), expected);
        assert_eq!(display.state().display_control(), 0x04);
        assert_eq!(display.state().entry_mode(), 0x00);
    }

    #[test]
    fn initialize_applies_configuration() {
        let log = Log::default();
        let display = display(&log);
        let (lines, delay) = display.release();
        let config = Config::default().with_line_count(crate::LineCount::One);
        let mut display = Display::with_config(lines, delay, config);
        display.initialize().unwrap();

        // The four wake-up nibbles pair up as 0x33 and 0x32
        assert_eq!(
            commands(&take(&log)),
            [0x33, 0x32, 0x20, 0x0c, 0x02, 0x01, 0x0c, 0x0c]
        );
    }

    #[test]
    fn clear_and_home_wait_long() {
        let log = Log::default();
        let mut display = display(&log);

        display.clear_display().unwrap();
        assert_eq!(take(&log), command_events(0x01, 1520));

        display.return_home().unwrap();
        assert_eq!(take(&log), command_events(0x02, 1520));
    }

    #[test]
    fn other_commands_wait_short() {
        let log = Log::default();
        let mut display = display(&log);

        display.send_command(0x03).unwrap();
        assert_eq!(take(&log), command_events(0x03, 37));

        display.scroll_display_left().unwrap();
        assert_eq!(take(&log), command_events(0x18, 37));
    }

    #[test]
    fn data_does_not_wait_for_execution() {
        let log = Log::default();
        let mut display = display(&log);
        display.send_data(b'A').unwrap();
        assert_eq!(take(&log), data_events(0x41));
    }

    proptest! {
        #[test]
        fn bytes_are_sent_as_two_nibbles(value in any::<u8>(), is_data in any::<bool>()) {
            let log = Log::default();
            let mut display = display(&log);
            if is_data {
                display.send_data(value).unwrap();
                prop_assert_eq!(take(&log), data_events(value));
            } else {
                display.send_command(value).unwrap();
                let expected = command_events(value, command::execution_time_us(value));
                prop_assert_eq!(take(&log), expected);
            }
        }

        #[test]
        fn cursor_outside_screen_sends_nothing(column in 16..=u8::MAX, row in 0..=1_u8) {
            let log = Log::default();
            let mut display = display(&log);
            display.set_cursor(column, row).unwrap();
            prop_assert!(take(&log).is_empty());
        }
    }

    #[test]
    fn cursor_positions() {
        let log = Log::default();
        let mut display = display(&log);

        display.set_cursor(0, 0).unwrap();
        display.set_cursor(15, 0).unwrap();
        display.set_cursor(0, 1).unwrap();
        display.set_cursor(15, 1).unwrap();

        assert_eq!(commands(&take(&log)), [0x80, 0x8f, 0xc0, 0xcf]);
    }

    #[test]
    fn cursor_on_missing_row_sends_nothing() {
        let log = Log::default();
        let mut display = display(&log);
        display.set_cursor(3, 2).unwrap();
        display.set_cursor(3, 255).unwrap();
        assert!(take(&log).is_empty());
    }

    #[test]
    fn clearing_twice_keeps_modes() {
        let log = Log::default();
        let mut display = display(&log);
        display.enable_display().unwrap();
        display.left_to_right().unwrap();
        take(&log);
        let before = display.state();

        display.clear_display().unwrap();
        let first = take(&log);
        display.clear_display().unwrap();
        let second = take(&log);

        assert_eq!(first, second);
        assert_eq!(commands(&first), [0x01]);
        assert_eq!(display.state(), before);
    }

    #[test]
    fn cursor_and_blink_accumulate() {
        let log = Log::default();
        let mut display = display(&log);

        display.enable_cursor().unwrap();
        assert_eq!(commands(&take(&log)), [0x0a]);

        display.enable_cursor_blink().unwrap();
        assert_eq!(commands(&take(&log)), [0x0b]);

        display.disable_cursor().unwrap();
        assert_eq!(commands(&take(&log)), [0x09]);

        display.enable_display().unwrap();
        display.disable_cursor_blink().unwrap();
        assert_eq!(commands(&take(&log)), [0x0d, 0x0c]);

        display.disable_display().unwrap();
        assert_eq!(commands(&take(&log)), [0x08]);
    }

    #[test]
    fn entry_mode_toggles() {
        let log = Log::default();
        let mut display = display(&log);

        display.left_to_right().unwrap();
        display.enable_autoscroll().unwrap();
        display.right_to_left().unwrap();
        display.disable_autoscroll().unwrap();

        assert_eq!(commands(&take(&log)), [0x06, 0x07, 0x05, 0x04]);
        assert_eq!(display.state().display_control(), 0x00);
    }

    #[test]
    fn shifts_do_not_touch_modes() {
        let log = Log::default();
        let mut display = display(&log);

        display.scroll_display_left().unwrap();
        display.scroll_display_right().unwrap();
        display.move_cursor_left().unwrap();
        display.move_cursor_right().unwrap();

        assert_eq!(commands(&take(&log)), [0x18, 0x1c, 0x10, 0x14]);
        assert_eq!(display.state(), DisplayState::new());
    }

    #[test]
    fn custom_glyph_round_trip() {
        let log = Log::default();
        let mut display = display(&log);
        let pattern = [0x1f, 0x11, 0x0a, 0x04, 0x04, 0x0a, 0x11, 0x1f];

        display.create_custom_character(11, &pattern).unwrap();
        let events = take(&log);
        assert_eq!(commands(&events), [0x58]);
        assert_eq!(latched_bytes(&events)[0], (0x58, RegisterSelect::Command));

        let captured: [u8; 8] = data_bytes(&events).try_into().unwrap();
        assert_eq!(captured, pattern);

        display.create_custom_character(3, &captured).unwrap();
        assert_eq!(take(&log), events);
    }

    #[test]
    fn default_glyphs_go_to_their_slots() {
        let log = Log::default();
        let mut display = display(&log);
        display.upload_default_glyphs().unwrap();

        let events = take(&log);
        assert_eq!(commands(&events), [0x40, 0x48, 0x50, 0x58, 0x60]);

        let rows = data_bytes(&events);
        assert_eq!(rows.len(), 40);
        assert_eq!(rows[32..], crate::glyph::HEART);
    }

    #[test]
    fn print_sends_each_byte() {
        let log = Log::default();
        let mut display = display(&log);
        display.print("Hi!").unwrap();
        assert_eq!(data_bytes(&take(&log)), b"Hi!");
    }

    #[test]
    fn print_numbers() {
        let log = Log::default();
        let mut display = display(&log);

        display.print_integer(-42).unwrap();
        assert_eq!(data_bytes(&take(&log)), b"-42");

        display.print_float(3.3).unwrap();
        assert_eq!(data_bytes(&take(&log)), b"3.300000");
    }

    #[test]
    fn oversized_float_is_truncated() {
        let log = Log::default();
        let mut display = display(&log);
        display.print_float(1.0e300).unwrap();
        assert_eq!(data_bytes(&take(&log)).len(), crate::text::CAPACITY);
    }

    #[test]
    fn data_byte_on_physical_pins() {
        use embedded_hal_mock::eh1::delay::NoopDelay;
        use embedded_hal_mock::eh1::digital::Mock as PinMock;
        use embedded_hal_mock::eh1::digital::State::High;
        use embedded_hal_mock::eh1::digital::State::Low;
        use embedded_hal_mock::eh1::digital::Transaction as PinTransaction;

        use crate::PinLines;

        fn pin(states: &[embedded_hal_mock::eh1::digital::State]) -> PinMock {
            let transactions: Vec<PinTransaction> =
                states.iter().map(|state| PinTransaction::set(*state)).collect();
            PinMock::new(&transactions)
        }

        // 'A' is 0x41: nibble 0b0100 then 0b0001, each followed by clearing
        let d4 = pin(&[Low, Low, High, Low]);
        let d5 = pin(&[Low, Low, Low, Low]);
        let d6 = pin(&[High, Low, Low, Low]);
        let d7 = pin(&[Low, Low, Low, Low]);
        let rs = pin(&[High, High]);
        let en = pin(&[Low, High, Low, Low, High, Low]);

        let lines = PinLines::new((d4, d5, d6, d7), rs, en);
        let mut display = Display::new(lines, NoopDelay::new());
        display.send_data(b'A').unwrap();

        let (lines, _delay) = display.release();
        let ((mut d4, mut d5, mut d6, mut d7), mut rs, mut en) = lines.release();
        d4.done();
        d5.done();
        d6.done();
        d7.done();
        rs.done();
        en.done();
    }

    #[test]
    fn formatted_write() {
        let log = Log::default();
        let mut display = display(&log);
        write!(display, "{:>5}|", 12).unwrap();
        assert_eq!(data_bytes(&take(&log)), b"   12|");
    }
}
