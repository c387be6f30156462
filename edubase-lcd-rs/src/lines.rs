// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Logical control lines of a 4-bit parallel display bus
//!
//! The display driver only talks in terms of the named lines of the bus: a
//! data nibble, the enable strobe and the register select. How those lines
//! map onto the pins of a particular microcontroller is up to the adapters in
//! this module.

use log::trace;

use embedded_hal::digital::OutputPin;

use crate::Error;

/// Target register of a transfer, driven on the register select line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegisterSelect {
    /// Instruction register (register select low)
    Command,

    /// Data register (register select high)
    Data,
}

/// Lines of a 4-bit parallel display bus
pub trait ControlLines {
    /// Present a nibble on the four data lines
    ///
    /// Only the four least significant bits of `nibble` are used, bit 0 is
    /// driven on D4 and bit 3 on D7.
    ///
    /// # Errors
    ///
    /// Returns an error if setting any pin fails.
    fn set_data(&mut self, nibble: u8) -> Result<(), Error>;

    /// Drive all four data lines low
    ///
    /// # Errors
    ///
    /// Returns an error if setting any pin fails.
    fn clear_data(&mut self) -> Result<(), Error>;

    /// Drive the register select line
    ///
    /// # Errors
    ///
    /// Returns an error if setting the pin fails.
    fn set_register_select(&mut self, register: RegisterSelect) -> Result<(), Error>;

    /// Drive the enable line
    ///
    /// # Errors
    ///
    /// Returns an error if setting the pin fails.
    fn set_enable(&mut self, high: bool) -> Result<(), Error>;
}

/// Set a pin high or low
///
/// # Errors
///
/// Returns an error if setting the pin fails.
fn drive<PIN: OutputPin>(pin: &mut PIN, high: bool) -> Result<(), Error> {
    if high {
        pin.set_high().map_err(Error::from_digital)
    } else {
        pin.set_low().map_err(Error::from_digital)
    }
}

/// Control lines wired to six independent output pins
pub struct PinLines<D4, D5, D6, D7, RS, EN> {
    /// Data pin 4
    d4: D4,

    /// Data pin 5
    d5: D5,

    /// Data pin 6
    d6: D6,

    /// Data pin 7
    d7: D7,

    /// Register select pin
    rs: RS,

    /// Enable pin
    en: EN,
}

impl<D4, D5, D6, D7, RS, EN> PinLines<D4, D5, D6, D7, RS, EN>
where
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    RS: OutputPin,
    EN: OutputPin,
{
    /// Create new control lines
    #[must_use]
    pub fn new(data: (D4, D5, D6, D7), rs: RS, en: EN) -> Self {
        let (d4, d5, d6, d7) = data;
        Self {
            d4,
            d5,
            d6,
            d7,
            rs,
            en,
        }
    }

    /// Release the lines and return inner pins
    pub fn release(self) -> ((D4, D5, D6, D7), RS, EN) {
        ((self.d4, self.d5, self.d6, self.d7), self.rs, self.en)
    }
}

impl<D4, D5, D6, D7, RS, EN> ControlLines for PinLines<D4, D5, D6, D7, RS, EN>
where
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    RS: OutputPin,
    EN: OutputPin,
{
    fn set_data(&mut self, nibble: u8) -> Result<(), Error> {
        drive(&mut self.d4, nibble & 0b0001 != 0)?;
        drive(&mut self.d5, nibble & 0b0010 != 0)?;
        drive(&mut self.d6, nibble & 0b0100 != 0)?;
        drive(&mut self.d7, nibble & 0b1000 != 0)?;
        Ok(())
    }

    fn clear_data(&mut self) -> Result<(), Error> {
        self.set_data(0x00)
    }

    fn set_register_select(&mut self, register: RegisterSelect) -> Result<(), Error> {
        drive(&mut self.rs, register == RegisterSelect::Data)
    }

    fn set_enable(&mut self, high: bool) -> Result<(), Error> {
        drive(&mut self.en, high)
    }
}

/// An output port register that can set and clear groups of bits at once
pub trait OutputPort {
    /// Drive high every line whose bit is set in `mask`
    ///
    /// # Errors
    ///
    /// Returns an error if writing the port fails.
    fn set_bits(&mut self, mask: u32) -> Result<(), Error>;

    /// Drive low every line whose bit is set in `mask`
    ///
    /// # Errors
    ///
    /// Returns an error if writing the port fails.
    fn clear_bits(&mut self, mask: u32) -> Result<(), Error>;
}

/// Control lines with the data nibble packed in a port register
///
/// The four data lines occupy a contiguous 4-bit field of a single port,
/// starting at bit `shift`. On the `EduBase` board D4 to D7 are wired to PA2 to
/// PA5, so the field starts at bit 2 and covers mask `0x3c`.
pub struct PortLines<PORT, RS, EN> {
    /// Port holding the data field
    port: PORT,

    /// Position of D4 within the port
    shift: u8,

    /// Register select pin
    rs: RS,

    /// Enable pin
    en: EN,
}

/// Position of D4 within port A on the `EduBase` board
pub const EDUBASE_DATA_SHIFT: u8 = 2;

impl<PORT, RS, EN> PortLines<PORT, RS, EN>
where
    PORT: OutputPort,
    RS: OutputPin,
    EN: OutputPin,
{
    /// Create new control lines with the data field starting at bit `shift`
    ///
    /// # Panics
    ///
    /// Panics if the field does not fit in a 32-bit port.
    #[must_use]
    pub fn new(port: PORT, shift: u8, rs: RS, en: EN) -> Self {
        assert!(shift <= 28, "Data field must fit in a 32-bit port");
        Self {
            port,
            shift,
            rs,
            en,
        }
    }

    /// Port mask covering the data field
    #[must_use]
    pub fn data_mask(&self) -> u32 {
        0x0f << self.shift
    }

    /// Release the lines and return inner port and pins
    pub fn release(self) -> (PORT, RS, EN) {
        (self.port, self.rs, self.en)
    }
}

impl<PORT, RS, EN> ControlLines for PortLines<PORT, RS, EN>
where
    PORT: OutputPort,
    RS: OutputPin,
    EN: OutputPin,
{
    fn set_data(&mut self, nibble: u8) -> Result<(), Error> {
        let field = u32::from(nibble & 0x0f) << self.shift;
        trace!("Write field {field:#010x} to data port");
        self.port.clear_bits(self.data_mask() & !field)?;
        self.port.set_bits(field)
    }

    fn clear_data(&mut self) -> Result<(), Error> {
        self.port.clear_bits(self.data_mask())
    }

    fn set_register_select(&mut self, register: RegisterSelect) -> Result<(), Error> {
        drive(&mut self.rs, register == RegisterSelect::Data)
    }

    fn set_enable(&mut self, high: bool) -> Result<(), Error> {
        drive(&mut self.en, high)
    }
}
