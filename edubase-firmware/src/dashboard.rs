// Copyright Claudio Mattera 2024-2025.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dashboard for the character display

use embedded_hal::delay::DelayNs;

use uom::si::electric_potential::volt;

use edubase_lcd_rs::ControlLines;
use edubase_lcd_rs::Display;
use edubase_lcd_rs::Error;
use edubase_lcd_rs::Glyph;

use edubase_peripherals_rs::Reading;

/// A position of the steering servo
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServoPosition {
    /// Neutral
    Center,

    /// Turned left
    Left,

    /// Turned right
    Right,
}

impl ServoPosition {
    /// Positions visited by a sweep, one every hold period
    pub const SWEEP: [Self; 4] = [Self::Center, Self::Left, Self::Center, Self::Right];

    /// Glyph shown next to the position
    fn glyph(self) -> Glyph {
        match self {
            Self::Center => Glyph::UpArrow,
            Self::Left => Glyph::LeftArrow,
            Self::Right => Glyph::RightArrow,
        }
    }

    /// Name shown on the display
    fn label(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Draw the servo position on the first row and the potentiometer reading on
/// the second
///
/// ```text
/// Servo ← left
/// 1.234567V  49%
/// ```
///
/// # Errors
///
/// Returns an error if setting any display line fails.
pub fn draw<LINES, DELAY>(
    display: &mut Display<LINES, DELAY>,
    position: ServoPosition,
    reading: &Reading,
) -> Result<(), Error>
where
    LINES: ControlLines,
    DELAY: DelayNs,
{
    display.clear_display()?;

    let mut buffer = [0; 4];
    let glyph = position.glyph().character().encode_utf8(&mut buffer);
    display.print("Servo ")?;
    display.print(glyph)?;
    display.print(" ")?;
    display.print(position.label())?;

    display.set_cursor(0, 1)?;
    display.print_float(f64::from(reading.voltage().get::<volt>()))?;
    display.print("V ")?;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "Fraction is in [0, 1), percentage fits in i32"
    )]
    let percentage = (reading.fraction() * 100.0) as i32;
    display.print_integer(percentage)?;
    display.print("%")?;

    Ok(())
}
