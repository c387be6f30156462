// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Sampling of an analog input

use log::debug;
use log::trace;

use uom::si::electric_potential::volt;
use uom::si::f32::ElectricPotential;

/// An analog input producing one conversion at a time
pub trait AnalogInput {
    /// Error type
    type Error: core::fmt::Debug;

    /// Trigger a conversion, or check whether the pending one is complete
    ///
    /// Returns [`nb::Error::WouldBlock`] until the conversion is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    fn read_raw(&mut self) -> nb::Result<u16, Self::Error>;
}

/// Configuration of an analog input
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdcConfig {
    /// Voltage corresponding to full scale
    reference: ElectricPotential,

    /// Number of bits of each conversion, between 1 and 16
    resolution_bits: u8,
}

impl Default for AdcConfig {
    /// The 3.3 V, 12 bits converter of the `EduBase` potentiometer
    fn default() -> Self {
        Self {
            reference: ElectricPotential::new::<volt>(3.3),
            resolution_bits: 12,
        }
    }
}

impl AdcConfig {
    /// Set the voltage corresponding to full scale
    #[must_use]
    pub fn with_reference(mut self, reference: ElectricPotential) -> Self {
        self.reference = reference;
        self
    }

    /// Set the number of bits of each conversion
    ///
    /// # Panics
    ///
    /// Panics if the resolution is zero or larger than 16 bits.
    #[must_use]
    pub fn with_resolution_bits(mut self, resolution_bits: u8) -> Self {
        assert!(
            (1..=16).contains(&resolution_bits),
            "Resolution must be between 1 and 16 bits"
        );
        self.resolution_bits = resolution_bits;
        self
    }

    /// Get the voltage corresponding to full scale
    #[must_use]
    pub fn reference(&self) -> ElectricPotential {
        self.reference
    }

    /// Get the number of bits of each conversion
    #[must_use]
    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    /// Number of distinct conversion values, i.e. 2 to the resolution
    #[must_use]
    pub fn full_scale(&self) -> u32 {
        1_u32 << self.resolution_bits.clamp(1, 16)
    }

    /// Convert a raw count to a reading
    #[must_use]
    pub fn reading(&self, raw: u16) -> Reading {
        #[expect(clippy::cast_precision_loss, reason = "Full scale is at most 2^16")]
        let fraction = f32::from(raw) / self.full_scale() as f32;
        Reading {
            raw,
            voltage: self.reference * fraction,
            fraction,
        }
    }
}

/// A single conversion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Raw count
    raw: u16,

    /// Voltage
    voltage: ElectricPotential,

    /// Fraction of full scale
    fraction: f32,
}

impl Reading {
    /// Get the raw count
    #[must_use]
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Get the voltage
    #[must_use]
    pub fn voltage(&self) -> ElectricPotential {
        self.voltage
    }

    /// Get the fraction of full scale, in `[0, 1)`
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }
}

/// A sampler for an analog input
pub struct Sampler<INPUT> {
    /// Analog input
    input: INPUT,

    /// Configuration
    config: AdcConfig,
}

impl<INPUT> Sampler<INPUT>
where
    INPUT: AnalogInput,
{
    /// Create a new sampler
    ///
    /// The input is expected to be already set up by the HAL, this only
    /// records how to scale its conversions.
    pub fn new(input: INPUT, config: AdcConfig) -> Self {
        debug!(
            "Create sampler with {}-bit resolution and {}V reference",
            config.resolution_bits,
            config.reference.get::<volt>()
        );
        Self { input, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &AdcConfig {
        &self.config
    }

    /// Trigger a conversion and wait for its result
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    pub fn sample(&mut self) -> Result<Reading, INPUT::Error> {
        let raw = nb::block!(self.input.read_raw())?;
        let reading = self.config.reading(raw);
        trace!("Sampled {raw} ({}V)", reading.voltage.get::<volt>());
        Ok(reading)
    }

    /// Trigger a conversion and store its voltage in `slot`
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails, in which case `slot` is left
    /// untouched.
    pub fn sample_into(&mut self, slot: &mut ElectricPotential) -> Result<(), INPUT::Error> {
        *slot = self.sample()?.voltage;
        Ok(())
    }

    /// Release the sampler and return the inner input
    pub fn release(self) -> INPUT {
        self.input
    }
}
