// Copyright Claudio Mattera 2024-2025.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Main crate

#![no_std]
#![no_main]

use core::convert::Infallible;

use log::error;
use log::info;
use log::warn;

use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::Level;
use esp_hal::gpio::Output;
use esp_hal::gpio::OutputConfig;
use esp_hal::gpio::OutputPin;
use esp_hal::init as initialize_esp_hal;
use esp_hal::main;
use esp_hal::Config as EspConfig;

use uom::si::electric_potential::volt;
use uom::si::f32::ElectricPotential;

use esp_backtrace as _;

use edubase_lcd_rs::Display;
use edubase_lcd_rs::Error as DisplayError;
use edubase_lcd_rs::PinLines;

use edubase_peripherals_rs::AdcConfig;
use edubase_peripherals_rs::Pwm;
use edubase_peripherals_rs::PwmConfig;
use edubase_peripherals_rs::Sampler;
use edubase_peripherals_rs::ServoPulses;

mod board;
use self::board::pwm_channels;
use self::board::Error as BoardError;
use self::board::Potentiometer;
use self::board::PWM_PERIOD_TICKS;

mod dashboard;
use self::dashboard::draw as draw_dashboard;
use self::dashboard::ServoPosition;

mod logging;
use self::logging::setup as setup_logging;

esp_bootloader_esp_idf::esp_app_desc!();

/// Time to hold each servo position, in milliseconds
const HOLD_PERIOD_MS: u32 = 3000;

/// Full scale of the potentiometer input with 11 dB attenuation, in volts
const POTENTIOMETER_FULL_SCALE_V: f32 = 2.5;

/// Main task
#[main]
fn main() -> ! {
    setup_logging();

    match main_fallible() {
        Ok(never) => match never {},
        Err(error) => error!("Error while running firmware: {error:?}"),
    }

    let delay = Delay::new();
    loop {
        delay.delay_millis(HOLD_PERIOD_MS);
    }
}

/// Main task that can return an error
fn main_fallible() -> Result<Infallible, Error> {
    let peripherals = initialize_esp_hal(EspConfig::default().with_cpu_clock(CpuClock::max()));

    let delay = Delay::new();

    info!("Set up display");
    let lines = PinLines::new(
        (
            output(peripherals.GPIO4),
            output(peripherals.GPIO5),
            output(peripherals.GPIO6),
            output(peripherals.GPIO7),
        ),
        output(peripherals.GPIO0),
        output(peripherals.GPIO1),
    );
    let mut display = Display::new(lines, delay);
    display.initialize()?;
    display.upload_default_glyphs()?;

    let mut sampler = Sampler::new(
        Potentiometer::new(peripherals.ADC1, peripherals.GPIO3),
        AdcConfig::default().with_reference(ElectricPotential::new::<volt>(
            POTENTIOMETER_FULL_SCALE_V,
        )),
    );

    let (motor, servo) = pwm_channels(peripherals.LEDC, peripherals.GPIO10, peripherals.GPIO2)?;
    let pulses = ServoPulses::from_period(PWM_PERIOD_TICKS);
    let mut pwm = Pwm::new(
        motor,
        servo,
        PwmConfig {
            period_ticks: PWM_PERIOD_TICKS,
            initial_compare: pulses.center,
        },
    )?;

    info!("Start servo sweep");
    loop {
        for (position, ticks) in ServoPosition::SWEEP.into_iter().zip(pulses.sweep()) {
            info!("Move servo to {position:?}");
            pwm.set_servo_angle(ticks)?;

            match sampler.sample() {
                Ok(reading) => {
                    info!(
                        "Potentiometer at {}V",
                        reading.voltage().get::<volt>()
                    );
                    if let Err(error) = draw_dashboard(&mut display, position, &reading) {
                        error!("Could not update display: {error:?}");
                    }
                }
                Err(error) => warn!("Could not sample potentiometer: {error:?}"),
            }

            delay.delay_millis(HOLD_PERIOD_MS);
        }
    }
}

/// Create an output pin starting low
fn output<'pin>(pin: impl OutputPin + 'pin) -> Output<'pin> {
    Output::new(pin, Level::Low, OutputConfig::default())
}

/// An error
#[derive(Debug)]
enum Error {
    /// Error from the display
    #[allow(dead_code, reason = "Only read through Debug")]
    Display(DisplayError),

    /// Error from the board peripherals
    #[allow(dead_code, reason = "Only read through Debug")]
    Board(BoardError),
}

impl From<DisplayError> for Error {
    fn from(error: DisplayError) -> Self {
        Self::Display(error)
    }
}

impl From<BoardError> for Error {
    fn from(error: BoardError) -> Self {
        Self::Board(error)
    }
}

impl From<Infallible> for Error {
    fn from(error: Infallible) -> Self {
        match error {}
    }
}
