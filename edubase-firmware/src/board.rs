// Copyright Claudio Mattera 2024-2025.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Adapters from ESP32-C3 peripherals to the board collaborators

use core::convert::Infallible;

use log::info;

use esp_hal::analog::adc::Adc;
use esp_hal::analog::adc::AdcConfig as EspAdcConfig;
use esp_hal::analog::adc::AdcPin;
use esp_hal::analog::adc::Attenuation;
use esp_hal::gpio::DriveMode;
use esp_hal::ledc::channel::config::Config as ChannelConfig;
use esp_hal::ledc::channel::Channel;
use esp_hal::ledc::channel::ChannelHW;
use esp_hal::ledc::channel::ChannelIFace;
use esp_hal::ledc::channel::Error as ChannelError;
use esp_hal::ledc::channel::Number as ChannelNumber;
use esp_hal::ledc::timer::config::Config as TimerConfig;
use esp_hal::ledc::timer::config::Duty;
use esp_hal::ledc::timer::Error as TimerError;
use esp_hal::ledc::timer::LSClockSource;
use esp_hal::ledc::timer::Number as TimerNumber;
use esp_hal::ledc::timer::Timer;
use esp_hal::ledc::timer::TimerIFace;
use esp_hal::ledc::LSGlobalClkSource;
use esp_hal::ledc::Ledc;
use esp_hal::ledc::LowSpeed;
use esp_hal::peripherals::ADC1;
use esp_hal::peripherals::GPIO10;
use esp_hal::peripherals::GPIO2;
use esp_hal::peripherals::GPIO3;
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use esp_hal::Blocking;

use static_cell::StaticCell;

use edubase_peripherals_rs::AnalogInput;
use edubase_peripherals_rs::CompareChannel;

/// PWM frame frequency expected by servos and speed controllers
const PWM_FREQUENCY_HZ: u32 = 50;

/// Length of a PWM frame with 14-bit duty resolution, in timer ticks
pub const PWM_PERIOD_TICKS: u32 = 1 << 14;

/// LED controller, shared by both PWM channels
static LEDC_CONTROLLER: StaticCell<Ledc<'static>> = StaticCell::new();

/// Timer producing the PWM frames
static PWM_TIMER: StaticCell<Timer<'static, LowSpeed>> = StaticCell::new();

/// Potentiometer wired to GPIO3, i.e. channel 3 of ADC1
pub struct Potentiometer {
    /// Converter
    adc: Adc<'static, ADC1<'static>, Blocking>,

    /// Analog pin
    pin: AdcPin<GPIO3<'static>, ADC1<'static>>,
}

impl Potentiometer {
    /// Enable the analog pin and the converter
    ///
    /// The pin is attenuated by 11 dB, which brings full scale to about
    /// 2.5 V.
    pub fn new(adc: ADC1<'static>, pin: GPIO3<'static>) -> Self {
        info!("Enable potentiometer input");
        let mut config = EspAdcConfig::new();
        let pin = config.enable_pin(pin, Attenuation::_11dB);
        let adc = Adc::new(adc, config);
        Self { adc, pin }
    }
}

impl AnalogInput for Potentiometer {
    type Error = ();

    fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
        self.adc.read_oneshot(&mut self.pin)
    }
}

/// A LEDC channel whose compare value is the high time of each frame
pub struct LedcCompare {
    /// Channel
    channel: Channel<'static, LowSpeed>,
}

impl CompareChannel for LedcCompare {
    type Error = Infallible;

    fn set_compare(&mut self, ticks: u32) -> Result<(), Self::Error> {
        self.channel.set_duty_hw(ticks);
        Ok(())
    }
}

/// Set up the motor and servo PWM channels
///
/// The motor is on GPIO10 and the servo on GPIO2, both driven by a single
/// 50 Hz timer. Both start with a zero duty cycle.
///
/// # Errors
///
/// Returns an error if the timer cannot produce the requested frequency, or
/// if a channel cannot be configured.
pub fn pwm_channels(
    ledc: LEDC<'static>,
    motor_pin: GPIO10<'static>,
    servo_pin: GPIO2<'static>,
) -> Result<(LedcCompare, LedcCompare), Error> {
    info!("Set up PWM at {PWM_FREQUENCY_HZ}Hz");
    let ledc = LEDC_CONTROLLER.init(Ledc::new(ledc));
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let timer = PWM_TIMER.init(ledc.timer::<LowSpeed>(TimerNumber::Timer0));
    timer.configure(TimerConfig {
        duty: Duty::Duty14Bit,
        clock_source: LSClockSource::APBClk,
        frequency: Rate::from_hz(PWM_FREQUENCY_HZ),
    })?;
    let timer: &'static Timer<'static, LowSpeed> = timer;

    let mut motor = ledc.channel(ChannelNumber::Channel0, motor_pin);
    motor.configure(channel_config(timer))?;

    let mut servo = ledc.channel(ChannelNumber::Channel1, servo_pin);
    servo.configure(channel_config(timer))?;

    Ok((
        LedcCompare { channel: motor },
        LedcCompare { channel: servo },
    ))
}

/// Channel configuration with a zero duty cycle
fn channel_config(timer: &'static Timer<'static, LowSpeed>) -> ChannelConfig<'static, LowSpeed> {
    ChannelConfig {
        timer,
        duty_pct: 0,
        drive_mode: DriveMode::PushPull,
    }
}

/// An error
#[derive(Debug)]
pub enum Error {
    /// Error from the PWM timer
    #[allow(dead_code, reason = "Only read through Debug")]
    Timer(TimerError),

    /// Error from a PWM channel
    #[allow(dead_code, reason = "Only read through Debug")]
    Channel(ChannelError),
}

impl From<TimerError> for Error {
    fn from(error: TimerError) -> Self {
        Self::Timer(error)
    }
}

impl From<ChannelError> for Error {
    fn from(error: ChannelError) -> Self {
        Self::Channel(error)
    }
}
