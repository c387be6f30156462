// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Two-channel PWM for a speed controller and a steering servo
//!
//! Both channels share a single period, normally a 20 ms frame as expected by
//! RC servos and speed controllers. The pulse width is set by writing a raw
//! compare value, whose meaning (high time or low time) depends on how the
//! hardware generator is configured.

use log::debug;
use log::trace;

/// A PWM channel with a writable compare register
pub trait CompareChannel {
    /// Error type
    type Error: core::fmt::Debug;

    /// Write a compare value, in timer ticks
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware rejects the value.
    fn set_compare(&mut self, ticks: u32) -> Result<(), Self::Error>;
}

/// Configuration of the PWM generator
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PwmConfig {
    /// Length of a frame, in timer ticks
    pub period_ticks: u32,

    /// Compare value written to both channels on creation
    pub initial_compare: u32,
}

impl Default for PwmConfig {
    /// Generator 0 of the `EduBase` board, counting down with a 20 ms frame
    /// and both outputs at neutral
    fn default() -> Self {
        Self {
            period_ticks: 7811,
            initial_compare: 6640,
        }
    }
}

/// Pulse widths of a standard RC servo, in timer ticks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServoPulses {
    /// 0.5 ms, full travel on one side
    pub extreme_left: u32,

    /// 1.0 ms
    pub left: u32,

    /// 1.5 ms, neutral
    pub center: u32,

    /// 2.0 ms
    pub right: u32,

    /// 2.5 ms, full travel on the other side
    pub extreme_right: u32,
}

impl ServoPulses {
    /// Compare values of the `EduBase` count-down generator
    ///
    /// The generator drives the output low on compare match, so larger values
    /// mean shorter pulses.
    pub const EDUBASE: Self = Self {
        extreme_left: 391,
        left: 7030,
        center: 6640,
        right: 6249,
        extreme_right: 13671,
    };

    /// Derive pulse widths from the length of a 20 ms frame
    ///
    /// The result holds high times, suitable for generators that drive the
    /// output high at the start of each frame.
    #[must_use]
    pub fn from_period(period_ticks: u32) -> Self {
        /// Frame length, in tenths of milliseconds
        const FRAME: u64 = 200;

        let ticks = |tenths: u64| -> u32 {
            let ticks = u64::from(period_ticks) * tenths / FRAME;
            u32::try_from(ticks).unwrap_or(u32::MAX)
        };

        Self {
            extreme_left: ticks(5),
            left: ticks(10),
            center: ticks(15),
            right: ticks(20),
            extreme_right: ticks(25),
        }
    }

    /// Sweep through neutral, left, neutral and right
    #[must_use]
    pub fn sweep(&self) -> [u32; 4] {
        [self.center, self.left, self.center, self.right]
    }
}

/// A PWM generator with a motor channel and a servo channel
pub struct Pwm<MOTOR, SERVO> {
    /// Channel driving the speed controller
    motor: MOTOR,

    /// Channel driving the steering servo
    servo: SERVO,

    /// Configuration
    config: PwmConfig,
}

impl<MOTOR, SERVO> Pwm<MOTOR, SERVO>
where
    MOTOR: CompareChannel,
    SERVO: CompareChannel<Error = MOTOR::Error>,
{
    /// Create a new generator and move both channels to the initial compare
    /// value
    ///
    /// # Errors
    ///
    /// Returns an error if writing any compare register fails.
    pub fn new(
        mut motor: MOTOR,
        mut servo: SERVO,
        config: PwmConfig,
    ) -> Result<Self, MOTOR::Error> {
        debug!(
            "Create PWM with period {} ticks and initial compare {}",
            config.period_ticks, config.initial_compare
        );
        motor.set_compare(config.initial_compare)?;
        servo.set_compare(config.initial_compare)?;
        Ok(Self {
            motor,
            servo,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    /// Servo pulse widths for the configured period
    #[must_use]
    pub fn servo_pulses(&self) -> ServoPulses {
        ServoPulses::from_period(self.config.period_ticks)
    }

    /// Write the compare value of the motor channel
    ///
    /// The value is not checked against the period.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the compare register fails.
    pub fn set_motor_speed(&mut self, ticks: u32) -> Result<(), MOTOR::Error> {
        trace!("Set motor compare to {ticks}");
        self.motor.set_compare(ticks)
    }

    /// Write the compare value of the servo channel
    ///
    /// The value is not checked against the period.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the compare register fails.
    pub fn set_servo_angle(&mut self, ticks: u32) -> Result<(), MOTOR::Error> {
        trace!("Set servo compare to {ticks}");
        self.servo.set_compare(ticks)
    }

    /// Release the generator and return the inner channels
    pub fn release(self) -> (MOTOR, SERVO) {
        (self.motor, self.servo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    /// A channel recording every compare value
    #[derive(Debug, Default)]
    struct RecordingChannel {
        /// Written values
        writes: Vec<u32>,
    }

    impl CompareChannel for RecordingChannel {
        type Error = ();

        fn set_compare(&mut self, ticks: u32) -> Result<(), Self::Error> {
            self.writes.push(ticks);
            Ok(())
        }
    }

    /// A channel rejecting values above a limit
    struct LimitedChannel {
        /// Largest accepted value
        limit: u32,
    }

    impl CompareChannel for LimitedChannel {
        type Error = u32;

        fn set_compare(&mut self, ticks: u32) -> Result<(), Self::Error> {
            if ticks > self.limit {
                Err(ticks)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn creation_moves_both_channels_to_neutral() {
        let pwm = Pwm::new(
            RecordingChannel::default(),
            RecordingChannel::default(),
            PwmConfig::default(),
        )
        .unwrap();

        let (motor, servo) = pwm.release();
        assert_eq!(motor.writes, [6640]);
        assert_eq!(servo.writes, [6640]);
    }

    #[test]
    fn channels_are_independent() {
        let mut pwm = Pwm::new(
            RecordingChannel::default(),
            RecordingChannel::default(),
            PwmConfig::default(),
        )
        .unwrap();

        pwm.set_servo_angle(ServoPulses::EDUBASE.left).unwrap();
        pwm.set_servo_angle(ServoPulses::EDUBASE.right).unwrap();
        pwm.set_motor_speed(7000).unwrap();

        let (motor, servo) = pwm.release();
        assert_eq!(motor.writes, [6640, 7000]);
        assert_eq!(servo.writes, [6640, 7030, 6249]);
    }

    #[test]
    fn values_beyond_period_are_passed_through() {
        let mut pwm = Pwm::new(
            RecordingChannel::default(),
            RecordingChannel::default(),
            PwmConfig::default(),
        )
        .unwrap();

        pwm.set_servo_angle(ServoPulses::EDUBASE.extreme_right).unwrap();

        let (_motor, servo) = pwm.release();
        assert_eq!(servo.writes.last(), Some(&13671));
    }

    #[test]
    fn hardware_errors_are_propagated() {
        let config = PwmConfig {
            period_ticks: 1000,
            initial_compare: 500,
        };
        let mut pwm = Pwm::new(
            LimitedChannel { limit: 1000 },
            LimitedChannel { limit: 1000 },
            config,
        )
        .unwrap();

        assert_eq!(pwm.set_motor_speed(1001), Err(1001));
        assert_eq!(pwm.set_servo_angle(999), Ok(()));

        let rejected = Pwm::new(
            LimitedChannel { limit: 100 },
            LimitedChannel { limit: 100 },
            config,
        );
        assert_eq!(rejected.err(), Some(500));
    }

    #[test]
    fn pulses_of_a_20_ms_frame() {
        let pulses = ServoPulses::from_period(20_000);
        assert_eq!(
            pulses,
            ServoPulses {
                extreme_left: 500,
                left: 1000,
                center: 1500,
                right: 2000,
                extreme_right: 2500,
            }
        );
        assert_eq!(pulses.sweep(), [1500, 1000, 1500, 2000]);
    }

    proptest! {
        #[test]
        fn pulses_are_ordered_and_within_period(period in 0..=u32::MAX) {
            let pulses = ServoPulses::from_period(period);
            prop_assert!(pulses.extreme_left <= pulses.left);
            prop_assert!(pulses.left <= pulses.center);
            prop_assert!(pulses.center <= pulses.right);
            prop_assert!(pulses.right <= pulses.extreme_right);
            prop_assert!(pulses.extreme_right <= period);
        }
    }
}
