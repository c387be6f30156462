// Copyright Claudio Mattera 2024-2025.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files LICENSE-MIT.txt and LICENSE-APACHE-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Analog input and servo/motor outputs of the `EduBase` board
//!
//! Both collaborators are written against small traits, so the same code runs
//! on any chip whose HAL can provide a one-shot analog conversion and a PWM
//! compare register.

#![cfg_attr(not(test), no_std)]

mod adc;
pub use self::adc::AdcConfig;
pub use self::adc::AnalogInput;
pub use self::adc::Reading;
pub use self::adc::Sampler;

mod pwm;
pub use self::pwm::CompareChannel;
pub use self::pwm::Pwm;
pub use self::pwm::PwmConfig;
pub use self::pwm::ServoPulses;
