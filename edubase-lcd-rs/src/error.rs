// Copyright Claudio Mattera 2024.
//
// Distributed under the MIT License or the Apache 2.0 License at your option.
// See the accompanying files License-MIT.txt and License-Apache-2.0.txt, or
// online at
// https://opensource.org/licenses/MIT
// https://opensource.org/licenses/Apache-2.0

//! Data structures and functions for error handling

use embedded_hal::digital::Error as DigitalError;
use embedded_hal::digital::ErrorKind as DigitalErrorKind;

/// An error
///
/// The display is write-only, so the only failures the driver can observe
/// are the ones reported by the GPIO lines driving it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An error in the underlying digital system
    Digital(DigitalErrorKind),
}

impl Error {
    /// Convert a digital error to an error
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Pin errors are small and consumed by the conversion"
    )]
    pub fn from_digital<E>(error: E) -> Self
    where
        E: DigitalError,
    {
        Self::Digital(error.kind())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Digital(kind) => write!(f, "GPIO line failure: {kind:?}"),
        }
    }
}
