// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The error module contains the `Error` type returned by every fallible
//! calculation in the library.
//!
//! A failure anywhere in a calculation chain aborts the whole calculation:
//! no partial results are returned.

use thiserror::Error;

/// The result type of the library's fallible calculations.
pub type Result<T> = core::result::Result<T, Error>;

/// The reasons why a calculation can fail.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The datum identifier is not one of WGS-84, GSK-2011, PZ-90.11 or SK-42/95.
    #[error("unknown datum: {0:?}")]
    UnknownDatum(String),

    /// A non-finite or out of domain numeric argument.
    #[error("malformed input: {parameter} = {value}")]
    MalformedInput {
        /// The name of the offending parameter.
        parameter: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The circles are too far apart to intersect.
    #[error("the circles do not intersect: the distance between centres exceeds the sum of the radii")]
    NoIntersection,

    /// One circle lies wholly inside the other.
    #[error("the circles do not intersect: one circle is contained within the other")]
    Contained,

    /// The circles are identical, so they have infinitely many common points.
    #[error("the circles are coincident")]
    Coincident,

    /// The Cartesian to geodetic latitude iteration did not converge.
    #[error("latitude iteration did not converge after {iterations} iterations")]
    ConvergenceFailure {
        /// The number of iterations performed.
        iterations: u32,
    },

    /// The text is neither decimal degrees nor degrees, minutes and seconds.
    #[error("invalid sexagesimal angle: {0:?}")]
    InvalidSexagesimal(String),
}

/// Check that a value is finite.
/// * `parameter` - the name reported on failure.
/// * `value` - the value to check.
///
/// # Errors
///
/// `Error::MalformedInput` if `value` is infinite or NaN.
pub fn check_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::MalformedInput { parameter, value })
    }
}

/// Check that a value is finite and not negative.
/// * `parameter` - the name reported on failure.
/// * `value` - the value to check.
///
/// # Errors
///
/// `Error::MalformedInput` if `value` is negative, infinite or NaN.
pub fn check_non_negative(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::MalformedInput { parameter, value })
    }
}

/// Check that the argument of an `asin` or `acos` is within [-1, 1].
/// * `parameter` - the name reported on failure.
/// * `value` - the argument to check.
///
/// # Errors
///
/// `Error::MalformedInput` if `value` is outside [-1, 1] or NaN.
pub fn check_unit_range(parameter: &'static str, value: f64) -> Result<f64> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::MalformedInput { parameter, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks() {
        assert_eq!(Ok(1.5), check_finite("x", 1.5));
        assert!(matches!(
            check_finite("x", f64::NAN),
            Err(Error::MalformedInput { parameter: "x", .. })
        ));
        assert_eq!(Ok(0.0), check_non_negative("r", 0.0));
        assert_eq!(
            Err(Error::MalformedInput {
                parameter: "r",
                value: -1.0
            }),
            check_non_negative("r", -1.0)
        );
        assert_eq!(Ok(-1.0), check_unit_range("s", -1.0));
        assert!(check_unit_range("s", 1.000_000_1).is_err());
        assert!(check_unit_range("s", f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "unknown datum: \"NAD83\"",
            Error::UnknownDatum(String::from("NAD83")).to_string()
        );
        assert_eq!(
            "latitude iteration did not converge after 32 iterations",
            Error::ConvergenceFailure { iterations: 32 }.to_string()
        );
    }
}
