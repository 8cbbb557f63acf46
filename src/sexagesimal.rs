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

//! The sexagesimal module converts angles between decimal degrees and text.
//!
//! Text may be decimal degrees, e.g. `53.2015` or `53,2015`, or degrees,
//! minutes and seconds, e.g. `53°12'05.41"`, `53°12'5.41"`, `53 12 5.41` or
//! `53°12′05,41″`. A leading `-` or `+`, or a trailing hemisphere letter
//! (`N` and `E` positive, `S` and `W` negative) gives the sign.

use crate::{Degrees, Error, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[-+])?(?P<value>\d+(?:[.,]\d*)?|[.,]\d+)\s*°?\s*(?P<hemisphere>[NSEWnsew])?$")
        .expect("valid decimal pattern")
});

static DMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<sign>[-+])?(?P<degrees>\d+)(?:°\s*|\s+)(?P<minutes>\d+)(?:[′']\s*|\s+)(?P<seconds>\d+(?:[.,]\d*)?)\s*["″]?\s*(?P<hemisphere>[NSEWnsew])?$"#,
    )
    .expect("valid degrees, minutes and seconds pattern")
});

/// The number of decimal places of angles parsed from degrees, minutes and
/// seconds.
pub const DECIMAL_PLACES: i32 = 6;

fn invalid(text: &str) -> Error {
    Error::InvalidSexagesimal(text.to_owned())
}

fn number(captures: &Captures, name: &str, text: &str) -> Result<f64> {
    captures
        .name(name)
        .map(|value| value.as_str().replace(',', "."))
        .and_then(|value| value.parse::<f64>().ok())
        .ok_or_else(|| invalid(text))
}

/// Whether the angle is negative: a `-` sign or a southern or western
/// hemisphere. A sign with a hemisphere is ambiguous.
fn is_negative(captures: &Captures, text: &str) -> Result<bool> {
    let sign = captures.name("sign").map(|m| m.as_str());
    let hemisphere = captures
        .name("hemisphere")
        .map(|m| m.as_str().to_ascii_uppercase());
    match (sign, hemisphere.as_deref()) {
        (Some(_), Some(_)) => Err(invalid(text)),
        (Some(sign), None) => Ok(sign == "-"),
        (None, Some(hemisphere)) => Ok(hemisphere == "S" || hemisphere == "W"),
        (None, None) => Ok(false),
    }
}

fn round(value: f64, places: i32) -> f64 {
    let scale = libm::pow(10.0, f64::from(places));
    libm::round(value * scale) / scale
}

/// Parse an angle from text.
/// * `text` - decimal degrees or degrees, minutes and seconds.
///
/// returns the angle. Angles given in degrees, minutes and seconds are
/// rounded to `DECIMAL_PLACES` decimal places.
///
/// # Errors
///
/// `Error::InvalidSexagesimal` if the text is not an angle, or the minutes
/// or seconds are not less than 60.
///
/// # Examples
/// ```
/// use gost_locator::{sexagesimal, Degrees};
///
/// assert_eq!(Degrees(53.201503), sexagesimal::parse("53°12'05.41\"").unwrap());
/// assert_eq!(Degrees(-37.62), sexagesimal::parse("37 37 12 W").unwrap());
/// assert_eq!(Degrees(55.75), sexagesimal::parse("55,75").unwrap());
/// ```
pub fn parse(text: &str) -> Result<Degrees> {
    let trimmed = text.trim();

    if let Some(captures) = DECIMAL.captures(trimmed) {
        let value = number(&captures, "value", text)?;
        let negative = is_negative(&captures, text)?;
        return Ok(Degrees(if negative { -value } else { value }));
    }

    let captures = DMS
        .captures(trimmed)
        .ok_or_else(|| invalid(text))?;
    let degrees = number(&captures, "degrees", text)?;
    let minutes = number(&captures, "minutes", text)?;
    let seconds = number(&captures, "seconds", text)?;
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(invalid(text));
    }

    let value = round(degrees + minutes / 60.0 + seconds / 3600.0, DECIMAL_PLACES);
    let negative = is_negative(&captures, text)?;
    Ok(Degrees(if negative { -value } else { value }))
}

/// Format an angle as degrees, minutes and seconds, e.g. `-53°12'05.41"`.
///
/// Minutes have two digits and seconds two digits and two decimal places.
/// Non-finite angles are formatted as numbers.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format(angle: Degrees) -> String {
    if !angle.0.is_finite() {
        return angle.0.to_string();
    }

    // round once, so that 59.995 seconds carries into the minutes
    let centiseconds = libm::round(angle.0.abs() * 360_000.0) as u64;
    let degrees = centiseconds / 360_000;
    let minutes = centiseconds / 6_000 % 60;
    let seconds = centiseconds % 6_000;
    let sign = if angle.0 < 0.0 && centiseconds > 0 {
        "-"
    } else {
        ""
    };

    format!(
        "{sign}{degrees}°{minutes:02}'{:02}.{:02}\"",
        seconds / 100,
        seconds % 100
    )
}
