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

//! The ellipsoid module contains the reference ellipsoids of the four
//! supported datums and functions for the ellipsoid quantities used by the
//! geodetic conversions, given an ellipsoid's Semimajor axis (the equivalent
//! of its radius) and flattening ratio.
//!
//! | Datum     | Ellipsoid  | a (m)       | 1/f           |
//! |-----------|------------|-------------|---------------|
//! | WGS-84    | WGS 84     | 6 378 137.0 | 298.257223563 |
//! | GSK-2011  | GSK-2011   | 6 378 136.5 | 298.2564151   |
//! | PZ-90.11  | PZ-90      | 6 378 136.0 | 298.25784     |
//! | SK-42/95  | Krasovsky  | 6 378 245.0 | 298.3         |

#![allow(clippy::suboptimal_flops)]

use crate::Metres;

/// The WGS 84 Semimajor axis measured in metres.
pub const WGS84_A: Metres = Metres(6_378_137.0);
/// The WGS 84 flattening, a ratio.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// The GSK-2011 Semimajor axis measured in metres.
pub const GSK2011_A: Metres = Metres(6_378_136.5);
/// The GSK-2011 flattening, a ratio.
pub const GSK2011_F: f64 = 1.0 / 298.256_415_1;

/// The PZ-90.11 Semimajor axis measured in metres.
pub const PZ90_A: Metres = Metres(6_378_136.0);
/// The PZ-90.11 flattening, a ratio.
pub const PZ90_F: f64 = 1.0 / 298.257_84;

/// The Krasovsky (SK-42/95) Semimajor axis measured in metres.
pub const KRASOVSKY_A: Metres = Metres(6_378_245.0);
/// The Krasovsky (SK-42/95) flattening, a ratio.
pub const KRASOVSKY_F: f64 = 1.0 / 298.3;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use gost_locator::Metres;
/// use gost_locator::ellipsoid::{calculate_minor_axis, KRASOVSKY_A, KRASOVSKY_F};
///
/// let b = calculate_minor_axis(KRASOVSKY_A, KRASOVSKY_F);
/// assert!((b.0 - 6_356_863.019).abs() < 1e-3);
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the (first) Eccentricity of an ellipsoid,
/// `e² = 2f - f²`.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use gost_locator::ellipsoid::{calculate_sq_eccentricity, WGS84_F};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(WGS84_F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the radius of curvature in the prime vertical,
/// `N = a / sqrt(1 - e²·sin²(lat))`.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
/// * `sin_lat` - the sine of the geodetic latitude.
#[must_use]
pub fn calculate_prime_vertical_radius(a: Metres, e_2: f64, sin_lat: f64) -> Metres {
    Metres(a.0 / libm::sqrt(1.0 - e_2 * sin_lat * sin_lat))
}
