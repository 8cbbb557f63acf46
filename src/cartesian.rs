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

//! The cartesian module converts between geodetic coordinates (latitude,
//! longitude and height) and geocentric Cartesian coordinates on the
//! ellipsoid of a datum.
//!
//! The conversion to Cartesian coordinates is closed form. The conversion
//! from Cartesian coordinates uses the iterative algorithm of GOST 32453-2017,
//! section 5.1.2: the angle between the geocentric and the geodetic latitude
//! of the point is a fixed point of
//!
//! `s = asin(p · sin(2(c + s)) / sqrt(1 - e²·sin²(c + s)))`,
//!
//! where `c` is the geocentric latitude and `p = e²a / 2r`.

#![allow(clippy::suboptimal_flops)]

use crate::error::{check_finite, check_unit_range};
use crate::{CartesianPoint, Error, GeodeticPoint, Metres, Radians, Result};
use core::f64::consts::{FRAC_PI_2, TAU};

/// The convergence tolerance of the latitude iteration, in Radians.
pub const TOLERANCE: Radians = Radians(1e-10);

/// The maximum number of latitude iterations. The iteration usually
/// converges in fewer than 6.
pub const MAX_ITERATIONS: u32 = 32;

/// The distance from the polar axis below which a point is treated as being
/// on the axis, in metres.
const MIN_AXIS_DISTANCE: f64 = 1e-10;

/// Convert geodetic coordinates to geocentric Cartesian coordinates on the
/// same datum.
///
/// `X = (N + h)·cos(lat)·cos(lon)`, `Y = (N + h)·cos(lat)·sin(lon)` and
/// `Z = ((1 - e²)·N + h)·sin(lat)`.
/// * `point` - the geodetic coordinates.
///
/// # Errors
///
/// `Error::MalformedInput` if the latitude, longitude or height is not finite.
/// # Examples
/// ```
/// use gost_locator::{cartesian, Datum, GeodeticPoint, Metres, Radians};
///
/// let origin = GeodeticPoint::new(Radians(0.0), Radians(0.0), Metres(0.0), Datum::Wgs84);
/// let xyz = cartesian::geodetic_to_cartesian(&origin).unwrap();
/// assert_eq!(6_378_137.0, xyz.x);
/// assert_eq!(0.0, xyz.y);
/// assert_eq!(0.0, xyz.z);
/// ```
pub fn geodetic_to_cartesian(point: &GeodeticPoint) -> Result<CartesianPoint> {
    let lat = check_finite("latitude", point.lat.0)?;
    let lon = check_finite("longitude", point.lon.0)?;
    let h = check_finite("height", point.height.0)?;

    let ellipsoid = point.datum.ellipsoid();
    let e_2 = ellipsoid.e_2();
    let (sin_lat, cos_lat) = libm::sincos(lat);
    let (sin_lon, cos_lon) = libm::sincos(lon);
    let n = ellipsoid.prime_vertical_radius(sin_lat).0;

    Ok(CartesianPoint::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        ((1.0 - e_2) * n + h) * sin_lat,
        point.datum,
    ))
}

/// Convert geocentric Cartesian coordinates to geodetic coordinates on the
/// same datum.
///
/// Points within 1e-10 metres of the polar axis are placed on the pole with
/// a longitude of zero. Otherwise the longitude is normalised to [0, 2π).
/// * `point` - the Cartesian coordinates.
///
/// # Errors
///
/// `Error::MalformedInput` if a coordinate is not finite,
/// `Error::ConvergenceFailure` if the latitude iteration does not converge
/// within `MAX_ITERATIONS`.
pub fn cartesian_to_geodetic(point: &CartesianPoint) -> Result<GeodeticPoint> {
    let x = check_finite("x", point.x)?;
    let y = check_finite("y", point.y)?;
    let z = check_finite("z", point.z)?;

    let ellipsoid = point.datum.ellipsoid();
    let a = ellipsoid.a().0;
    let e_2 = ellipsoid.e_2();

    // distance from the polar axis
    let p = libm::hypot(x, y);
    if p < MIN_AXIS_DISTANCE {
        let lat = if z >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        let sin_lat = libm::sin(lat);
        let n = ellipsoid.prime_vertical_radius(sin_lat).0;
        let height = z * sin_lat - n * (1.0 - e_2 * sin_lat * sin_lat);
        return Ok(GeodeticPoint::new(
            Radians(lat),
            Radians(0.0),
            Metres(height),
            point.datum,
        ));
    }

    let mut lon = libm::atan2(y, x);
    if lon < 0.0 {
        lon += TAU;
    }

    let r = libm::hypot(p, z);
    let c = libm::asin(z / r);
    let p1 = e_2 * a / (2.0 * r);

    let lat = iterate_latitude(c, p1, e_2)?;

    let (sin_lat, cos_lat) = libm::sincos(lat);
    let n = ellipsoid.prime_vertical_radius(sin_lat).0;
    let height = p * cos_lat + z * sin_lat - n * (1.0 - e_2 * sin_lat * sin_lat);

    Ok(GeodeticPoint::new(
        Radians(lat),
        Radians(lon),
        Metres(height),
        point.datum,
    ))
}

/// Iterate the geodetic latitude from the geocentric latitude.
/// * `c` - the geocentric latitude.
/// * `p1` - `e²a / 2r`.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
fn iterate_latitude(c: f64, p1: f64, e_2: f64) -> Result<f64> {
    let mut s1 = 0.0;
    for _ in 0..MAX_ITERATIONS {
        let b = c + s1;
        let sin_b = libm::sin(b);
        let sin_s = check_unit_range(
            "sin(s)",
            p1 * libm::sin(2.0 * b) / libm::sqrt(1.0 - e_2 * sin_b * sin_b),
        )?;
        let s2 = libm::asin(sin_s);
        if libm::fabs(s2 - s1) < TOLERANCE.0 {
            return Ok(b);
        }
        s1 = s2;
    }

    Err(Error::ConvergenceFailure {
        iterations: MAX_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Datum, Degrees};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_geodetic_to_cartesian_axes() {
        for datum in Datum::ALL {
            let ellipsoid = datum.ellipsoid();

            let east = GeodeticPoint::from_degrees(Degrees(0.0), Degrees(90.0), Metres(10.0), datum);
            let result = geodetic_to_cartesian(&east).expect("finite");
            assert!(result.x.abs() < 1e-9);
            assert!(is_within_tolerance(ellipsoid.a().0 + 10.0, result.y, 1e-9));
            assert_eq!(0.0, result.z);
            assert_eq!(datum, result.datum);

            let north = GeodeticPoint::from_degrees(Degrees(90.0), Degrees(0.0), Metres(0.0), datum);
            let result = geodetic_to_cartesian(&north).expect("finite");
            assert!(result.x.abs() < 1e-9);
            assert!(is_within_tolerance(ellipsoid.b().0, result.z, 1e-6));
        }
    }

    #[test]
    fn test_round_trip() {
        for datum in Datum::ALL {
            for lat in (-85..=85).step_by(17) {
                for lon in (0..360).step_by(37) {
                    for height in [-420.0, 0.0, 1_750.5, 11_000.0] {
                        let point = GeodeticPoint::from_degrees(
                            Degrees(f64::from(lat) + 0.123),
                            Degrees(f64::from(lon) + 0.456),
                            Metres(height),
                            datum,
                        );
                        let xyz = geodetic_to_cartesian(&point).expect("finite");
                        let result = cartesian_to_geodetic(&xyz).expect("converges");
                        assert!(is_within_tolerance(point.lat.0, result.lat.0, 1e-9));
                        assert!(is_within_tolerance(point.lon.0, result.lon.0, 1e-9));
                        assert!(is_within_tolerance(point.height.0, result.height.0, 1e-8));
                        assert_eq!(datum, result.datum);
                    }
                }
            }
        }
    }

    #[test]
    fn test_longitude_is_normalised() {
        let point = GeodeticPoint::from_degrees(
            Degrees(-33.9),
            Degrees(-70.6),
            Metres(500.0),
            Datum::Pz90,
        );
        let xyz = point.to_cartesian().expect("finite");
        let result = cartesian_to_geodetic(&xyz).expect("converges");
        assert!(is_within_tolerance(
            (360.0_f64 - 70.6).to_radians(),
            result.lon.0,
            1e-9
        ));
        assert!((0.0..TAU).contains(&result.lon.0));
    }

    #[test]
    fn test_polar_axis() {
        let ellipsoid = Datum::Sk.ellipsoid();

        let north = CartesianPoint::new(0.0, 0.0, ellipsoid.b().0 + 100.0, Datum::Sk);
        let result = cartesian_to_geodetic(&north).expect("pole");
        assert_eq!(FRAC_PI_2, result.lat.0);
        assert_eq!(0.0, result.lon.0);
        assert!(is_within_tolerance(100.0, result.height.0, 1e-6));

        let south = CartesianPoint::new(0.0, 0.0, -ellipsoid.b().0, Datum::Sk);
        let result = cartesian_to_geodetic(&south).expect("pole");
        assert_eq!(-FRAC_PI_2, result.lat.0);
        assert!(result.height.0.abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_input() {
        let point = CartesianPoint::new(f64::NAN, 0.0, 0.0, Datum::Wgs84);
        assert!(matches!(
            cartesian_to_geodetic(&point),
            Err(Error::MalformedInput { parameter: "x", .. })
        ));
        assert!(matches!(
            cartesian_to_geodetic(&CartesianPoint::new(0.0, f64::INFINITY, 0.0, Datum::Wgs84)),
            Err(Error::MalformedInput { parameter: "y", .. })
        ));
    }

    #[test]
    fn test_non_finite_geodetic_input() {
        let point = GeodeticPoint::new(Radians(f64::NAN), Radians(0.5), Metres(0.0), Datum::Sk);
        assert!(matches!(
            geodetic_to_cartesian(&point),
            Err(Error::MalformedInput { parameter: "latitude", .. })
        ));
        let point = GeodeticPoint::new(Radians(0.5), Radians(f64::INFINITY), Metres(0.0), Datum::Sk);
        assert!(matches!(
            point.to_cartesian(),
            Err(Error::MalformedInput { parameter: "longitude", .. })
        ));
        let point = GeodeticPoint::new(Radians(0.5), Radians(0.5), Metres(f64::NAN), Datum::Sk);
        assert!(matches!(
            point.to_cartesian(),
            Err(Error::MalformedInput { parameter: "height", .. })
        ));
    }

    #[test]
    fn test_iteration_does_not_converge() {
        assert_eq!(
            Err(Error::ConvergenceFailure {
                iterations: MAX_ITERATIONS
            }),
            iterate_latitude(0.7, 0.5, 0.5)
        );
    }

    #[test]
    fn test_point_near_centre() {
        // close to the centre e²a / 2r is far greater than one
        let point = CartesianPoint::new(1.0, 0.0, 1.0, Datum::Wgs84);
        assert!(matches!(
            cartesian_to_geodetic(&point),
            Err(Error::MalformedInput {
                parameter: "sin(s)",
                ..
            })
        ));
    }
}
