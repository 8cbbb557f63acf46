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

//! The gauss_kruger module contains the zonal Gauss-Krueger projection of
//! the Krasovsky ellipsoid (the SK-42/95 datum) as specified by
//! GOST 51794-2008.
//!
//! The projection divides the earth into 60 zones of 6° of longitude.
//! Zone `n` has its central meridian at `6n - 3` degrees east and positions in
//! the zone have eastings offset by `(10n + 5) × 100 000` metres, so the zone
//! number is held in the leading digits of the easting.
//!
//! WGS-84 positions are projected via the chain:
//!
//! WGS-84 geodetic → WGS-84 Cartesian → PZ-90.11 → SK-42/95 Cartesian →
//! SK-42/95 geodetic → zonal plane
//!
//! and the inverse chain is followed in reverse. Heights are not projected:
//! positions are taken on the surface of the ellipsoid.

#![allow(clippy::suboptimal_flops)]

pub mod series;

use crate::error::check_finite;
use crate::{datum, Datum, Degrees, Error, GeodeticPoint, Metres, PlanarPoint, Radians, Result};

/// The width of a zone in degrees.
pub const ZONE_WIDTH: Degrees = Degrees(6.0);

/// The number of zones.
pub const ZONES: i32 = 60;

/// The zone containing a longitude in [0°, 360°).
/// # Examples
/// ```
/// use gost_locator::Degrees;
/// use gost_locator::gauss_kruger::zone_of_longitude;
///
/// assert_eq!(1, zone_of_longitude(Degrees(0.0)));
/// assert_eq!(7, zone_of_longitude(Degrees(37.62)));
/// assert_eq!(60, zone_of_longitude(Degrees(359.9)));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn zone_of_longitude(lon: Degrees) -> i32 {
    libm::floor((ZONE_WIDTH.0 + lon.0) / ZONE_WIDTH.0) as i32
}

/// The central (axial) meridian of a zone.
#[must_use]
pub fn central_meridian(zone: i32) -> Degrees {
    Degrees(3.0 + ZONE_WIDTH.0 * f64::from(zone - 1))
}

/// The easting offset of a zone: `(10n + 5) × 100 000` metres.
#[must_use]
pub fn false_easting(zone: i32) -> f64 {
    f64::from(5 + 10 * zone) * 100_000.0
}

/// The zone number held in the leading digits of an easting.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn zone_of_easting(y: f64) -> i32 {
    libm::floor(y * 1e-6) as i32
}

/// Project a geodetic position on the Krasovsky ellipsoid onto its zone.
///
/// GOST 51794-2008 formulae 24 to 26.
/// * `lat` - the SK-42/95 latitude.
/// * `lon` - the SK-42/95 longitude in [0, 2π).
///
/// # Errors
///
/// `Error::MalformedInput` if a coordinate is not finite or the longitude is
/// outside [0, 2π).
pub fn sk_to_plane(lat: Radians, lon: Radians) -> Result<PlanarPoint> {
    let b = check_finite("latitude", lat.0)?;
    let zone = zone_of_longitude(Degrees(check_finite("longitude", lon.0)?.to_degrees()));
    if !(1..=ZONES).contains(&zone) {
        return Err(Error::MalformedInput {
            parameter: "longitude",
            value: lon.0,
        });
    }
    let l = lon.0 - central_meridian(zone).0.to_radians();
    let l_2 = l * l;

    let (sin_b, cos_b) = libm::sincos(b);
    let sq_sin_b = sin_b * sin_b;

    let x_terms = series::evaluate_polynomial(&series::X_SERIES[0], sq_sin_b)
        - l_2 * series::evaluate_nested(&series::X_SERIES[1..], sq_sin_b, l_2);
    let x = series::MERIDIAN_RADIUS * b - libm::sin(2.0 * b) * x_terms;

    let y = false_easting(zone)
        + l * cos_b * series::evaluate_nested(&series::Y_SERIES, sq_sin_b, l_2);

    Ok(PlanarPoint::new(x, y))
}

/// Convert a position on the plane to a geodetic position on the Krasovsky
/// ellipsoid.
///
/// GOST 51794-2008 formulae 29 to 36.
/// * `point` - the position on the plane, with its zone in `y`.
///
/// returns the SK-42/95 latitude and longitude.
///
/// # Errors
///
/// `Error::MalformedInput` if a coordinate is not finite or `y` does not hold
/// a zone number between 1 and 60.
pub fn plane_to_sk(point: &PlanarPoint) -> Result<(Radians, Radians)> {
    let x = check_finite("x", point.x)?;
    let y = check_finite("y", point.y)?;
    let zone = zone_of_easting(y);
    if !(1..=ZONES).contains(&zone) {
        return Err(Error::MalformedInput {
            parameter: "y",
            value: y,
        });
    }

    // the footpoint latitude
    let beta = x / series::MERIDIAN_RADIUS;
    let sin_beta = libm::sin(beta);
    let b0 = beta
        + libm::sin(2.0 * beta)
            * series::evaluate_polynomial(&series::FOOTPOINT_SERIES, sin_beta * sin_beta);

    let (sin_b0, cos_b0) = libm::sincos(b0);
    let sq_sin_b0 = sin_b0 * sin_b0;

    let z0 = (y - false_easting(zone)) / (series::SEMIMAJOR_AXIS * cos_b0);
    let z0_2 = z0 * z0;

    let delta_b = -z0_2
        * libm::sin(2.0 * b0)
        * series::evaluate_nested(&series::DELTA_B_SERIES, sq_sin_b0, -z0_2);
    let l = z0 * series::evaluate_nested(&series::L_SERIES, sq_sin_b0, -z0_2);

    Ok((
        Radians(b0 + delta_b),
        Radians(central_meridian(zone).0.to_radians() + l),
    ))
}

/// Project a WGS-84 position onto the Gauss-Krueger plane.
/// * `lat` - the WGS-84 latitude.
/// * `lon` - the WGS-84 longitude.
///
/// # Errors
///
/// `Error::MalformedInput` if a coordinate is not finite or the latitude is
/// outside [-π/2, π/2], `Error::ConvergenceFailure` from the SK-42/95
/// geodetic conversion.
///
/// # Examples
/// ```
/// use gost_locator::{gauss_kruger, Degrees, Radians};
///
/// // Moscow
/// let lat = Radians(55.75_f64.to_radians());
/// let lon = Radians(37.62_f64.to_radians());
/// let point = gauss_kruger::to_gauss_kruger(lat, lon).unwrap();
/// assert_eq!(7, point.zone());
/// assert!((point.x - 6_181_690.17).abs() < 0.01);
/// assert!((point.y - 7_413_460.73).abs() < 0.01);
/// ```
pub fn to_gauss_kruger(lat: Radians, lon: Radians) -> Result<PlanarPoint> {
    let lat = check_finite("latitude", lat.0)?;
    if lat.abs() > core::f64::consts::FRAC_PI_2 {
        return Err(Error::MalformedInput {
            parameter: "latitude",
            value: lat,
        });
    }
    let lon = check_finite("longitude", lon.0)?;

    let wgs84 = GeodeticPoint::new(Radians(lat), Radians(lon), Metres(0.0), Datum::Wgs84);
    let pz90 = datum::wgs84_to_pz90(&wgs84.to_cartesian()?);
    let sk = datum::pz90_to_sk(&pz90).to_geodetic()?;
    sk_to_plane(sk.lat, sk.lon)
}

/// Convert a position on the Gauss-Krueger plane to WGS-84.
/// * `point` - the position on the plane, with its zone in `y`.
///
/// returns the WGS-84 position. Its height is the WGS-84 height of the
/// point on the surface of the Krasovsky ellipsoid.
///
/// # Errors
///
/// `Error::MalformedInput` if `point` is invalid, see [`plane_to_sk`],
/// `Error::ConvergenceFailure` from the WGS-84 geodetic conversion.
pub fn from_gauss_kruger(point: &PlanarPoint) -> Result<GeodeticPoint> {
    let (lat, lon) = plane_to_sk(point)?;
    let sk = GeodeticPoint::new(lat, lon, Metres(0.0), Datum::Sk);
    let pz90 = datum::sk_to_pz90(&sk.to_cartesian()?);
    datum::pz90_to_wgs84(&pz90).to_geodetic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    fn wrap(angle: f64) -> f64 {
        libm::remainder(angle, core::f64::consts::TAU)
    }

    #[test]
    fn test_zones() {
        assert_eq!(1, zone_of_longitude(Degrees(5.999)));
        assert_eq!(2, zone_of_longitude(Degrees(6.0)));
        assert_eq!(Degrees(39.0), central_meridian(7));
        assert_eq!(Degrees(357.0), central_meridian(60));
        assert_eq!(7_500_000.0, false_easting(7));
        assert_eq!(60_500_000.0, false_easting(60));
        assert_eq!(7, zone_of_easting(7_413_460.73));
        assert_eq!(7, zone_of_easting(7_000_000.0));
        assert_eq!(12, zone_of_easting(12_650_000.0));
    }

    #[test]
    fn test_sk_to_plane_on_central_meridian() {
        // On the central meridian the easting is the zone's offset and the
        // northing is the meridian arc length.
        let lon = Radians(central_meridian(7).0.to_radians());
        let equator = sk_to_plane(Radians(0.0), lon).unwrap();
        assert_eq!(0.0, equator.x);
        assert_eq!(7_500_000.0, equator.y);

        let point = sk_to_plane(Radians(45.0_f64.to_radians()), lon).unwrap();
        assert!((point.y - 7_500_000.0).abs() < 1e-6);
        // the Krasovsky meridian arc from the equator to 45°N
        assert!((point.x - 4_985_032.29).abs() < 0.01);
    }

    #[test]
    fn test_sk_plane_round_trip() {
        for lat in [-70.0, -20.0, 0.5, 33.3, 55.75, 78.0] {
            for offset in [-2.9, -1.0, 0.0, 1.5, 2.9] {
                let lat = Radians(f64::to_radians(lat));
                let lon = Radians((central_meridian(7).0 + offset).to_radians());
                let point = sk_to_plane(lat, lon).unwrap();
                assert_eq!(7, point.zone());
                let (b, l) = plane_to_sk(&point).unwrap();
                assert!(is_within_tolerance(lat.0, b.0, 1e-8));
                assert!(is_within_tolerance(lon.0, l.0, 1e-8));
            }
        }
    }

    #[test]
    fn test_wgs84_round_trip() {
        for (lat, lon) in [(55.75, 37.62), (-33.9, 151.2), (0.3, 200.5), (70.1, 359.5)] {
            let lat = Radians(f64::to_radians(lat));
            let lon = Radians(f64::to_radians(lon));
            let point = to_gauss_kruger(lat, lon).unwrap();
            let result = from_gauss_kruger(&point).unwrap();
            assert_eq!(Datum::Wgs84, result.datum);
            assert!(is_within_tolerance(lat.0, result.lat.0, 1e-8));
            assert!(wrap(lon.0 - result.lon.0).abs() < 1e-8);
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            to_gauss_kruger(Radians(f64::NAN), Radians(0.5)),
            Err(Error::MalformedInput {
                parameter: "latitude",
                ..
            })
        ));
        assert!(matches!(
            to_gauss_kruger(Radians(2.0), Radians(0.5)),
            Err(Error::MalformedInput {
                parameter: "latitude",
                ..
            })
        ));
        assert!(matches!(
            sk_to_plane(Radians(0.5), Radians(7.0)),
            Err(Error::MalformedInput {
                parameter: "longitude",
                ..
            })
        ));
        assert!(matches!(
            from_gauss_kruger(&PlanarPoint::new(6_181_690.0, 413_460.0)),
            Err(Error::MalformedInput { parameter: "y", .. })
        ));
        assert!(matches!(
            from_gauss_kruger(&PlanarPoint::new(f64::INFINITY, 7_413_460.0)),
            Err(Error::MalformedInput { parameter: "x", .. })
        ));
    }
}
