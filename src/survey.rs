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

//! The survey module joins the geodetic transformations to the triangulation.
//!
//! A survey has two passes:
//!
//! - [`measure`] and [`measure_geodetic`] derive the ranges and angles that
//!   the observers would measure of a drone and target at known positions;
//! - [`locate_geodetic`] projects the observers onto the Gauss-Krueger plane,
//!   locates the drone and target from the measurements and returns their
//!   WGS-84 positions.
//!
//! All four points of a survey must lie in the same Gauss-Krueger zone.

use crate::error::check_finite;
use crate::gauss_kruger::to_gauss_kruger;
use crate::triangulation::{locate, Measurements, Observer};
use crate::{Angle, Datum, Degrees, Error, GeodeticPoint, Metres, PlanarPoint, Position, Result};

/// The WGS-84 positions of a drone and its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticFix {
    pub drone: GeodeticPoint,
    pub target: GeodeticPoint,
}

/// The signed horizontal angle at `vertex` from the direction of `from` to
/// the direction of `to`, positive clockwise.
fn horizontal_angle(vertex: &PlanarPoint, from: &PlanarPoint, to: &PlanarPoint) -> Degrees {
    let (ux, uy) = (from.x - vertex.x, from.y - vertex.y);
    let (vx, vy) = (to.x - vertex.x, to.y - vertex.y);
    let cross = ux * vy - uy * vx;
    let dot = ux * vx + uy * vy;
    Degrees::from(Angle::from_y_x(-cross, dot))
}

/// The elevation angle from `from` to `to`.
fn elevation_angle(from: &Position, to: &Position) -> Degrees {
    let horizontal = from.planar().distance(&to.planar());
    Degrees::from(Angle::from_y_x(to.z - from.z, horizontal))
}

/// Derive the measurements of a drone and target at known positions.
/// * `o1`, `o2` - the observers.
/// * `drone`, `target` - the positions of the drone and target on the plane
///   of the observers.
///
/// returns the measurements from which [`locate`] finds `drone` and `target`.
#[must_use]
pub fn measure(o1: &Observer, o2: &Observer, drone: &Position, target: &Position) -> Measurements {
    let p1 = o1.to_position();
    let p2 = o2.to_position();
    let d = drone.planar();
    let t = target.planar();

    Measurements {
        l1: Metres(p1.distance(drone)),
        l2: Metres(p2.distance(drone)),
        l3: Metres(drone.distance(target)),
        a: horizontal_angle(&d, &o1.position, &t),
        b: horizontal_angle(&d, &o2.position, &t),
        aa: elevation_angle(drone, &p1),
        bb: elevation_angle(drone, &p2),
        cc: elevation_angle(drone, target),
    }
}

/// Project a geodetic point onto the Gauss-Krueger plane, shifting it to
/// WGS-84 first if necessary.
///
/// # Errors
///
/// `Error::MalformedInput` naming the latitude, longitude or height of an
/// invalid point, see also [`to_gauss_kruger`].
pub fn project(point: &GeodeticPoint) -> Result<PlanarPoint> {
    let lat = check_finite("latitude", point.lat.0)?;
    if lat.abs() > core::f64::consts::FRAC_PI_2 {
        return Err(Error::MalformedInput {
            parameter: "latitude",
            value: lat,
        });
    }
    check_finite("longitude", point.lon.0)?;
    check_finite("height", point.height.0)?;

    if point.datum == Datum::Wgs84 {
        to_gauss_kruger(point.lat, point.lon)
    } else {
        let wgs84 = point.to_cartesian()?.to_datum(Datum::Wgs84).to_geodetic()?;
        to_gauss_kruger(wgs84.lat, wgs84.lon)
    }
}

fn check_zone(parameter: &'static str, zone: i32, point: &PlanarPoint) -> Result<()> {
    let point_zone = point.zone();
    if point_zone == zone {
        Ok(())
    } else {
        Err(Error::MalformedInput {
            parameter,
            value: f64::from(point_zone),
        })
    }
}

/// Derive the measurements of a drone and target at known geodetic positions.
/// * `o1`, `o2` - the positions of the observers.
/// * `drone`, `target` - the positions of the drone and target.
///
/// # Errors
///
/// `Error::MalformedInput` if a point is invalid or the points are not all in
/// the zone of `o1`, see also [`to_gauss_kruger`].
pub fn measure_geodetic(
    o1: &GeodeticPoint,
    o2: &GeodeticPoint,
    drone: &GeodeticPoint,
    target: &GeodeticPoint,
) -> Result<Measurements> {
    let p1 = project(o1)?;
    let zone = p1.zone();
    let p2 = project(o2)?;
    check_zone("o2 zone", zone, &p2)?;
    let pd = project(drone)?;
    check_zone("drone zone", zone, &pd)?;
    let pt = project(target)?;
    check_zone("target zone", zone, &pt)?;

    let observer1 = Observer::new(p1, Metres(check_finite("o1 height", o1.height.0)?));
    let observer2 = Observer::new(p2, Metres(check_finite("o2 height", o2.height.0)?));
    let drone = Position::new(pd.x, pd.y, check_finite("drone height", drone.height.0)?);
    let target = Position::new(pt.x, pt.y, check_finite("target height", target.height.0)?);

    Ok(measure(&observer1, &observer2, &drone, &target))
}

/// Convert a triangulated position on the plane to WGS-84, keeping its
/// triangulated height.
fn to_wgs84(position: &Position) -> Result<GeodeticPoint> {
    let mut point = position.planar().to_geodetic()?;
    point.height = Metres(position.z);
    Ok(point)
}

/// Locate a drone and its target from measurements taken at observers at
/// known geodetic positions.
/// * `o1`, `o2` - the positions of the observers.
/// * `measurements` - the ranges and angles measured at the observers.
///
/// returns the WGS-84 positions of the drone and target.
///
/// # Errors
///
/// `Error::MalformedInput` if an observer is invalid or the observers are in
/// different zones, see also [`locate`].
pub fn locate_geodetic(
    o1: &GeodeticPoint,
    o2: &GeodeticPoint,
    measurements: &Measurements,
) -> Result<GeodeticFix> {
    let p1 = project(o1)?;
    let p2 = project(o2)?;
    check_zone("o2 zone", p1.zone(), &p2)?;

    let result = locate(
        &Observer::new(p1, o1.height),
        &Observer::new(p2, o2.height),
        measurements,
    )?;

    Ok(GeodeticFix {
        drone: to_wgs84(&result.drone)?,
        target: to_wgs84(&result.target)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_horizontal_angle() {
        let vertex = PlanarPoint::new(0.0, 0.0);
        let from = PlanarPoint::new(1.0, 0.0);

        // clockwise in the x, y plane is negative y
        let angle = horizontal_angle(&vertex, &from, &PlanarPoint::new(0.0, -1.0));
        assert!(is_within_tolerance(90.0, angle.0, 1e-12));
        let angle = horizontal_angle(&vertex, &from, &PlanarPoint::new(0.0, 1.0));
        assert!(is_within_tolerance(-90.0, angle.0, 1e-12));
        let angle = horizontal_angle(&vertex, &from, &PlanarPoint::new(2.0, 0.0));
        assert_eq!(0.0, angle.0);
    }

    #[test]
    fn test_measure() {
        let o1 = Observer::new(PlanarPoint::new(0.0, 0.0), Metres(100.0));
        let o2 = Observer::new(PlanarPoint::new(1_000.0, 0.0), Metres(100.0));
        let drone = Position::new(400.0, 600.0, 350.0);
        let target = Position::new(700.0, 1_500.0, 20.0);

        let m = measure(&o1, &o2, &drone, &target);
        assert!(is_within_tolerance(763.2169, m.l1.0, 1e-4));
        assert!(is_within_tolerance(884.5903, m.l2.0, 1e-4));
        assert!(is_within_tolerance(1_004.4401, m.l3.0, 1e-4));
        assert!(is_within_tolerance(164.7449, m.a.0, 1e-4));
        assert!(is_within_tolerance(-116.5651, m.b.0, 1e-4));
        assert!(is_within_tolerance(-19.1208, m.aa.0, 1e-4));
        assert!(is_within_tolerance(-16.4164, m.bb.0, 1e-4));
        assert!(is_within_tolerance(-19.1803, m.cc.0, 1e-4));

        // the observer heights are recovered from the drone height
        let aa = Angle::from(m.aa);
        assert!(is_within_tolerance(
            drone.z,
            o1.height.0 - aa.sin().0 * m.l1.0,
            1e-9
        ));
    }

    #[test]
    fn test_project_other_datum() {
        let wgs84 = GeodeticPoint::from_degrees(Degrees(55.75), Degrees(37.62), Metres(0.0), Datum::Wgs84);
        let pz90 = wgs84.to_cartesian().unwrap().to_datum(Datum::Pz90).to_geodetic().unwrap();

        let expected = project(&wgs84).unwrap();
        let result = project(&pz90).unwrap();
        assert!(expected.distance(&result) < 0.01);
    }

    #[test]
    fn test_zone_mismatch() {
        let o1 = GeodeticPoint::from_degrees(Degrees(55.75), Degrees(35.95), Metres(0.0), Datum::Wgs84);
        let o2 = GeodeticPoint::from_degrees(Degrees(55.75), Degrees(36.05), Metres(0.0), Datum::Wgs84);
        let measurements = Measurements {
            l1: Metres(1_000.0),
            l2: Metres(1_000.0),
            l3: Metres(500.0),
            a: Degrees(30.0),
            b: Degrees(-30.0),
            aa: Degrees(0.0),
            bb: Degrees(0.0),
            cc: Degrees(0.0),
        };
        assert_eq!(
            Err(Error::MalformedInput {
                parameter: "o2 zone",
                value: 7.0
            }),
            locate_geodetic(&o1, &o2, &measurements)
        );
        assert!(matches!(
            measure_geodetic(&o1, &o1, &o2, &o1),
            Err(Error::MalformedInput {
                parameter: "drone zone",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_point() {
        let point = GeodeticPoint::new(
            crate::Radians(2.0),
            crate::Radians(0.5),
            Metres(0.0),
            Datum::Wgs84,
        );
        assert!(matches!(
            project(&point),
            Err(Error::MalformedInput {
                parameter: "latitude",
                ..
            })
        ));

        let point = GeodeticPoint::new(
            crate::Radians(1.0),
            crate::Radians(f64::NAN),
            Metres(0.0),
            Datum::Pz90,
        );
        assert!(matches!(
            project(&point),
            Err(Error::MalformedInput {
                parameter: "longitude",
                ..
            })
        ));

        let point = GeodeticPoint::new(
            crate::Radians(1.0),
            crate::Radians(0.5),
            Metres(f64::INFINITY),
            Datum::Sk,
        );
        assert!(matches!(
            project(&point),
            Err(Error::MalformedInput {
                parameter: "height",
                ..
            })
        ));
    }
}
