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

extern crate gost_locator;

use angle_sc::{is_within_tolerance, Degrees};
use gost_locator::survey::{locate_geodetic, measure_geodetic, project};
use gost_locator::triangulation::{locate, locate_by_rotation, Observer};
use gost_locator::{sexagesimal, Datum, Error, GeodeticPoint, Metres, Position};

/// Two observers about 1 km apart near Moscow, a drone about 720 m from
/// them and a target about 1.6 km beyond it.
fn scene() -> [GeodeticPoint; 4] {
    let point = |lat: f64, lon: f64, height: f64| {
        GeodeticPoint::from_degrees(Degrees(lat), Degrees(lon), Metres(height), Datum::Wgs84)
    };
    [
        point(55.75, 37.60, 150.0),
        point(55.759, 37.60, 180.0),
        point(55.7536, 37.60958, 600.0),
        point(55.7563, 37.62394, 120.0),
    ]
}

fn assert_same_position(expected: &GeodeticPoint, actual: &GeodeticPoint) {
    assert!(
        is_within_tolerance(expected.lat.0, actual.lat.0, 1e-8),
        "latitude expected: {:?} actual: {:?}",
        expected.lat_degrees(),
        actual.lat_degrees()
    );
    assert!(
        libm::remainder(expected.lon.0 - actual.lon.0, core::f64::consts::TAU).abs() < 1e-8,
        "longitude expected: {:?} actual: {:?}",
        expected.lon_degrees(),
        actual.lon_degrees()
    );
    assert!(
        is_within_tolerance(expected.height.0, actual.height.0, 1e-6),
        "height expected: {:?} actual: {:?}",
        expected.height,
        actual.height
    );
}

#[test]
fn test_geodetic_survey() {
    let [o1, o2, drone, target] = scene();

    let measurements = measure_geodetic(&o1, &o2, &drone, &target).unwrap();
    assert!(measurements.check().is_ok());
    assert!(is_within_tolerance(851.53, measurements.l1.0, 0.01));
    assert!(is_within_tolerance(948.57, measurements.l2.0, 0.01));
    assert!(is_within_tolerance(1_064.83, measurements.l3.0, 0.01));

    let fix = locate_geodetic(&o1, &o2, &measurements).unwrap();
    assert_eq!(Datum::Wgs84, fix.drone.datum);
    assert_same_position(&drone, &fix.drone);
    assert_same_position(&target, &fix.target);
}

#[test]
fn test_geodetic_survey_dms() {
    let [o1, o2, drone, target] = scene();
    let measurements = measure_geodetic(&o1, &o2, &drone, &target).unwrap();

    // observer positions as an operator would enter them
    let lat = sexagesimal::parse(&sexagesimal::format(o1.lat_degrees())).unwrap();
    let lon = sexagesimal::parse("37°36'00\"").unwrap();
    let entered = GeodeticPoint::from_degrees(lat, lon, o1.height, Datum::Wgs84);

    let fix = locate_geodetic(&entered, &o2, &measurements).unwrap();
    assert_same_position(&drone, &fix.drone);
    assert_same_position(&target, &fix.target);
}

#[test]
fn test_planar_and_rotation_agree() {
    let [o1, o2, drone, target] = scene();
    let measurements = measure_geodetic(&o1, &o2, &drone, &target).unwrap();

    let observer = |point: &GeodeticPoint| Observer::new(project(point).unwrap(), point.height);
    let (observer1, observer2) = (observer(&o1), observer(&o2));

    let result = locate(&observer1, &observer2, &measurements).unwrap();
    let rotated = locate_by_rotation(&observer1, &observer2, &measurements).unwrap();
    assert!(result.drone.distance(&rotated.drone) < 1e-6);
    assert!(result.target.distance(&rotated.target) < 1e-6);

    let planar = project(&target).unwrap();
    let expected = Position::new(planar.x, planar.y, target.height.0);
    assert!(expected.distance(&result.target) < 1e-6);
}

#[test]
fn test_inconsistent_measurements() {
    let [o1, o2, drone, target] = scene();
    let mut measurements = measure_geodetic(&o1, &o2, &drone, &target).unwrap();

    // the range circles about the observers no longer meet
    measurements.l1 = Metres(10.0);
    measurements.l2 = Metres(10.0);
    assert_eq!(
        Err(Error::NoIntersection),
        locate_geodetic(&o1, &o2, &measurements)
    );

    // the range circle about the second observer lies inside the first
    measurements.l1 = Metres(5_000.0);
    measurements.l2 = Metres(100.0);
    assert_eq!(
        Err(Error::Contained),
        locate_geodetic(&o1, &o2, &measurements)
    );
}
