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

//! The triangulation module locates a drone and the ground target that it
//! observes from measurements taken at two ground observers.
//!
//! The measurements are:
//!
//! - `l1`, `l2`: the slant ranges from the observers to the drone;
//! - `l3`: the slant range from the drone to the target;
//! - `a`, `b`: the signed horizontal angles at the drone between the
//!   directions to each observer and the direction to the target;
//! - `aa`, `bb`: the elevation angles between the drone and each observer,
//!   such that `observer height - sin(aa)·l1` is the drone height;
//! - `cc`: the elevation angle from the drone to the target.
//!
//! The drone is located at an intersection of the horizontal range circles
//! about the observers. The side of the baseline between the observers is
//! given by the sign of `a - b` normalised to (-180°, 180°].
//!
//! The target is located on the horizontal range circle about the drone.
//! The law of cosines gives the horizontal range from each observer to the
//! target, so each observer yields a pair of candidate target positions.
//! The target is the mean of the closest pair of candidates from different
//! observers.

#![allow(clippy::suboptimal_flops)]

use crate::error::{check_finite, check_non_negative};
use crate::intersection::intersect_circles;
use crate::{Angle, Degrees, Error, Metres, PlanarPoint, Position, Result};
use core::f64::consts::{PI, TAU};

/// The maximum magnitude of an elevation angle.
pub const MAX_ELEVATION: Degrees = Degrees(90.0);

/// A ground observer station on the Gauss-Krueger plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
    /// The horizontal position of the observer.
    pub position: PlanarPoint,
    /// The height of the observer.
    pub height: Metres,
}

impl Observer {
    /// Constructor.
    #[must_use]
    pub const fn new(position: PlanarPoint, height: Metres) -> Self {
        Self { position, height }
    }

    /// The position of the observer, including its height.
    #[must_use]
    pub const fn to_position(&self) -> Position {
        Position::new(self.position.x, self.position.y, self.height.0)
    }
}

impl From<Position> for Observer {
    fn from(position: Position) -> Self {
        Self::new(position.planar(), Metres(position.z))
    }
}

/// The ranges and angles measured at the observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurements {
    /// The slant range from the first observer to the drone.
    pub l1: Metres,
    /// The slant range from the second observer to the drone.
    pub l2: Metres,
    /// The slant range from the drone to the target.
    pub l3: Metres,
    /// The horizontal angle at the drone from the first observer to the target.
    pub a: Degrees,
    /// The horizontal angle at the drone from the second observer to the target.
    pub b: Degrees,
    /// The elevation angle between the drone and the first observer.
    pub aa: Degrees,
    /// The elevation angle between the drone and the second observer.
    pub bb: Degrees,
    /// The elevation angle from the drone to the target.
    pub cc: Degrees,
}

impl Measurements {
    /// Check that the ranges are finite and not negative, the horizontal
    /// angles are finite and the elevation angles are within ±90°.
    ///
    /// # Errors
    ///
    /// `Error::MalformedInput` naming the first invalid measurement.
    pub fn check(&self) -> Result<()> {
        check_non_negative("l1", self.l1.0)?;
        check_non_negative("l2", self.l2.0)?;
        check_non_negative("l3", self.l3.0)?;
        check_finite("a", self.a.0)?;
        check_finite("b", self.b.0)?;
        check_elevation("aa", self.aa)?;
        check_elevation("bb", self.bb)?;
        check_elevation("cc", self.cc)?;
        Ok(())
    }
}

fn check_elevation(parameter: &'static str, angle: Degrees) -> Result<Degrees> {
    let value = check_finite(parameter, angle.0)?;
    if value.abs() <= MAX_ELEVATION.0 {
        Ok(angle)
    } else {
        Err(Error::MalformedInput { parameter, value })
    }
}

/// The positions of the drone and the target on the Gauss-Krueger plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangulationResult {
    pub drone: Position,
    pub target: Position,
}

/// The index of the drone's position among the intersections of the range
/// circles about the observers.
///
/// returns 1 if `a - b`, normalised to (-180°, 180°], is positive, 0 otherwise.
#[must_use]
pub fn drone_side(a: Degrees, b: Degrees) -> usize {
    let delta = (PI + PI * (a.0 - b.0) / 180.0).rem_euclid(TAU) - PI;
    usize::from(delta > 0.0)
}

/// The drone position and its horizontal ranges from the observers.
struct DroneFix {
    position: Position,
    l1: f64,
    l2: f64,
}

fn locate_drone(o1: &Observer, o2: &Observer, m: &Measurements) -> Result<DroneFix> {
    check_finite("o1 height", o1.height.0)?;
    check_finite("o2 height", o2.height.0)?;
    m.check()?;

    let aa = Angle::from(m.aa);
    let bb = Angle::from(m.bb);

    let height = ((o1.height.0 - aa.sin().0 * m.l1.0) + (o2.height.0 - bb.sin().0 * m.l2.0)) / 2.0;
    let l1 = m.l1.0 * aa.cos().0;
    let l2 = m.l2.0 * bb.cos().0;

    let candidates = intersect_circles(&o1.position, l1, &o2.position, l2, height)?;
    Ok(DroneFix {
        position: candidates[drone_side(m.a, m.b)],
        l1,
        l2,
    })
}

/// The horizontal range between the ends of two horizontal ranges from a
/// common point with the angle `angle` between them.
fn law_of_cosines(r1: f64, r2: f64, angle: Degrees) -> f64 {
    // cos is even, so the sign of the angle does not matter
    let cos_angle = Angle::from(angle).cos().0;
    libm::sqrt((r1 * r1 + r2 * r2 - 2.0 * r1 * r2 * cos_angle).max(0.0))
}

/// The mean of the closest pair of candidates, one from each slice.
/// Ties are resolved in favour of the first pair in the order
/// (0,0), (0,1), (1,0), (1,1).
fn closest_pair_midpoint(points1: &[Position; 2], points2: &[Position; 2]) -> PlanarPoint {
    let mut best = (f64::INFINITY, points1[0].planar());
    for p in points1 {
        for q in points2 {
            let separation = p.planar().distance(&q.planar());
            if separation < best.0 {
                best = (separation, p.planar().midpoint(&q.planar()));
            }
        }
    }
    best.1
}

/// Locate the drone and the target from the measurements taken at two
/// observers.
/// * `o1`, `o2` - the observers.
/// * `measurements` - the ranges and angles measured at the observers.
///
/// returns the drone and target positions on the Gauss-Krueger plane of the
/// observers, with their heights.
///
/// # Errors
///
/// `Error::MalformedInput` if an observer or measurement is invalid,
/// `Error::NoIntersection`, `Error::Contained` or `Error::Coincident` if the
/// measurements are inconsistent with any real configuration.
///
/// # Examples
/// ```
/// use gost_locator::triangulation::{locate, Measurements, Observer};
/// use gost_locator::{Degrees, Metres, PlanarPoint};
///
/// let o1 = Observer::new(PlanarPoint::new(0.0, 0.0), Metres(0.0));
/// let o2 = Observer::new(PlanarPoint::new(0.0, 600.0), Metres(0.0));
///
/// // a level drone at (400, 300) observing a target at (800, 300)
/// let measurements = Measurements {
///     l1: Metres(500.0),
///     l2: Metres(500.0),
///     l3: Metres(400.0),
///     a: Degrees(-143.130_102_354_155_98),
///     b: Degrees(143.130_102_354_155_98),
///     aa: Degrees(0.0),
///     bb: Degrees(0.0),
///     cc: Degrees(0.0),
/// };
/// let result = locate(&o1, &o2, &measurements).unwrap();
/// assert!((result.drone.x - 400.0).abs() < 1e-6);
/// assert!((result.drone.y - 300.0).abs() < 1e-6);
/// assert!((result.target.x - 800.0).abs() < 1e-6);
/// assert!((result.target.y - 300.0).abs() < 1e-6);
/// ```
pub fn locate(o1: &Observer, o2: &Observer, measurements: &Measurements) -> Result<TriangulationResult> {
    let drone = locate_drone(o1, o2, measurements)?;
    let drone_position = drone.position.planar();

    let cc = Angle::from(measurements.cc);
    let l3 = measurements.l3.0 * cc.cos().0;
    let r1 = law_of_cosines(drone.l1, l3, measurements.a);
    let r2 = law_of_cosines(drone.l2, l3, measurements.b);

    let points1 = intersect_circles(&drone_position, l3, &o1.position, r1, 0.0)?;
    let points2 = intersect_circles(&drone_position, l3, &o2.position, r2, 0.0)?;
    let target = closest_pair_midpoint(&points1, &points2);

    Ok(TriangulationResult {
        drone: drone.position,
        target: Position::new(
            target.x,
            target.y,
            drone.position.z + measurements.l3.0 * cc.sin().0,
        ),
    })
}

/// Rotate the horizontal direction from the drone to an observer by `-angle`
/// and scale it to the horizontal range of the target.
fn rotate_towards_target(
    drone: &PlanarPoint,
    observer: &PlanarPoint,
    range: f64,
    angle: Degrees,
    target_range: f64,
) -> PlanarPoint {
    let rotation = Angle::from(Degrees(-angle.0));
    let (sin_r, cos_r) = (rotation.sin().0, rotation.cos().0);
    let dx = observer.x - drone.x;
    let dy = observer.y - drone.y;
    let scale = target_range / range;
    PlanarPoint::new(
        drone.x + scale * (dx * cos_r - dy * sin_r),
        drone.y + scale * (dx * sin_r + dy * cos_r),
    )
}

/// Locate the drone and the target by rotating the directions from the
/// drone to each observer through the measured horizontal angles.
///
/// The drone is located as by [`locate`]; the target is the mean of the
/// two rotated positions. This is a cross-check of [`locate`]: the two agree
/// for consistent measurements.
///
/// # Errors
///
/// As [`locate`], and `Error::MalformedInput` if the drone is directly above
/// an observer, so the direction to the observer is undefined.
pub fn locate_by_rotation(
    o1: &Observer,
    o2: &Observer,
    measurements: &Measurements,
) -> Result<TriangulationResult> {
    let drone = locate_drone(o1, o2, measurements)?;
    let drone_position = drone.position.planar();
    for (parameter, range) in [("l1", drone.l1), ("l2", drone.l2)] {
        if range <= 0.0 {
            return Err(Error::MalformedInput {
                parameter,
                value: range,
            });
        }
    }

    let cc = Angle::from(measurements.cc);
    let l3 = measurements.l3.0 * cc.cos().0;
    let target1 = rotate_towards_target(&drone_position, &o1.position, drone.l1, measurements.a, l3);
    let target2 = rotate_towards_target(&drone_position, &o2.position, drone.l2, measurements.b, l3);
    let target = target1.midpoint(&target2);

    Ok(TriangulationResult {
        drone: drone.position,
        target: Position::new(
            target.x,
            target.y,
            drone.position.z + measurements.l3.0 * cc.sin().0,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::measure;

    const TOLERANCE: f64 = 1e-6;

    fn observers() -> (Observer, Observer) {
        (
            Observer::new(PlanarPoint::new(0.0, 0.0), Metres(100.0)),
            Observer::new(PlanarPoint::new(1_000.0, 0.0), Metres(100.0)),
        )
    }

    fn assert_close(expected: &Position, actual: &Position) {
        assert!(
            expected.distance(actual) < TOLERANCE,
            "expected {expected:?} actual {actual:?}"
        );
    }

    fn check_scene(drone: Position, target: Position) {
        let (o1, o2) = observers();
        let measurements = measure(&o1, &o2, &drone, &target);

        let result = locate(&o1, &o2, &measurements).unwrap();
        assert_close(&drone, &result.drone);
        assert_close(&target, &result.target);

        let rotated = locate_by_rotation(&o1, &o2, &measurements).unwrap();
        assert_close(&result.drone, &rotated.drone);
        assert_close(&result.target, &rotated.target);
    }

    #[test]
    fn test_drone_side() {
        assert_eq!(0, drone_side(Degrees(164.7449), Degrees(-116.5651)));
        assert_eq!(1, drone_side(Degrees(-164.7449), Degrees(116.5651)));
        assert_eq!(0, drone_side(Degrees(-28.1416), Degrees(74.5388)));
        assert_eq!(1, drone_side(Degrees(10.0), Degrees(-10.0)));
        assert_eq!(0, drone_side(Degrees(10.0), Degrees(10.0)));
        // 180° normalises to -180°
        assert_eq!(0, drone_side(Degrees(90.0), Degrees(-90.0)));
    }

    #[test]
    fn test_locate_target_beyond_drone() {
        check_scene(
            Position::new(400.0, 600.0, 350.0),
            Position::new(700.0, 1_500.0, 20.0),
        );
    }

    #[test]
    fn test_locate_mirrored_scene() {
        check_scene(
            Position::new(400.0, -600.0, 350.0),
            Position::new(700.0, -1_500.0, 20.0),
        );
    }

    #[test]
    fn test_locate_target_across_baseline() {
        check_scene(
            Position::new(500.0, 400.0, 300.0),
            Position::new(200.0, -300.0, 0.0),
        );
    }

    #[test]
    fn test_locate_measured_values() {
        let (o1, o2) = observers();
        let measurements = Measurements {
            l1: Metres(763.2169),
            l2: Metres(884.5903),
            l3: Metres(1_004.4401),
            a: Degrees(164.7449),
            b: Degrees(-116.5651),
            aa: Degrees(-19.1208),
            bb: Degrees(-16.4164),
            cc: Degrees(-19.1803),
        };
        let result = locate(&o1, &o2, &measurements).unwrap();
        assert!(result.drone.distance(&Position::new(400.0, 600.0, 350.0)) < 0.01);
        assert!(result.target.distance(&Position::new(700.0, 1_500.0, 20.0)) < 0.01);
    }

    #[test]
    fn test_locate_infeasible() {
        let (o1, o2) = observers();
        let measurements = Measurements {
            l1: Metres(100.0),
            l2: Metres(100.0),
            l3: Metres(50.0),
            a: Degrees(10.0),
            b: Degrees(-10.0),
            aa: Degrees(0.0),
            bb: Degrees(0.0),
            cc: Degrees(0.0),
        };
        assert_eq!(Err(Error::NoIntersection), locate(&o1, &o2, &measurements));
        assert_eq!(
            Err(Error::NoIntersection),
            locate_by_rotation(&o1, &o2, &measurements)
        );
    }

    #[test]
    fn test_locate_malformed() {
        let (o1, o2) = observers();
        let valid = measure(
            &o1,
            &o2,
            &Position::new(400.0, 600.0, 350.0),
            &Position::new(700.0, 1_500.0, 20.0),
        );
        assert!(valid.check().is_ok());

        let mut measurements = valid;
        measurements.l2 = Metres(-1.0);
        assert!(matches!(
            locate(&o1, &o2, &measurements),
            Err(Error::MalformedInput { parameter: "l2", .. })
        ));

        let mut measurements = valid;
        measurements.cc = Degrees(90.5);
        assert!(matches!(
            locate(&o1, &o2, &measurements),
            Err(Error::MalformedInput { parameter: "cc", .. })
        ));

        let mut measurements = valid;
        measurements.a = Degrees(f64::NAN);
        assert!(matches!(
            locate(&o1, &o2, &measurements),
            Err(Error::MalformedInput { parameter: "a", .. })
        ));

        let high = Observer::new(o1.position, Metres(f64::INFINITY));
        assert!(matches!(
            locate(&high, &o2, &valid),
            Err(Error::MalformedInput {
                parameter: "o1 height",
                ..
            })
        ));
    }

    #[test]
    fn test_observer_position() {
        let position = Position::new(1.0, 2.0, 3.0);
        let observer = Observer::from(position);
        assert_eq!(PlanarPoint::new(1.0, 2.0), observer.position);
        assert_eq!(Metres(3.0), observer.height);
        assert_eq!(position, observer.to_position());
    }
}
