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

//! The `intersection` module contains the function for calculating the
//! intersection points of a pair of circles on the Gauss-Krueger plane.
//!
//! Two circles with centres a distance `d` apart and radii `r1` and `r2`
//! intersect iff `|r1 - r2| <= d <= r1 + r2`, unless they are coincident.
//!
//! The intersection points lie on the radical line of the circles, a
//! distance `a = (r1² - r2² + d²) / 2d` from the first centre along the line
//! of centres, and a distance `h = sqrt(r1² - a²)` either side of it, see
//! [Circle-Circle Intersection](https://mathworld.wolfram.com/Circle-CircleIntersection.html).

#![allow(clippy::suboptimal_flops)]

use crate::error::{check_finite, check_non_negative};
use crate::{Error, PlanarPoint, Position, Result};

/// Calculate the intersection points of two circles.
///
/// The first point is to the left of the line from `centre1` to `centre2`
/// (the line direction rotated by +90°) and the second point is to the right
/// (rotated by -90°). Callers select points by index, so the order is part
/// of the contract. Tangent circles return the tangent point twice.
/// * `centre1`, `radius1` - the first circle.
/// * `centre2`, `radius2` - the second circle.
/// * `height` - the height given to the intersection points.
///
/// # Errors
///
/// `Error::NoIntersection` if the circles are too far apart,
/// `Error::Contained` if one circle is inside the other,
/// `Error::Coincident` if the circles are identical,
/// `Error::MalformedInput` if a value is not finite or a radius is negative.
///
/// # Examples
/// ```
/// use gost_locator::{intersection, PlanarPoint};
///
/// let [p0, p1] = intersection::intersect_circles(
///     &PlanarPoint::new(0.0, 0.0), 5.0,
///     &PlanarPoint::new(8.0, 0.0), 5.0,
///     0.0,
/// ).unwrap();
/// assert_eq!((4.0, 3.0), (p0.x, p0.y));
/// assert_eq!((4.0, -3.0), (p1.x, p1.y));
/// ```
pub fn intersect_circles(
    centre1: &PlanarPoint,
    radius1: f64,
    centre2: &PlanarPoint,
    radius2: f64,
    height: f64,
) -> Result<[Position; 2]> {
    let x1 = check_finite("x1", centre1.x)?;
    let y1 = check_finite("y1", centre1.y)?;
    let x2 = check_finite("x2", centre2.x)?;
    let y2 = check_finite("y2", centre2.y)?;
    let r1 = check_non_negative("radius1", radius1)?;
    let r2 = check_non_negative("radius2", radius2)?;
    let height = check_finite("height", height)?;

    let dx = x2 - x1;
    let dy = y2 - y1;
    let d = libm::hypot(dx, dy);

    if d > r1 + r2 {
        return Err(Error::NoIntersection);
    }
    if d < libm::fabs(r1 - r2) {
        return Err(Error::Contained);
    }
    if d == 0.0 {
        // d < |r1 - r2| is false, so the radii are equal
        return Err(Error::Coincident);
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    // may be slightly negative at tangency
    let h = libm::sqrt((r1 * r1 - a * a).max(0.0));

    let x_mid = x1 + a * dx / d;
    let y_mid = y1 + a * dy / d;
    let x_offset = h * dy / d;
    let y_offset = h * dx / d;

    Ok([
        Position::new(x_mid - x_offset, y_mid + y_offset, height),
        Position::new(x_mid + x_offset, y_mid - y_offset, height),
    ])
}
