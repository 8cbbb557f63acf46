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

//! The datum module shifts geocentric Cartesian coordinates between the
//! WGS-84, PZ-90.11, GSK-2011 and SK-42/95 datums using the empirical
//! transformations of GOST 32453-2017.
//!
//! Each transformation is a near identity 3×3 matrix (its off diagonal terms
//! are small rotations) followed by a translation: `v' = M·v + t`.
//!
//! The published constants of each direction are fitted independently, so a
//! transformation is **not** the exact inverse of the transformation in the
//! opposite direction: the constants below are reproduced as published.
//!
//! Transformations are published between PZ-90.11 and each of the other
//! datums, so shifts between WGS-84, GSK-2011 and SK-42/95 go via PZ-90.11.

#![allow(clippy::suboptimal_flops)]

use crate::{CartesianPoint, Datum};

/// An empirical transformation of Cartesian coordinates between two datums.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatumShift {
    /// The datum of the coordinates to shift.
    from: Datum,
    /// The datum of the shifted coordinates.
    to: Datum,
    /// The near identity matrix, row major.
    matrix: [[f64; 3]; 3],
    /// The translation, in metres.
    translation: [f64; 3],
}

impl DatumShift {
    /// Constructor.
    #[must_use]
    pub const fn new(
        from: Datum,
        to: Datum,
        matrix: [[f64; 3]; 3],
        translation: [f64; 3],
    ) -> Self {
        Self {
            from,
            to,
            matrix,
            translation,
        }
    }

    /// The datum of the coordinates to shift.
    #[must_use]
    pub const fn from(&self) -> Datum {
        self.from
    }

    /// The datum of the shifted coordinates.
    #[must_use]
    pub const fn to(&self) -> Datum {
        self.to
    }

    /// Shift a point, the point's datum should be `from`.
    /// * `point` - the point to shift.
    ///
    /// returns the point in the `to` datum.
    #[must_use]
    pub fn apply(&self, point: &CartesianPoint) -> CartesianPoint {
        debug_assert_eq!(self.from, point.datum);

        let v = [point.x, point.y, point.z];
        let row = |i: usize| {
            let m = &self.matrix[i];
            m[0] * v[0] + m[1] * v[1] + m[2] * v[2] + self.translation[i]
        };
        CartesianPoint::new(row(0), row(1), row(2), self.to)
    }
}

/// WGS-84 (G1150) to PZ-90.11.
pub const WGS84_TO_PZ90: DatumShift = DatumShift::new(
    Datum::Wgs84,
    Datum::Pz90,
    [
        [1.0, -2.041_066e-8, -1.716_240e-8],
        [2.041_066e-8, 1.0, -1.115_071e-8],
        [1.716_240e-8, 1.115_071e-8, 1.0],
    ],
    [-0.003, 0.001, 0.000],
);

/// PZ-90.11 to WGS-84 (G1150).
pub const PZ90_TO_WGS84: DatumShift = DatumShift::new(
    Datum::Pz90,
    Datum::Wgs84,
    [
        [1.0, 2.041_066e-8, 1.716_240e-8],
        [-2.041_066e-8, 1.0, 1.115_071e-8],
        [-1.716_240e-8, -1.115_071e-8, 1.0],
    ],
    [0.003, 0.001, 0.000],
);

/// PZ-90.11 to GSK-2011.
pub const PZ90_TO_GSK2011: DatumShift = DatumShift::new(
    Datum::Pz90,
    Datum::Gsk2011,
    [
        [1.0, -2.569_51e-10, -9.211_46e-11],
        [2.569_513e-10, 1.0, -2.724_65e-9],
        [9.211_460e-11, -2.724_65e-9, 1.0],
    ],
    [0.000, -0.014, 0.008],
);

/// GSK-2011 to PZ-90.11.
pub const GSK2011_TO_PZ90: DatumShift = DatumShift::new(
    Datum::Gsk2011,
    Datum::Pz90,
    [
        [1.0, 2.569_513e-10, 9.211_460e-11],
        [-2.569_513e-10, 1.0, 2.724_653e-9],
        [-9.211_460e-11, -2.724_653e-9, 1.0],
    ],
    [0.000, 0.014, -0.008],
);

/// PZ-90.11 to SK-42/95.
pub const PZ90_TO_SK: DatumShift = DatumShift::new(
    Datum::Pz90,
    Datum::Sk,
    [
        [1.0, 6.506_684e-7, 1.716_240e-8],
        [-6.506_684e-7, 1.0, 1.115_071e-8],
        [-1.716_240e-8, -1.115_071e-8, 1.0],
    ],
    [-24.457, 130.784, 81.538],
);

/// SK-42/95 to PZ-90.11.
pub const SK_TO_PZ90: DatumShift = DatumShift::new(
    Datum::Sk,
    Datum::Pz90,
    [
        [1.0, -6.506_684e-7, -1.716_240e-8],
        [6.506_684e-7, 1.0, -1.115_071e-8],
        [1.716_240e-8, 1.115_071e-8, 1.0],
    ],
    [24.457, -130.784, -81.538],
);

/// Shift a point from WGS-84 to PZ-90.11.
#[must_use]
pub fn wgs84_to_pz90(point: &CartesianPoint) -> CartesianPoint {
    WGS84_TO_PZ90.apply(point)
}

/// Shift a point from PZ-90.11 to WGS-84.
#[must_use]
pub fn pz90_to_wgs84(point: &CartesianPoint) -> CartesianPoint {
    PZ90_TO_WGS84.apply(point)
}

/// Shift a point from PZ-90.11 to GSK-2011.
#[must_use]
pub fn pz90_to_gsk2011(point: &CartesianPoint) -> CartesianPoint {
    PZ90_TO_GSK2011.apply(point)
}

/// Shift a point from GSK-2011 to PZ-90.11.
#[must_use]
pub fn gsk2011_to_pz90(point: &CartesianPoint) -> CartesianPoint {
    GSK2011_TO_PZ90.apply(point)
}

/// Shift a point from PZ-90.11 to SK-42/95.
#[must_use]
pub fn pz90_to_sk(point: &CartesianPoint) -> CartesianPoint {
    PZ90_TO_SK.apply(point)
}

/// Shift a point from SK-42/95 to PZ-90.11.
#[must_use]
pub fn sk_to_pz90(point: &CartesianPoint) -> CartesianPoint {
    SK_TO_PZ90.apply(point)
}

/// The published transformation from PZ-90.11 to a datum, if any.
const fn from_pz90(to: Datum) -> Option<DatumShift> {
    match to {
        Datum::Wgs84 => Some(PZ90_TO_WGS84),
        Datum::Gsk2011 => Some(PZ90_TO_GSK2011),
        Datum::Sk => Some(PZ90_TO_SK),
        Datum::Pz90 => None,
    }
}

/// The published transformation from a datum to PZ-90.11, if any.
const fn to_pz90(from: Datum) -> Option<DatumShift> {
    match from {
        Datum::Wgs84 => Some(WGS84_TO_PZ90),
        Datum::Gsk2011 => Some(GSK2011_TO_PZ90),
        Datum::Sk => Some(SK_TO_PZ90),
        Datum::Pz90 => None,
    }
}

/// Shift a point to another datum, via PZ-90.11 unless either datum is
/// PZ-90.11.
/// * `point` - the point to shift.
/// * `to` - the datum to shift the point to.
/// # Examples
/// ```
/// use gost_locator::{datum, CartesianPoint, Datum};
///
/// let wgs84 = CartesianPoint::new(2_850_000.0, 2_200_000.0, 5_250_000.0, Datum::Wgs84);
/// let sk = datum::transform(&wgs84, Datum::Sk);
/// assert_eq!(Datum::Sk, sk.datum);
/// assert_eq!(datum::pz90_to_sk(&datum::wgs84_to_pz90(&wgs84)), sk);
/// ```
#[must_use]
pub fn transform(point: &CartesianPoint, to: Datum) -> CartesianPoint {
    if point.datum == to {
        return *point;
    }

    let pz90 = to_pz90(point.datum).map_or(*point, |shift| shift.apply(point));
    from_pz90(to).map_or(pz90, |shift| shift.apply(&pz90))
}
