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

//! The series module contains the coefficients of the Gauss-Krueger
//! projection of the Krasovsky ellipsoid given in GOST 51794-2008,
//! formulae 24 to 34.
//!
//! Each row holds the coefficients of a polynomial in `sin²(B)`, lowest
//! power first. The rows are the terms of a nested polynomial in `l²` for the
//! forward projection and in `z0²` for the inverse projection, so the
//! coefficients are standard truncations rather than values derived from the
//! ellipsoid parameters.

#![allow(clippy::unreadable_literal)]

/// The length of one radian of meridian arc at the equator of the Krasovsky
/// ellipsoid's rectifying sphere, in metres.
pub const MERIDIAN_RADIUS: f64 = 6_367_558.4968;

/// The Krasovsky Semimajor axis used by the easting series, in metres.
pub const SEMIMAJOR_AXIS: f64 = 6_378_245.0;

/// Northing series terms, formula 24.
pub const X_SERIES: [[f64; 4]; 5] = [
    [16002.8900, 66.9607, 0.3515, 0.0],
    [1594561.25, 5336.535, 26.790, 0.149],
    [672483.4, -811219.9, 5420.0, -10.6],
    [278194.0, -830174.0, 572434.0, -16010.0],
    [109500.0, -574700.0, 863700.0, -398600.0],
];

/// Easting series terms, formula 25.
pub const Y_SERIES: [[f64; 4]; 4] = [
    [6378245.0, 21346.1415, 107.1590, 0.5977],
    [1070204.16, -2136826.66, 17.98, -11.99],
    [270806.0, -1523417.0, 1327645.0, -21701.0],
    [79690.0, -866190.0, 1730360.0, -945460.0],
];

/// Footpoint latitude series, formula 32.
pub const FOOTPOINT_SERIES: [f64; 3] = [0.00252588685, -0.00001491860, 0.00000011904];

/// Latitude correction series terms, formula 33.
pub const DELTA_B_SERIES: [[f64; 4]; 4] = [
    [0.251684631, -0.003369263, 0.00001127, 0.0],
    [0.10500614, -0.04559916, 0.00228901, -0.00002987],
    [0.042858, -0.025318, 0.014346, -0.001264],
    [0.01672, -0.00630, 0.01188, -0.00328],
];

/// Longitude difference series terms, formula 34.
pub const L_SERIES: [[f64; 4]; 5] = [
    [1.0, -0.0033467108, -0.0000056002, -0.0000000187],
    [0.16778975, 0.16273586, -0.00052490, -0.00000846],
    [0.0420025, 0.1487407, 0.0059420, -0.0000150],
    [0.01225, 0.09477, 0.03282, -0.00034],
    [0.0038, 0.0524, 0.0482, -0.0032],
];

/// Evaluate a polynomial with Horner's method.
/// * `coeffs` - the coefficients, lowest power first.
/// * `x` - the variable.
/// # Examples
/// ```
/// use gost_locator::gauss_kruger::series::evaluate_polynomial;
///
/// // 1 + 2x + 3x²
/// assert_eq!(17.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0));
/// ```
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Evaluate a nested series `t0 + s·(t1 + s·(t2 + ...))` where each term
/// `ti` is a polynomial in `sin²(B)`.
/// * `terms` - the coefficients of the terms.
/// * `sq_sin` - `sin²(B)`.
/// * `s` - the nesting factor, e.g. `l²` or `-z0²`.
#[must_use]
pub fn evaluate_nested(terms: &[[f64; 4]], sq_sin: f64, s: f64) -> f64 {
    terms
        .iter()
        .rev()
        .fold(0.0, |acc, term| evaluate_polynomial(term, sq_sin) + s * acc)
}
