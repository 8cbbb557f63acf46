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

//! gost-locator
//!
//! A library for locating an airborne relay point (a "drone") and the ground
//! target it observes from ranges and angles measured at two ground observer
//! stations, together with the geodetic machinery needed to express the
//! results on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid.
//!
//! ## Geodetic transformations
//!
//! The library supports four datums, see [`Datum`]:
//!
//! - WGS-84, the datum of the GPS satellite navigation system;
//! - PZ-90.11, the datum of the GLONASS satellite navigation system;
//! - GSK-2011, the Russian geodetic coordinate system;
//! - SK-42/95, the coordinate systems on the Krasovsky ellipsoid.
//!
//! Geodetic coordinates (latitude, longitude and height) are converted to and
//! from geocentric Cartesian coordinates by the [`cartesian`] module and
//! Cartesian coordinates are shifted between datums by the empirical
//! transformations of GOST 32453-2017 in the [`datum`] module.
//!
//! ## Gauss-Krueger projection
//!
//! Planar triangulation is only valid on a plane, so positions are projected
//! onto the six degree zones of the Gauss-Krueger projection of the Krasovsky
//! ellipsoid using the series of GOST 51794-2008, see the [`gauss_kruger`]
//! module. The zone number is held in the leading digits of the easting.
//!
//! ## Triangulation
//!
//! The [`triangulation`] module locates the drone by intersecting the range
//! circles about the observers and then locates the target by intersecting
//! the range circle about the drone with the circles through the target about
//! each observer, see the [`intersection`] module.
//!
//! The [`survey`] module joins the two: it derives the measurements of a known
//! scene and locates the drone and target from measurements taken at
//! observers with geodetic positions.
//!
//! ## Design
//!
//! Every calculation is a pure function of immutable values, so calculations
//! may run in parallel on any number of threads.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [thiserror](https://crates.io/crates/thiserror) - to define [`Error`].
//!
//! Geodetic functions take `Radians` while triangulation measurements are
//! in `Degrees`, so the compiler rejects accidental mixing of the two.

pub mod cartesian;
pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod gauss_kruger;
pub mod intersection;
pub mod sexagesimal;
pub mod survey;
pub mod triangulation;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use error::{Error, Result};
pub use icao_units::si::Metres;

use core::fmt;
use core::str::FromStr;

/// A geodetic datum: a reference ellipsoid and its anchoring to the earth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Datum {
    /// WGS-84 (G1150).
    Wgs84,
    /// GSK-2011.
    Gsk2011,
    /// PZ-90.11.
    Pz90,
    /// SK-42 / SK-95 on the Krasovsky ellipsoid.
    Sk,
}

impl Datum {
    /// All of the supported datums.
    pub const ALL: [Self; 4] = [Self::Wgs84, Self::Gsk2011, Self::Pz90, Self::Sk];

    /// The Semimajor axis and flattening of the datum's ellipsoid.
    /// # Examples
    /// ```
    /// use gost_locator::{Datum, Metres};
    ///
    /// let (a, f) = Datum::Sk.ellipsoid_params();
    /// assert_eq!(Metres(6_378_245.0), a);
    /// assert_eq!(1.0 / 298.3, f);
    /// ```
    #[must_use]
    pub const fn ellipsoid_params(self) -> (Metres, f64) {
        match self {
            Self::Wgs84 => (ellipsoid::WGS84_A, ellipsoid::WGS84_F),
            Self::Gsk2011 => (ellipsoid::GSK2011_A, ellipsoid::GSK2011_F),
            Self::Pz90 => (ellipsoid::PZ90_A, ellipsoid::PZ90_F),
            Self::Sk => (ellipsoid::KRASOVSKY_A, ellipsoid::KRASOVSKY_F),
        }
    }

    /// The `Ellipsoid` of the datum.
    #[must_use]
    pub fn ellipsoid(self) -> Ellipsoid {
        let (a, f) = self.ellipsoid_params();
        Ellipsoid::new(a, f)
    }

    /// The conventional name of the datum.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wgs84 => "WGS-84",
            Self::Gsk2011 => "GSK-2011",
            Self::Pz90 => "PZ-90.11",
            Self::Sk => "SK-42/95",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Datum {
    type Err = Error;

    /// Parse a datum name, ignoring case, spaces, hyphens, dots and slashes.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '.' | '/'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "wgs84" => Ok(Self::Wgs84),
            "gsk2011" => Ok(Self::Gsk2011),
            "pz90" | "pz9011" => Ok(Self::Pz90),
            "sk" | "sk42" | "sk95" | "sk4295" | "krasovsky" => Ok(Self::Sk),
            _ => Err(Error::UnknownDatum(s.to_owned())),
        }
    }
}

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            e_2: ellipsoid::calculate_sq_eccentricity(f),
        }
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The radius of curvature in the prime vertical at a latitude.
    /// * `sin_lat` - the sine of the geodetic latitude.
    #[must_use]
    pub fn prime_vertical_radius(&self, sin_lat: f64) -> Metres {
        ellipsoid::calculate_prime_vertical_radius(self.a, self.e_2, sin_lat)
    }
}

impl From<Datum> for Ellipsoid {
    fn from(datum: Datum) -> Self {
        datum.ellipsoid()
    }
}

/// A position in geodetic coordinates on a datum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticPoint {
    /// The geodetic latitude, in [-π/2, π/2].
    pub lat: Radians,
    /// The longitude; normalised to [0, 2π) by conversions from Cartesian.
    pub lon: Radians,
    /// The height above the ellipsoid.
    pub height: Metres,
    /// The datum of the coordinates.
    pub datum: Datum,
}

impl Validate for GeodeticPoint {
    /// Test whether a `GeodeticPoint` is valid.
    /// Whether its values are finite and -π/2 <= `lat` <= π/2.
    fn is_valid(&self) -> bool {
        self.lat.0.abs() <= core::f64::consts::FRAC_PI_2
            && self.lon.0.is_finite()
            && self.height.0.is_finite()
    }
}

impl GeodeticPoint {
    /// Constructor.
    #[must_use]
    pub const fn new(lat: Radians, lon: Radians, height: Metres, datum: Datum) -> Self {
        Self {
            lat,
            lon,
            height,
            datum,
        }
    }

    /// Construct a `GeodeticPoint` from a latitude and longitude in degrees.
    #[must_use]
    pub fn from_degrees(lat: Degrees, lon: Degrees, height: Metres, datum: Datum) -> Self {
        Self::new(
            Radians(lat.0.to_radians()),
            Radians(lon.0.to_radians()),
            height,
            datum,
        )
    }

    /// The latitude in degrees.
    #[must_use]
    pub fn lat_degrees(&self) -> Degrees {
        Degrees(self.lat.0.to_degrees())
    }

    /// The longitude in degrees.
    #[must_use]
    pub fn lon_degrees(&self) -> Degrees {
        Degrees(self.lon.0.to_degrees())
    }

    /// Convert to geocentric Cartesian coordinates on the same datum.
    ///
    /// # Errors
    ///
    /// `Error::MalformedInput` if a coordinate is not finite.
    pub fn to_cartesian(&self) -> Result<CartesianPoint> {
        cartesian::geodetic_to_cartesian(self)
    }
}

/// A position in geocentric Cartesian coordinates on a datum, in metres.
///
/// The axes are right-handed with their origin at the ellipsoid centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// The datum of the coordinates.
    pub datum: Datum,
}

impl CartesianPoint {
    /// Constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, datum: Datum) -> Self {
        Self { x, y, z, datum }
    }

    /// Convert to geodetic coordinates on the same datum.
    ///
    /// # Errors
    ///
    /// See [`cartesian::cartesian_to_geodetic`].
    pub fn to_geodetic(&self) -> Result<GeodeticPoint> {
        cartesian::cartesian_to_geodetic(self)
    }

    /// Shift the point to another datum.
    #[must_use]
    pub fn to_datum(&self, datum: Datum) -> Self {
        datum::transform(self, datum)
    }

    /// The Euclidean distance to another point, ignoring their datums.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        libm::sqrt(
            (self.x - other.x) * (self.x - other.x)
                + (self.y - other.y) * (self.y - other.y)
                + (self.z - other.z) * (self.z - other.z),
        )
    }
}

/// A position on the Gauss-Krueger plane, in metres.
///
/// `x` is the northing, `y` the easting with the zone number in its leading
/// digits: `zone = ⌊y × 10⁻⁶⌋`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    /// Constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The Gauss-Krueger zone number held in the leading digits of `y`.
    #[must_use]
    pub fn zone(&self) -> i32 {
        gauss_kruger::zone_of_easting(self.y)
    }

    /// The distance to another point on the plane.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        libm::hypot(self.x - other.x, self.y - other.y)
    }

    /// The point midway between this point and another.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Convert to WGS-84 geodetic coordinates.
    ///
    /// # Errors
    ///
    /// See [`gauss_kruger::from_gauss_kruger`].
    pub fn to_geodetic(&self) -> Result<GeodeticPoint> {
        gauss_kruger::from_gauss_kruger(self)
    }
}

/// A position on the Gauss-Krueger plane with a height, in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// The northing.
    pub x: f64,
    /// The easting.
    pub y: f64,
    /// The height.
    pub z: f64,
}

impl Position {
    /// Constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The horizontal position.
    #[must_use]
    pub const fn planar(&self) -> PlanarPoint {
        PlanarPoint::new(self.x, self.y)
    }

    /// The straight line (slant) distance to another position.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        libm::sqrt(
            (self.x - other.x) * (self.x - other.x)
                + (self.y - other.y) * (self.y - other.y)
                + (self.z - other.z) * (self.z - other.z),
        )
    }
}
