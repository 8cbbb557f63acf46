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

//! The command line interface of `gost-locator`.
//!
//! Scenes and locate requests are JSON files. Angles may be numbers in
//! decimal degrees or text in degrees, minutes and seconds, e.g.
//!
//! ```json
//! {
//!   "o1": { "lat": "55°45'00\"", "lon": 37.6, "height": 150.0 },
//!   "o2": { "lat": 55.759, "lon": 37.6, "height": 180.0, "datum": "PZ-90.11" },
//!   "measurements": {
//!     "l1": 851.535, "l2": 948.568, "l3": 1064.827,
//!     "a": 164.773115, "b": -116.563326,
//!     "aa": -31.901303, "bb": -26.280915, "cc": -26.793577
//!   }
//! }
//! ```
//!
//! `measure` reads a scene of four points (`o1`, `o2`, `drone` and `target`)
//! and writes a locate request, so its output may be passed to `locate`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gost_locator::triangulation::Measurements;
use gost_locator::{
    gauss_kruger, sexagesimal, survey, Datum, Degrees, GeodeticPoint, Metres, PlanarPoint,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The number of decimal places of lengths in metres.
pub const METRE_DECIMALS: u8 = 3;

/// Locate a drone and its target from two observer stations.
#[derive(Parser, Debug)]
#[command(name = "gost-locator")]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter, used when RUST_LOG is not set
    #[arg(long, global = true, env = "GOST_LOCATOR_LOG", default_value = "warn")]
    pub log_level: String,

    /// Decimal places of angles in degrees
    #[arg(long, global = true, env = "GOST_LOCATOR_DECIMALS", default_value_t = 6)]
    pub decimals: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub const fn precision(&self) -> Precision {
        Precision {
            degrees: self.decimals,
            metres: METRE_DECIMALS,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project a position onto the Gauss-Krueger plane
    Project(ProjectArgs),

    /// Convert a Gauss-Krueger position to WGS-84
    Unproject(UnprojectArgs),

    /// Derive the measurements of a scene of known positions
    Measure(FileArgs),

    /// Locate the drone and target from the measurements in a request
    Locate(FileArgs),
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Latitude, decimal degrees or degrees, minutes and seconds
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude, decimal degrees or degrees, minutes and seconds
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,

    /// Datum of the position
    #[arg(long, default_value = "WGS-84")]
    pub datum: String,
}

#[derive(Args, Debug)]
pub struct UnprojectArgs {
    /// Northing in metres
    #[arg(long, allow_hyphen_values = true)]
    pub x: f64,

    /// Easting in metres, with the zone number in its leading digits
    #[arg(long)]
    pub y: f64,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// The JSON file
    pub path: PathBuf,
}

/// Output rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    pub degrees: u8,
    pub metres: u8,
}

impl Precision {
    fn degrees(self, value: f64) -> f64 {
        round(value, self.degrees)
    }

    fn metres(self, value: f64) -> f64 {
        round(value, self.metres)
    }
}

fn round(value: f64, decimals: u8) -> f64 {
    let scale = 10.0_f64.powi(i32::from(decimals));
    (value * scale).round() / scale
}

/// An angle in decimal degrees or degrees, minutes and seconds text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleValue {
    Degrees(f64),
    Text(String),
}

impl AngleValue {
    fn to_degrees(&self) -> gost_locator::Result<Degrees> {
        match self {
            Self::Degrees(value) => Ok(Degrees(*value)),
            Self::Text(text) => sexagesimal::parse(text),
        }
    }
}

/// A geodetic position, WGS-84 unless a datum is given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub lat: AngleValue,
    pub lon: AngleValue,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum: Option<String>,
}

impl PointRecord {
    fn to_point(&self, name: &str) -> Result<GeodeticPoint> {
        let datum = match &self.datum {
            Some(datum) => datum
                .parse::<Datum>()
                .with_context(|| format!("{name}: invalid datum"))?,
            None => Datum::Wgs84,
        };
        let lat = self
            .lat
            .to_degrees()
            .with_context(|| format!("{name}: invalid latitude"))?;
        let lon = self
            .lon
            .to_degrees()
            .with_context(|| format!("{name}: invalid longitude"))?;
        Ok(GeodeticPoint::from_degrees(lat, lon, Metres(self.height), datum))
    }
}

/// The ranges (metres) and angles measured at the observers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementsRecord {
    pub l1: f64,
    pub l2: f64,
    pub l3: f64,
    pub a: AngleValue,
    pub b: AngleValue,
    pub aa: AngleValue,
    pub bb: AngleValue,
    pub cc: AngleValue,
}

impl MeasurementsRecord {
    fn new(m: &Measurements, precision: Precision) -> Self {
        let angle = |value: Degrees| AngleValue::Degrees(precision.degrees(value.0));
        Self {
            l1: precision.metres(m.l1.0),
            l2: precision.metres(m.l2.0),
            l3: precision.metres(m.l3.0),
            a: angle(m.a),
            b: angle(m.b),
            aa: angle(m.aa),
            bb: angle(m.bb),
            cc: angle(m.cc),
        }
    }

    fn to_measurements(&self) -> Result<Measurements> {
        let angle = |name: &str, value: &AngleValue| {
            value
                .to_degrees()
                .with_context(|| format!("measurements: invalid angle {name}"))
        };
        Ok(Measurements {
            l1: Metres(self.l1),
            l2: Metres(self.l2),
            l3: Metres(self.l3),
            a: angle("a", &self.a)?,
            b: angle("b", &self.b)?,
            aa: angle("aa", &self.aa)?,
            bb: angle("bb", &self.bb)?,
            cc: angle("cc", &self.cc)?,
        })
    }
}

/// The known positions of the observers, drone and target.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Scene {
    pub o1: PointRecord,
    pub o2: PointRecord,
    pub drone: PointRecord,
    pub target: PointRecord,
}

/// The observers and the measurements taken at them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocateRequest {
    pub o1: PointRecord,
    pub o2: PointRecord,
    pub measurements: MeasurementsRecord,
}

/// A position on the Gauss-Krueger plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanarRecord {
    pub x: f64,
    pub y: f64,
    pub zone: i32,
}

/// A WGS-84 position, with its angles in both decimal degrees and degrees,
/// minutes and seconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionRecord {
    pub lat: f64,
    pub lon: f64,
    pub height: f64,
    pub lat_dms: String,
    pub lon_dms: String,
}

impl PositionRecord {
    fn new(point: &GeodeticPoint, precision: Precision) -> Self {
        let lat = point.lat_degrees();
        // (-180°, 180°]
        let lon = Degrees(libm::remainder(point.lon_degrees().0, 360.0));
        Self {
            lat: precision.degrees(lat.0),
            lon: precision.degrees(lon.0),
            height: precision.metres(point.height.0),
            lat_dms: sexagesimal::format(lat),
            lon_dms: sexagesimal::format(lon),
        }
    }
}

/// The WGS-84 positions of the drone and target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FixRecord {
    pub drone: PositionRecord,
    pub target: PositionRecord,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to write JSON")
}

/// Project a position onto the Gauss-Krueger plane.
pub fn project(args: &ProjectArgs, precision: Precision) -> Result<PlanarRecord> {
    debug!(lat = %args.lat, lon = %args.lon, datum = %args.datum, "project");
    let record = PointRecord {
        lat: AngleValue::Text(args.lat.clone()),
        lon: AngleValue::Text(args.lon.clone()),
        height: 0.0,
        datum: Some(args.datum.clone()),
    };
    let point = record.to_point("position")?;
    let planar = survey::project(&point).context("projection failed")?;
    let zone = planar.zone();
    info!(zone, x = planar.x, y = planar.y, "projected");

    Ok(PlanarRecord {
        x: precision.metres(planar.x),
        y: precision.metres(planar.y),
        zone,
    })
}

/// Convert a Gauss-Krueger position to WGS-84.
pub fn unproject(args: &UnprojectArgs, precision: Precision) -> Result<PositionRecord> {
    debug!(x = args.x, y = args.y, "unproject");
    let point = gauss_kruger::from_gauss_kruger(&PlanarPoint::new(args.x, args.y))
        .context("inverse projection failed")?;
    info!(
        lat = point.lat_degrees().0,
        lon = point.lon_degrees().0,
        "unprojected"
    );
    Ok(PositionRecord::new(&point, precision))
}

/// Derive the measurements of a scene.
pub fn measure(scene: &Scene, precision: Precision) -> Result<LocateRequest> {
    debug!(?scene, "measure");
    let o1 = scene.o1.to_point("o1")?;
    let o2 = scene.o2.to_point("o2")?;
    let drone = scene.drone.to_point("drone")?;
    let target = scene.target.to_point("target")?;

    let measurements =
        survey::measure_geodetic(&o1, &o2, &drone, &target).context("measurement failed")?;
    info!(
        l1 = measurements.l1.0,
        l2 = measurements.l2.0,
        l3 = measurements.l3.0,
        "measured"
    );

    Ok(LocateRequest {
        o1: scene.o1.clone(),
        o2: scene.o2.clone(),
        measurements: MeasurementsRecord::new(&measurements, precision),
    })
}

/// Locate the drone and target of a request.
pub fn locate(request: &LocateRequest, precision: Precision) -> Result<FixRecord> {
    debug!(?request, "locate");
    let o1 = request.o1.to_point("o1")?;
    let o2 = request.o2.to_point("o2")?;
    let measurements = request.measurements.to_measurements()?;

    let fix = survey::locate_geodetic(&o1, &o2, &measurements).context("triangulation failed")?;
    info!(
        drone_lat = fix.drone.lat_degrees().0,
        drone_lon = fix.drone.lon_degrees().0,
        target_lat = fix.target.lat_degrees().0,
        target_lon = fix.target.lon_degrees().0,
        "located"
    );

    Ok(FixRecord {
        drone: PositionRecord::new(&fix.drone, precision),
        target: PositionRecord::new(&fix.target, precision),
    })
}

/// Run a command, returning its JSON output.
pub fn run(command: &Command, precision: Precision) -> Result<String> {
    match command {
        Command::Project(args) => to_json(&project(args, precision)?),
        Command::Unproject(args) => to_json(&unproject(args, precision)?),
        Command::Measure(args) => to_json(&measure(&read_json(&args.path)?, precision)?),
        Command::Locate(args) => to_json(&locate(&read_json(&args.path)?, precision)?),
    }
}
