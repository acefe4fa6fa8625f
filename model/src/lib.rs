#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod connect;
pub mod export;
mod geometry;
mod interpolate;
mod segment;
pub mod vms;

use chrono::NaiveDateTime;
use geom::LonLat;
use serde::Deserialize;

pub use self::connect::{find_successor, TrackState};
pub use self::export::write_geojson;
pub use self::geometry::{lon_lat_ratio, planar_dist};
pub use self::interpolate::{interpolate, Interpolation, Mode};
pub use self::segment::{build_segment, Method, Segment};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct VesselName(String);

/// One VMS position report. Immutable once loaded; the interpolation core
/// only ever reads these and produces new output.
#[derive(Clone, Debug, PartialEq)]
pub struct Ping {
    pub vessel: VesselName,
    pub pos: LonLat,
    /// Speed over ground in knots
    pub speed: f64,
    /// Compass degrees, clockwise from north. Not every transceiver reports
    /// it.
    pub heading: Option<f64>,
    pub time: NaiveDateTime,
}

/// Everything configuring one interpolation run. No hidden defaults; callers
/// spell out every knob.
#[derive(Clone, Debug)]
pub struct Params {
    /// Target minutes between paired pings
    pub interval: f64,
    /// Tolerance around the interval, in minutes
    pub margin: f64,
    /// Sampled points per segment, endpoints included. At least 2.
    pub resolution: usize,
    pub method: Method,
    pub spline: SplineParams,
    /// 0 or 1. With 1, the arrival tangent of each segment uses the heading
    /// recorded one ping before the end of the pair, for feeds where a
    /// ping's heading is the bearing into the point rather than out of it.
    pub heading_adjustment: usize,
    pub mode: Mode,
}

#[derive(Clone, Debug)]
pub struct SplineParams {
    /// Tangent strength; bigger values bow the curve further off the chord
    pub fm: f64,
    /// Not read by the spline itself; passed through to consumers that weight
    /// tangents by inter-ping distance
    pub distance_scale: f64,
    /// Same as distance_scale, the sigmoid midpoint of that weighting
    pub sigmoid_line: f64,
    /// (low, high) knots; tangents scale by each ping's speed relative to the
    /// midpoint of this band
    pub speed_band: (f64, f64),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The run can't start: unsorted input or nonsensical configuration.
    #[error("precheck failed: {0}")]
    PrecheckFailed(String),
    /// Unrecognized interpolation method string.
    #[error("unsupported interpolation method {0:?}")]
    UnsupportedMethod(String),
    /// Coordinates too degenerate to derive a tangent correction from.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

#[cfg(test)]
pub(crate) fn test_ping(
    vessel: &str,
    lon: f64,
    lat: f64,
    speed: f64,
    heading: Option<f64>,
    minutes: i64,
) -> Ping {
    use chrono::NaiveDate;

    let start = NaiveDate::from_ymd_opt(2014, 10, 3)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    Ping {
        vessel: VesselName(vessel.to_string()),
        pos: LonLat::new(lon, lat),
        speed,
        heading,
        time: start + chrono::Duration::minutes(minutes),
    }
}
