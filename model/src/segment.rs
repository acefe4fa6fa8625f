use std::str::FromStr;

use geom::LonLat;

use crate::{geometry, Error, Params, Ping, SplineParams};

/// How sampled points are placed between two paired pings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Independent linear interpolation of longitude and latitude
    StraightLine,
    /// Cubic Hermite curves with tangents derived from recorded speed and
    /// heading
    CubicHermiteSpline,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "straight line" => Ok(Method::StraightLine),
            "cubic Hermite spline" => Ok(Method::CubicHermiteSpline),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

/// The densified path for one accepted connection. `start` and `end` index
/// into the ping sequence the segment was built from; `points` runs from the
/// start ping's position to the end ping's position inclusive, with exactly
/// the configured resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub points: Vec<LonLat>,
}

/// Samples the path between `pings[start]` and `pings[end]`. The whole ping
/// slice is passed, not just the pair, because a heading adjustment of 1
/// pulls the arrival heading from the ping before the end index.
pub fn build_segment(pings: &[Ping], start: usize, end: usize, params: &Params) -> Segment {
    let points = match params.method {
        Method::StraightLine => straight_line(pings[start].pos, pings[end].pos, params.resolution),
        Method::CubicHermiteSpline => hermite(pings, start, end, params),
    };
    Segment { start, end, points }
}

fn straight_line(from: LonLat, to: LonLat, resolution: usize) -> Vec<LonLat> {
    let mut pts = Vec::with_capacity(resolution);
    for sample in 0..resolution {
        let t = sample as f64 / (resolution - 1) as f64;
        // The two-sided form lands exactly on the endpoints
        pts.push(LonLat::new(
            from.x() * (1.0 - t) + to.x() * t,
            from.y() * (1.0 - t) + to.y() * t,
        ));
    }
    pts
}

fn hermite(pings: &[Ping], start: usize, end: usize, params: &Params) -> Vec<LonLat> {
    let from = &pings[start];
    let to = &pings[end];

    // Longitude degrees shrink with latitude, so the north-south tangent
    // component gets stretched to match. Degenerate latitudes just skip the
    // correction.
    let aspect = match geometry::lon_lat_ratio((from.pos.y(), to.pos.y())) {
        Ok((x_ratio, y_ratio)) => x_ratio / y_ratio,
        Err(_) => 1.0,
    };

    let departure = tangent(from.heading, from.speed, &params.spline, aspect);
    let arrival = tangent(
        pings[end - params.heading_adjustment].heading,
        to.speed,
        &params.spline,
        aspect,
    );

    let mut pts = Vec::with_capacity(params.resolution);
    for sample in 0..params.resolution {
        let t = sample as f64 / (params.resolution - 1) as f64;
        let f00 = 2.0 * t.powi(3) - 3.0 * t.powi(2) + 1.0;
        let f10 = t.powi(3) - 2.0 * t.powi(2) + t;
        let f01 = -2.0 * t.powi(3) + 3.0 * t.powi(2);
        let f11 = t.powi(3) - t.powi(2);
        pts.push(LonLat::new(
            f00 * from.pos.x() + f10 * departure.0 + f01 * to.pos.x() + f11 * arrival.0,
            f00 * from.pos.y() + f10 * departure.1 + f01 * to.pos.y() + f11 * arrival.1,
        ));
    }
    pts
}

// A missing or unusable heading means due north; one bad transceiver field
// shouldn't kill the whole track.
fn tangent(heading: Option<f64>, speed: f64, spline: &SplineParams, aspect: f64) -> (f64, f64) {
    let theta = heading.filter(|h| h.is_finite()).unwrap_or(0.0).to_radians();
    let (low, high) = spline.speed_band;
    let midpoint = (low + high) / 2.0;
    let speed = if speed.is_finite() { speed } else { midpoint };
    let scale = spline.fm * speed / midpoint;
    (scale * theta.sin(), scale * theta.cos() * aspect)
}
