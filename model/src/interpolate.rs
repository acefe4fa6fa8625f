use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::connect::{self, TrackState};
use crate::segment::build_segment;
use crate::{Error, Method, Params, Ping, Segment, VesselName};

/// Pairing strategy. Both modes find the same connections for the same input;
/// batch trades an O(n²) per-vessel elapsed-time matrix for fewer rescans of
/// long tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Batch,
}

/// The result of one run: every segment, ascending by start index within each
/// vessel, plus the vessels that couldn't be processed at all.
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolation {
    pub segments: Vec<Segment>,
    pub skipped: Vec<(VesselName, String)>,
}

/// Turns a sorted ping sequence into interpolated segments. `pings` must
/// already be sorted by vessel, then ascending time. Resorting here would
/// shuffle the indices that segments hand back to callers, so unsorted input
/// is refused instead.
pub fn interpolate(pings: &[Ping], params: &Params) -> Result<Interpolation, Error> {
    precheck(pings, params)?;

    let mut output = Interpolation {
        segments: Vec::new(),
        skipped: Vec::new(),
    };
    for (lo, hi) in vessel_ranges(pings) {
        if hi - lo < 2 {
            let vessel = pings[lo].vessel.clone();
            warn!("Skipping {:?}: a track needs at least 2 pings", vessel);
            output.skipped.push((vessel, "fewer than 2 pings".to_string()));
            continue;
        }

        let connections = match params.mode {
            Mode::Sequential => sequential_connections(&pings[lo..hi], params),
            Mode::Batch => batch_connections(&pings[lo..hi], params),
        };
        if connections.is_empty() {
            // Not an error; this vessel just never reported on the target
            // cadence
            info!("No valid connections for {:?}", pings[lo].vessel);
        }
        for (start, end) in connections {
            output
                .segments
                .push(build_segment(pings, lo + start, lo + end, params));
        }
    }

    info!(
        "Interpolated {} segments from {} pings ({} vessels skipped)",
        output.segments.len(),
        pings.len(),
        output.skipped.len()
    );
    Ok(output)
}

fn precheck(pings: &[Ping], params: &Params) -> Result<(), Error> {
    if params.resolution < 2 {
        return Err(Error::PrecheckFailed(
            "resolution must be at least 2".to_string(),
        ));
    }
    if params.heading_adjustment > 1 {
        return Err(Error::PrecheckFailed(
            "heading adjustment must be 0 or 1".to_string(),
        ));
    }
    if params.method == Method::CubicHermiteSpline {
        // The spline normalizes speeds against the band midpoint
        let (low, high) = params.spline.speed_band;
        if low + high <= 0.0 {
            return Err(Error::PrecheckFailed(
                "speed band midpoint must be positive".to_string(),
            ));
        }
    }

    for pair in pings.windows(2) {
        let out_of_order = match pair[0].vessel.cmp(&pair[1].vessel) {
            Ordering::Less => false,
            Ordering::Equal => pair[0].time > pair[1].time,
            Ordering::Greater => true,
        };
        if out_of_order {
            return Err(Error::PrecheckFailed(
                "pings must be sorted by vessel, then ascending time".to_string(),
            ));
        }
    }
    Ok(())
}

// Half-open (start, end) index ranges, one per vessel
fn vessel_ranges(pings: &[Ping]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut lo = 0;
    for idx in 1..=pings.len() {
        if idx == pings.len() || pings[idx].vessel != pings[lo].vessel {
            ranges.push((lo, idx));
            lo = idx;
        }
    }
    ranges
}

/// One vessel transition at a time: search forward from the cursor, jump to
/// the accepted successor, or slide one ping forward after a gap. Only ever
/// holds the vessel's timestamps in memory.
fn sequential_connections(track: &[Ping], params: &Params) -> Vec<(usize, usize)> {
    let times: Vec<NaiveDateTime> = track.iter().map(|ping| ping.time).collect();

    let mut connections = Vec::new();
    let mut cursor = 0;
    loop {
        let (successor, state) =
            connect::find_successor(&times, cursor, params.interval, params.margin);
        match successor {
            Some(idx) => {
                connections.push((cursor, idx));
                cursor = idx;
            }
            None => {
                if state == TrackState::EndOfTrack {
                    break;
                }
                cursor += 1;
            }
        }
    }
    connections
}

/// Precomputes the vessel's full pairwise elapsed-time matrix, then walks it
/// left to right, jumping straight to each accepted successor. Indices
/// consumed as a successor are never revisited as a start.
fn batch_connections(track: &[Ping], params: &Params) -> Vec<(usize, usize)> {
    let n = track.len();
    // Row i answers "how many minutes from ping i to ping j"
    let mut elapsed = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            elapsed[i][j] = connect::elapsed_minutes(track[i].time, track[j].time);
        }
    }

    let mut connections = Vec::new();
    let mut cursor = 0;
    while cursor + 1 < n {
        let mut best: Option<(usize, f64)> = None;
        for j in cursor + 1..n {
            let minutes = elapsed[cursor][j];
            if minutes > params.interval + params.margin {
                break;
            }
            if minutes < params.interval - params.margin {
                continue;
            }
            let deviation = (minutes - params.interval).abs();
            if best.map(|(_, d)| deviation < d).unwrap_or(true) {
                best = Some((j, deviation));
            }
        }
        match best {
            Some((j, _)) => {
                connections.push((cursor, j));
                cursor = j;
            }
            None => {
                cursor += 1;
            }
        }
    }
    connections
}
