use chrono::NaiveDateTime;

/// Where a successor search left one vessel's track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackState {
    /// Later pings remain for this vessel; a miss here is just a gap and the
    /// caller can retry from the next index.
    MorePings,
    /// The start index is the vessel's final ping.
    EndOfTrack,
}

pub fn elapsed_minutes(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Finds the ping that best continues the track from `times[start]`: among
/// later pings whose elapsed time lands within `interval` ± `margin` minutes,
/// the one closest to `interval` wins, ties going to the earliest candidate.
///
/// `times` is one vessel's series, ascending.
pub fn find_successor(
    times: &[NaiveDateTime],
    start: usize,
    interval: f64,
    margin: f64,
) -> (Option<usize>, TrackState) {
    if start + 1 >= times.len() {
        return (None, TrackState::EndOfTrack);
    }

    let mut best: Option<(usize, f64)> = None;
    for idx in start + 1..times.len() {
        let elapsed = elapsed_minutes(times[start], times[idx]);
        if elapsed > interval + margin {
            // Timestamps ascend, so everything past here is too late too
            break;
        }
        if elapsed < interval - margin {
            continue;
        }
        let deviation = (elapsed - interval).abs();
        if best.map(|(_, d)| deviation < d).unwrap_or(true) {
            best = Some((idx, deviation));
        }
    }

    (best.map(|(idx, _)| idx), TrackState::MorePings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn times(minutes: &[i64]) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2014, 10, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        minutes
            .iter()
            .map(|m| start + chrono::Duration::minutes(*m))
            .collect()
    }

    #[test]
    fn exact_interval_wins_for_any_margin() {
        let track = times(&[0, 90, 120, 150]);
        for margin in [0.0, 15.0, 60.0] {
            let (successor, _) = find_successor(&track, 0, 120.0, margin);
            assert_eq!(successor, Some(2));
        }
    }

    #[test]
    fn zero_margin_without_exact_match_misses() {
        let track = times(&[0, 119, 121]);
        let (successor, state) = find_successor(&track, 0, 120.0, 0.0);
        assert_eq!(successor, None);
        assert_eq!(state, TrackState::MorePings);
    }

    #[test]
    fn equally_distant_candidates_pick_the_earlier() {
        let track = times(&[0, 115, 125]);
        let (successor, _) = find_successor(&track, 0, 120.0, 15.0);
        assert_eq!(successor, Some(1));
    }

    #[test]
    fn last_ping_ends_the_track() {
        let track = times(&[0, 120]);
        let (successor, state) = find_successor(&track, 1, 120.0, 15.0);
        assert_eq!(successor, None);
        assert_eq!(state, TrackState::EndOfTrack);
    }

    #[test]
    fn out_of_band_candidates_are_ignored() {
        let track = times(&[0, 60, 300]);
        let (successor, state) = find_successor(&track, 0, 120.0, 15.0);
        assert_eq!(successor, None);
        assert_eq!(state, TrackState::MorePings);
    }
}
