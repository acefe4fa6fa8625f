use anyhow::Result;
use chrono::NaiveDateTime;
use geom::LonLat;
use serde::Deserialize;

use crate::{geometry, Ping, VesselName};

// Consecutive reports further apart than this in degree space get flagged;
// VMS units occasionally emit a wild fix.
const JUMP_LIMIT_DEGREES: f64 = 5.0;

/// Reads raw VMS records and produces the sorted ping sequence the
/// interpolation core requires. Sorting happens here, before indices mean
/// anything downstream; the core itself refuses to reorder.
pub fn load<R: std::io::Read>(reader: R) -> Result<Vec<Ping>> {
    let mut pings = Vec::new();
    for (line, rec) in csv::Reader::from_reader(reader).deserialize().enumerate() {
        let rec: VmsRecord = rec?;
        let time = NaiveDateTime::parse_from_str(&rec.datetime, "%d/%m/%Y %H:%M:%S")
            .map_err(|err| anyhow!("record {}: {} ({})", line + 1, rec.datetime, err))?;
        pings.push(Ping {
            vessel: rec.vessel,
            pos: LonLat::new(rec.longitude, rec.latitude),
            speed: rec.speed,
            heading: rec.heading,
            time,
        });
    }

    pings.sort_by(|a, b| a.vessel.cmp(&b.vessel).then(a.time.cmp(&b.time)));

    for pair in pings.windows(2) {
        if pair[0].vessel != pair[1].vessel {
            continue;
        }
        let dist = geometry::planar_dist(
            pair[0].pos.x(),
            pair[0].pos.y(),
            pair[1].pos.x(),
            pair[1].pos.y(),
        );
        if dist > JUMP_LIMIT_DEGREES {
            warn!(
                "{:?} jumps {:.1} degrees between {} and {}",
                pair[0].vessel, dist, pair[0].time, pair[1].time
            );
        }
    }

    info!("Loaded {} pings", pings.len());
    Ok(pings)
}

#[derive(Deserialize)]
struct VmsRecord {
    #[serde(rename = "I_NCEE")]
    vessel: VesselName,
    #[serde(rename = "LAT")]
    latitude: f64,
    #[serde(rename = "LON")]
    longitude: f64,
    #[serde(rename = "SPE")]
    speed: f64,
    #[serde(rename = "HEA")]
    heading: Option<f64>,
    #[serde(rename = "DATE")]
    datetime: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_sorts_and_keeps_blank_headings() {
        let raw = "\
I_NCEE,LAT,LON,SPE,HEA,DATE
IT009,42.00,15.00,5.0,10,03/10/2014 00:30:00
IT001,44.10,12.10,3.5,,03/10/2014 01:00:00
IT001,44.00,12.00,3.0,80,03/10/2014 00:00:00
";
        let pings = load(raw.as_bytes()).unwrap();
        assert_eq!(pings.len(), 3);

        // Sorted by vessel, then time; IT001's midnight ping comes first
        assert_eq!(pings[0].pos.x(), 12.00);
        assert_eq!(pings[0].heading, Some(80.0));
        assert_eq!(pings[1].heading, None);
        assert_eq!(pings[1].time.to_string(), "2014-10-03 01:00:00");
        assert_eq!(pings[2].speed, 5.0);
    }

    #[test]
    fn bad_timestamps_are_rejected_with_the_record_number() {
        let raw = "\
I_NCEE,LAT,LON,SPE,HEA,DATE
IT001,44.00,12.00,3.0,80,2014-10-03T00:00:00
";
        let err = load(raw.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }
}
