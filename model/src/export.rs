use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::{Ping, Segment};

/// One LineString feature per segment, with the vessel, the pair's indices,
/// and the pair's timestamps as properties. `pings` must be the same sequence
/// the segments were built from; their indices point into it.
pub fn to_geojson(pings: &[Ping], segments: &[Segment]) -> GeoJson {
    let mut features = Vec::new();
    for segment in segments {
        let from = &pings[segment.start];
        let to = &pings[segment.end];

        let mut feature = Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                segment
                    .points
                    .iter()
                    .map(|pt| vec![pt.x(), pt.y()])
                    .collect(),
            ))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("vessel", from.vessel.0.clone());
        feature.set_property("start_index", segment.start);
        feature.set_property("end_index", segment.end);
        feature.set_property("start_time", from.time.to_string());
        feature.set_property("end_time", to.time.to_string());
        features.push(feature);
    }

    GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn write_geojson(path: String, pings: &[Ping], segments: &[Segment]) -> Result<()> {
    let gj = to_geojson(pings, segments);
    std::fs::write(path, serde_json::to_string_pretty(&gj)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{interpolate, test_ping, Method, Mode, Params, SplineParams};

    #[test]
    fn one_feature_per_segment_with_indices() {
        let pings = vec![
            test_ping("IT001", 12.0, 44.0, 3.0, Some(80.0), 0),
            test_ping("IT001", 12.3, 44.2, 4.0, Some(90.0), 121),
            test_ping("IT001", 12.6, 44.4, 2.0, Some(120.0), 245),
        ];
        let output = interpolate(
            &pings,
            &Params {
                interval: 120.0,
                margin: 15.0,
                resolution: 10,
                method: Method::StraightLine,
                spline: SplineParams {
                    fm: 0.5,
                    distance_scale: 20.0,
                    sigmoid_line: 0.1,
                    speed_band: (2.0, 5.0),
                },
                heading_adjustment: 0,
                mode: Mode::Sequential,
            },
        )
        .unwrap();

        match to_geojson(&pings, &output.segments) {
            GeoJson::FeatureCollection(fc) => {
                assert_eq!(fc.features.len(), 2);
                let first = &fc.features[0];
                assert_eq!(
                    first.property("vessel").unwrap().as_str().unwrap(),
                    "IT001"
                );
                assert_eq!(first.property("start_index").unwrap(), 0);
                assert_eq!(first.property("end_index").unwrap(), 1);
            }
            _ => unreachable!(),
        }
    }
}
