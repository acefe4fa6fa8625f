use crate::Error;

/// Euclidean distance in (longitude, latitude) degree space. Deliberately not
/// geodesic; callers only use it for coarse bounding checks, like flagging
/// implausible jumps between consecutive reports. Non-finite input propagates
/// as NaN rather than panicking.
pub fn planar_dist(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    ((lon1 - lon2).powi(2) + (lat1 - lat2).powi(2)).sqrt()
}

/// How far one degree of longitude and one degree of latitude reach on the
/// ground around this pair of latitudes, as (x, y) ratios relative to a
/// degree of latitude. Away from the equator a longitude degree covers less
/// distance, shrinking the x ratio by cos(latitude).
///
/// A single non-finite latitude falls back to the other one. Both non-finite
/// is `InvalidGeometry`.
pub fn lon_lat_ratio(lats: (f64, f64)) -> Result<(f64, f64), Error> {
    let lat = if lats.0.is_finite() && lats.1.is_finite() {
        (lats.0 + lats.1) / 2.0
    } else if lats.0.is_finite() {
        lats.0
    } else if lats.1.is_finite() {
        lats.1
    } else {
        return Err(Error::InvalidGeometry(
            "both latitudes are undefined".to_string(),
        ));
    };
    Ok((lat.to_radians().cos(), 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_dist_is_euclidean() {
        assert_eq!(planar_dist(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(planar_dist(12.5, 44.0, 12.5, 44.0), 0.0);
    }

    #[test]
    fn planar_dist_propagates_nan() {
        assert!(planar_dist(f64::NAN, 0.0, 3.0, 4.0).is_nan());
    }

    #[test]
    fn ratio_shrinks_away_from_equator() {
        let (x, y) = lon_lat_ratio((0.0, 0.0)).unwrap();
        assert_eq!(x, 1.0);
        assert_eq!(y, 1.0);

        let (x, y) = lon_lat_ratio((60.0, 60.0)).unwrap();
        assert!((x - 0.5).abs() < 1e-12);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn ratio_falls_back_to_the_finite_latitude() {
        let (x, _) = lon_lat_ratio((f64::NAN, 60.0)).unwrap();
        assert!((x - 0.5).abs() < 1e-12);

        assert_eq!(
            lon_lat_ratio((f64::NAN, f64::INFINITY)),
            Err(Error::InvalidGeometry(
                "both latitudes are undefined".to_string()
            ))
        );
    }
}
