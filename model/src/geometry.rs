use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Great-circle distance in meters, using the haversine formula
    pub fn gps_dist(self, other: LonLat) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        // Rounding can push nearly antipodal points just past 1
        let c = 2.0 * a.min(1.0).sqrt().asin();

        EARTH_RADIUS_METERS * c
    }

    /// Straight-line distance in degrees. Only useful for comparing nearby points.
    pub fn fast_dist(self, other: LonLat) -> f64 {
        (self.longitude - other.longitude).hypot(self.latitude - other.latitude)
    }

    pub fn lerp(self, other: LonLat, pct: f64) -> LonLat {
        LonLat::new(
            self.longitude + pct * (other.longitude - self.longitude),
            self.latitude + pct * (other.latitude - self.latitude),
        )
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

/// An ordered path, remembering the length of every segment.
#[derive(Clone, Debug)]
pub struct Polyline {
    pts: Vec<LonLat>,
    // segment_lengths[i] is the distance from pts[i] to pts[i + 1]
    segment_lengths: Vec<f64>,
    length: f64,
}

impl Polyline {
    pub fn new(pts: Vec<LonLat>) -> Result<Self, Error> {
        if pts.is_empty() {
            return Err(Error::InsufficientGeometry);
        }
        let segment_lengths: Vec<f64> = pts
            .windows(2)
            .map(|pair| pair[0].gps_dist(pair[1]))
            .collect();
        let length = segment_lengths.iter().sum();
        Ok(Self {
            pts,
            segment_lengths,
            length,
        })
    }

    pub fn points(&self) -> &Vec<LonLat> {
        &self.pts
    }

    pub fn first_pt(&self) -> LonLat {
        self.pts[0]
    }

    pub fn last_pt(&self) -> LonLat {
        self.pts[self.pts.len() - 1]
    }

    /// In meters
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Finds the point `pct` of the way along the path, measured by distance. `pct` is clamped to
    /// [0, 1].
    pub fn percent_along(&self, pct: f64) -> LonLat {
        // Also covers a single point and a path where every point coincides
        if self.length == 0.0 {
            return self.first_pt();
        }
        let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 1.0) };

        let mut dist_left = pct * self.length;
        for (idx, segment) in self.segment_lengths.iter().enumerate() {
            if dist_left <= *segment {
                // A zero-length segment can only match with nothing left to walk
                let fraction = if *segment == 0.0 {
                    0.0
                } else {
                    dist_left / segment
                };
                return self.pts[idx].lerp(self.pts[idx + 1], fraction);
            }
            dist_left -= segment;
        }

        // Rounding error at the very end
        self.last_pt()
    }
}

/// Interpolates a point `t` of the way along `coords`, by cumulative great-circle length.
pub fn interpolate(coords: &[LonLat], t: f64) -> Result<LonLat, Error> {
    Ok(Polyline::new(coords.to_vec())?.percent_along(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: LonLat, expected: LonLat) {
        assert!(
            actual.fast_dist(expected) < EPSILON,
            "{actual} isn't close to {expected}"
        );
    }

    fn path() -> Vec<LonLat> {
        vec![
            LonLat::new(-5.99335, 37.38573),
            LonLat::new(-5.99101, 37.38702),
            LonLat::new(-5.98876, 37.38811),
            LonLat::new(-5.98194, 37.38955),
        ]
    }

    #[test]
    fn endpoints() {
        let coords = path();
        assert_close(interpolate(&coords, 0.0).unwrap(), coords[0]);
        assert_close(interpolate(&coords, 1.0).unwrap(), coords[3]);
    }

    #[rstest]
    #[case(-0.5, 0)]
    #[case(f64::NAN, 0)]
    #[case(7.0, 3)]
    fn clamps_progress(#[case] t: f64, #[case] expected_idx: usize) {
        let coords = path();
        assert_close(interpolate(&coords, t).unwrap(), coords[expected_idx]);
    }

    #[test]
    fn midpoint_of_two_segments() {
        // Two segments of equal length along the equator
        let coords = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(2.0, 0.0),
        ];
        assert_close(interpolate(&coords, 0.5).unwrap(), LonLat::new(1.0, 0.0));
        assert_close(interpolate(&coords, 0.25).unwrap(), LonLat::new(0.5, 0.0));
        assert_close(interpolate(&coords, 0.75).unwrap(), LonLat::new(1.5, 0.0));
    }

    #[test]
    fn proportional_to_length() {
        // The first segment is 3 times longer than the second
        let coords = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(3.0, 0.0),
            LonLat::new(4.0, 0.0),
        ];
        assert_close(interpolate(&coords, 0.75).unwrap(), LonLat::new(3.0, 0.0));
        assert_close(interpolate(&coords, 0.875).unwrap(), LonLat::new(3.5, 0.0));
    }

    #[test]
    fn degenerate_paths() {
        let single = vec![LonLat::new(0.0, 0.0)];
        assert_eq!(interpolate(&single, 0.5).unwrap(), LonLat::new(0.0, 0.0));

        let pt = LonLat::new(-5.98, 37.39);
        let coincident = vec![pt, pt, pt];
        for t in [0.0, 0.3, 1.0] {
            assert_eq!(interpolate(&coincident, t).unwrap(), pt);
        }

        assert_eq!(interpolate(&[], 0.5), Err(Error::InsufficientGeometry));
    }

    #[test]
    fn repeated_points_in_the_middle() {
        let coords = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(2.0, 0.0),
        ];
        assert_close(interpolate(&coords, 0.5).unwrap(), LonLat::new(1.0, 0.0));
        assert_close(interpolate(&coords, 1.0).unwrap(), LonLat::new(2.0, 0.0));
    }

    #[test]
    fn antipodal_points() {
        let dist = LonLat::new(0.0, 0.0).gps_dist(LonLat::new(180.0, 0.0));
        assert!(dist.is_finite());
        assert!((dist - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1.0);

        let coords = vec![LonLat::new(-90.0, 0.0), LonLat::new(90.0, 0.0)];
        assert_close(interpolate(&coords, 0.0).unwrap(), coords[0]);
    }

    #[test]
    fn haversine_matches_known_distance() {
        // One degree of longitude at the equator
        let dist = LonLat::new(0.0, 0.0).gps_dist(LonLat::new(1.0, 0.0));
        assert!((dist - 111_195.08).abs() < 1.0, "got {dist}");
    }
}
