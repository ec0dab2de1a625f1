//! Reduction of point distances to the shortest and longest value
//!
//! Distances are rounded to whole meters before they are compared. Min and max are
//! commutative and associative, so the sequential and parallel reductions agree for any
//! traversal order.

use crate::{GeoPoint, haversine};
use rayon::prelude::*;

/// Shortest and longest distance in whole meters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceRange {
    pub shortest: i64,
    pub longest: i64,
}

impl DistanceRange {
    /// Printed in place of `shortest` when there were no points to measure
    pub const SHORTEST_SENTINEL: i64 = i32::MAX as i64;
    /// Printed in place of `longest` when there were no points to measure
    pub const LONGEST_SENTINEL: i64 = i32::MIN as i64;

    /// Create a range covering a single distance
    #[inline]
    pub fn from_distance(distance_m: f64) -> Self {
        let meters = round_meters(distance_m);
        Self {
            shortest: meters,
            longest: meters,
        }
    }

    /// Widen the range to cover another distance
    #[inline]
    pub fn include(&mut self, distance_m: f64) {
        let meters = round_meters(distance_m);
        if meters < self.shortest {
            self.shortest = meters;
        }
        if meters > self.longest {
            self.longest = meters;
        }
    }

    /// Combine two ranges
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            shortest: self.shortest.min(other.shortest),
            longest: self.longest.max(other.longest),
        }
    }

    /// Resolve an optional range to printable values, using the sentinels when empty
    pub fn or_sentinels(range: Option<Self>) -> (i64, i64) {
        match range {
            Some(range) => (range.shortest, range.longest),
            None => (Self::SHORTEST_SENTINEL, Self::LONGEST_SENTINEL),
        }
    }
}

#[inline(always)]
fn round_meters(distance_m: f64) -> i64 {
    distance_m.round() as i64
}

/// Shortest and longest distance from `reference` to every point, in iteration order
///
/// Returns `None` when `points` is empty.
pub fn shortest_and_longest<I>(reference: GeoPoint, points: I) -> Option<DistanceRange>
where
    I: IntoIterator<Item = GeoPoint>,
{
    shortest_and_longest_with_radius(reference, points, haversine::EARTH_RADIUS_M)
}

pub(crate) fn shortest_and_longest_with_radius<I>(
    reference: GeoPoint,
    points: I,
    radius_m: f64,
) -> Option<DistanceRange>
where
    I: IntoIterator<Item = GeoPoint>,
{
    let mut range: Option<DistanceRange> = None;
    for point in points {
        let distance = haversine::distance_with_radius(reference, point, radius_m);
        range = Some(match range {
            Some(mut seen) => {
                seen.include(distance);
                seen
            }
            None => DistanceRange::from_distance(distance),
        });
    }
    range
}

/// Parallel version of [`shortest_and_longest`] for large inputs
pub fn shortest_and_longest_par(
    reference: GeoPoint,
    points: &[GeoPoint],
    radius_m: f64,
) -> Option<DistanceRange> {
    points
        .par_iter()
        .map(|&point| {
            DistanceRange::from_distance(haversine::distance_with_radius(
                reference, point, radius_m,
            ))
        })
        .reduce_with(DistanceRange::merge)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: GeoPoint = GeoPoint {
        latitude: 55.05,
        longitude: 8.41,
    };

    fn sample_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(55.05958, 8.41),
            GeoPoint::new(55.08077, 8.41),
            GeoPoint::new(55.03, 8.42),
            GeoPoint::new(55.0405, 8.40),
            GeoPoint::new(55.06, 8.41),
        ]
    }

    /// Brute-force oracle: compute every rounded distance and take min/max
    fn oracle(reference: GeoPoint, points: &[GeoPoint]) -> (i64, i64) {
        let distances: Vec<i64> = points
            .iter()
            .map(|&p| haversine::distance(reference, p).round() as i64)
            .collect();
        (
            *distances.iter().min().unwrap(),
            *distances.iter().max().unwrap(),
        )
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(shortest_and_longest(REFERENCE, Vec::<GeoPoint>::new()), None);
        assert_eq!(
            shortest_and_longest_par(REFERENCE, &[], haversine::EARTH_RADIUS_M),
            None
        );
    }

    #[test]
    fn test_single_point() {
        let target = GeoPoint::new(55.06, 8.42);
        let expected = haversine::distance(REFERENCE, target).round() as i64;

        let range = shortest_and_longest(REFERENCE, [target]).unwrap();
        assert_eq!(range.shortest, expected);
        assert_eq!(range.longest, expected);
        assert_eq!(expected, 1283);
    }

    #[test]
    fn test_reference_on_track_is_zero() {
        let mut points = sample_points();
        points.push(REFERENCE);
        let range = shortest_and_longest(REFERENCE, points).unwrap();
        assert_eq!(range.shortest, 0);
    }

    #[test]
    fn test_matches_oracle() {
        let points = sample_points();
        let range = shortest_and_longest(REFERENCE, points.iter().copied()).unwrap();
        let (shortest, longest) = oracle(REFERENCE, &points);
        assert_eq!(range.shortest, shortest);
        assert_eq!(range.longest, longest);
        assert!(range.shortest <= range.longest);
        assert_eq!((range.shortest, range.longest), (1066, 3425));
    }

    #[test]
    fn test_order_independent() {
        let points = sample_points();
        let forward = shortest_and_longest(REFERENCE, points.iter().copied());
        let backward = shortest_and_longest(REFERENCE, points.iter().rev().copied());
        let mut rotated = points.clone();
        rotated.rotate_left(2);
        let rotated = shortest_and_longest(REFERENCE, rotated);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        // A dense grid around the reference point
        let points: Vec<GeoPoint> = (0..5_000)
            .map(|i| {
                let t = i as f64 / 5_000.0;
                GeoPoint::new(55.0 + t * 0.1, 8.3 + (t * 40.0).sin() * 0.2)
            })
            .collect();

        let sequential = shortest_and_longest(REFERENCE, points.iter().copied());
        let parallel = shortest_and_longest_par(REFERENCE, &points, haversine::EARTH_RADIUS_M);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.unwrap(), {
            let (shortest, longest) = oracle(REFERENCE, &points);
            DistanceRange { shortest, longest }
        });
    }

    #[test]
    fn test_include_is_strict() {
        let mut range = DistanceRange::from_distance(100.4);
        assert_eq!(range, DistanceRange { shortest: 100, longest: 100 });

        range.include(99.6);
        assert_eq!(range.shortest, 100);
        range.include(250.5);
        assert_eq!(range.longest, 251);
        range.include(12.0);
        assert_eq!(range, DistanceRange { shortest: 12, longest: 251 });
    }

    #[test]
    fn test_sentinels_only_when_empty() {
        assert_eq!(
            DistanceRange::or_sentinels(None),
            (2_147_483_647, -2_147_483_648)
        );
        let range = DistanceRange { shortest: 3, longest: 7 };
        assert_eq!(DistanceRange::or_sentinels(Some(range)), (3, 7));
    }
}
