//! Linear-scan reference for radius queries and the shared result order.
//!
//! [`naive_within`] evaluates every point. It is correct for any input and
//! is what the indexed path is checked against.

use core::cmp::Ordering;

use beacon_types::Coordinate;

use crate::distance::within_radius;

/// A matched key together with its distance from the query center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<K> {
    /// The matched item.
    pub key: K,
    /// Great-circle distance from the center in meters.
    pub distance_meters: f64,
}

/// Order hits by ascending distance, breaking ties by key ascending.
pub fn sort_hits<K: Ord>(hits: &mut [Hit<K>]) {
    hits.sort_by(|a, b| {
        match a.distance_meters.total_cmp(&b.distance_meters) {
            Ordering::Equal => a.key.cmp(&b.key),
            other => other,
        }
    });
}

/// Every point within `radius_meters` of `center`, in result order.
///
/// Inputs are assumed valid; callers validate before querying.
pub fn naive_within<K, I>(center: Coordinate, radius_meters: f64, points: I) -> Vec<Hit<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, Coordinate)>,
{
    let mut hits: Vec<Hit<K>> = points
        .into_iter()
        .filter_map(|(key, coord)| {
            within_radius(center, coord, radius_meters).map(|distance_meters| Hit {
                key,
                distance_meters,
            })
        })
        .collect();
    sort_hits(&mut hits);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_matches_in_distance_order() {
        let points = vec![
            (3_u32, Coordinate::new(41.0, -75.0)),
            (2, Coordinate::new(40.01, -75.0)),
            (1, Coordinate::new(40.0, -75.0)),
        ];
        let hits = naive_within(Coordinate::new(40.0, -75.0), 2_000.0, points);
        let keys: Vec<u32> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn ties_break_on_key() {
        let p = Coordinate::new(5.0, 5.0);
        let hits = naive_within(p, 10.0, vec![(9_u32, p), (4, p), (7, p)]);
        let keys: Vec<u32> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec![4, 7, 9]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let hits = naive_within::<u32, _>(Coordinate::new(0.0, 0.0), 1_000.0, Vec::new());
        assert!(hits.is_empty());
    }
}
