//! Uniform latitude/longitude grid index.
//!
//! The globe is cut into square cells of `cell_size` degrees. Each key is
//! filed under the cell containing its coordinate. A bounding-box lookup
//! walks the rows the box spans and, per row, range-scans the occupied
//! cells between the box's west and east columns, so empty cells cost
//! nothing.
//!
//! Cell size trades memory and fan-out: small cells keep candidate sets
//! tight for small radii, large cells keep wide queries from touching
//! many rows. When a box spans more rows than there are indexed points,
//! the lookup scans the stored positions directly instead.

use std::collections::{BTreeMap, BTreeSet};

use beacon_types::Coordinate;

use crate::bbox::BoundingBox;
use crate::distance::validate_coordinate;
use crate::error::GeoError;

/// Address of a grid cell. Rows count up from the south pole, columns
/// count east from the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// Row index, `0` at latitude -90.
    pub row: u32,
    /// Column index, `0` at longitude -180.
    pub col: u32,
}

/// Spatial index mapping keys to grid cells.
#[derive(Debug, Clone)]
pub struct GridIndex<K> {
    cell_size: f64,
    max_row: u32,
    max_col: u32,
    cells: BTreeMap<CellKey, BTreeSet<K>>,
    positions: BTreeMap<K, Coordinate>,
}

impl<K: Ord + Copy> GridIndex<K> {
    /// Create an empty index with square cells of `cell_size` degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCellSize`] unless `0 < cell_size <= 180`.
    pub fn new(cell_size: f64) -> Result<Self, GeoError> {
        if !cell_size.is_finite() || cell_size <= 0.0 || cell_size > 180.0 {
            return Err(GeoError::InvalidCellSize(cell_size));
        }
        let rows = (180.0 / cell_size).ceil();
        let cols = (360.0 / cell_size).ceil();
        Ok(Self {
            cell_size,
            max_row: to_index(rows - 1.0, u32::MAX),
            max_col: to_index(cols - 1.0, u32::MAX),
            cells: BTreeMap::new(),
            positions: BTreeMap::new(),
        })
    }

    /// Cell edge length in degrees.
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of indexed keys.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Position currently indexed for `key`.
    pub fn get(&self, key: &K) -> Option<Coordinate> {
        self.positions.get(key).copied()
    }

    /// The cell that contains `coord`.
    ///
    /// Coordinates on the north pole or the +180 meridian fold into the
    /// last row or column.
    pub fn cell_of(&self, coord: Coordinate) -> CellKey {
        CellKey {
            row: self.row_of(coord.lat),
            col: self.col_of(coord.lng),
        }
    }

    /// Index `key` at `coord`, moving it if it was already present.
    ///
    /// Returns the previous position, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if `coord` is malformed; the index is left
    /// unchanged.
    pub fn insert(&mut self, key: K, coord: Coordinate) -> Result<Option<Coordinate>, GeoError> {
        validate_coordinate(coord)?;
        let previous = self.remove(&key);
        let cell = self.cell_of(coord);
        self.cells.entry(cell).or_default().insert(key);
        self.positions.insert(key, coord);
        Ok(previous)
    }

    /// Remove `key` from the index, returning its last position.
    pub fn remove(&mut self, key: &K) -> Option<Coordinate> {
        let coord = self.positions.remove(key)?;
        let cell = self.cell_of(coord);
        if let Some(members) = self.cells.get_mut(&cell) {
            members.remove(key);
            if members.is_empty() {
                self.cells.remove(&cell);
            }
        }
        Some(coord)
    }

    /// Keys whose positions fall inside `bbox`, in key order.
    pub fn candidates(&self, bbox: &BoundingBox) -> Vec<K> {
        let south_row = self.row_of(bbox.south);
        let north_row = self.row_of(bbox.north);
        let row_span = usize::try_from(north_row.saturating_sub(south_row))
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        let range_count = bbox.longitude_ranges().count();

        if row_span.saturating_mul(range_count) > self.positions.len() {
            tracing::trace!(
                row_span,
                indexed = self.positions.len(),
                "grid lookup wider than index, scanning positions"
            );
            return self
                .positions
                .iter()
                .filter(|(_, coord)| bbox.contains(**coord))
                .map(|(key, _)| *key)
                .collect();
        }

        let mut found = BTreeSet::new();
        for row in south_row..=north_row {
            for (west, east) in bbox.longitude_ranges() {
                let from = CellKey {
                    row,
                    col: self.col_of(west),
                };
                let to = CellKey {
                    row,
                    col: self.col_of(east),
                };
                for members in self.cells.range(from..=to).map(|(_, m)| m) {
                    found.extend(members.iter().copied().filter(|key| {
                        self.positions
                            .get(key)
                            .is_some_and(|coord| bbox.contains(*coord))
                    }));
                }
            }
        }
        found.into_iter().collect()
    }

    /// Iterate every indexed key and position.
    pub fn iter(&self) -> impl Iterator<Item = (K, Coordinate)> + '_ {
        self.positions.iter().map(|(key, coord)| (*key, *coord))
    }

    fn row_of(&self, lat: f64) -> u32 {
        to_index(((lat + 90.0) / self.cell_size).floor(), self.max_row)
    }

    fn col_of(&self, lng: f64) -> u32 {
        to_index(((lng + 180.0) / self.cell_size).floor(), self.max_col)
    }
}

/// Clamp a non-negative whole float into `[0, max]` as a cell index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_index(value: f64, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(max) {
        max
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn rejects_bad_cell_sizes() {
        assert!(GridIndex::<u32>::new(0.0).is_err());
        assert!(GridIndex::<u32>::new(-1.0).is_err());
        assert!(GridIndex::<u32>::new(f64::NAN).is_err());
        assert!(GridIndex::<u32>::new(181.0).is_err());
        assert!(GridIndex::<u32>::new(180.0).is_ok());
    }

    #[test]
    fn poles_and_antimeridian_fold_into_last_cell() {
        let grid = GridIndex::<u32>::new(1.0).unwrap();
        assert_eq!(grid.cell_of(Coordinate::new(90.0, 180.0)), CellKey { row: 179, col: 359 });
        assert_eq!(grid.cell_of(Coordinate::new(-90.0, -180.0)), CellKey { row: 0, col: 0 });
        assert_eq!(grid.cell_of(Coordinate::new(0.5, 0.5)), CellKey { row: 90, col: 180 });
    }

    #[test]
    fn insert_moves_existing_key() {
        let mut grid = GridIndex::new(0.1).unwrap();
        assert!(grid.insert(1_u32, Coordinate::new(10.0, 10.0)).unwrap().is_none());
        let previous = grid.insert(1, Coordinate::new(-20.0, 30.0)).unwrap();
        assert_eq!(previous, Some(Coordinate::new(10.0, 10.0)));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.occupied_cells(), 1);
        assert_eq!(grid.get(&1), Some(Coordinate::new(-20.0, 30.0)));
    }

    #[test]
    fn invalid_insert_leaves_index_untouched() {
        let mut grid = GridIndex::new(0.1).unwrap();
        grid.insert(1_u32, Coordinate::new(10.0, 10.0)).unwrap();
        assert!(grid.insert(1, Coordinate::new(91.0, 10.0)).is_err());
        assert_eq!(grid.get(&1), Some(Coordinate::new(10.0, 10.0)));
    }

    #[test]
    fn remove_clears_empty_cells() {
        let mut grid = GridIndex::new(0.5).unwrap();
        grid.insert(7_u32, Coordinate::new(1.0, 1.0)).unwrap();
        assert_eq!(grid.remove(&7), Some(Coordinate::new(1.0, 1.0)));
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_cells(), 0);
        assert_eq!(grid.remove(&7), None);
    }

    #[test]
    fn candidates_skip_far_cells() {
        let mut grid = GridIndex::new(0.1).unwrap();
        for i in 0..200_u32 {
            let offset = f64::from(i) * 0.5;
            grid.insert(i, Coordinate::new(offset.mul_add(0.4, -45.0), -90.0 + offset)).unwrap();
        }
        grid.insert(1_000, Coordinate::new(40.0, -75.0)).unwrap();
        grid.insert(1_001, Coordinate::new(40.01, -75.0)).unwrap();

        let bbox = BoundingBox::around(Coordinate::new(40.0, -75.0), 2_000.0).unwrap();
        assert_eq!(grid.candidates(&bbox), vec![1_000, 1_001]);
    }

    #[test]
    fn candidates_across_antimeridian() {
        let mut grid = GridIndex::new(0.1).unwrap();
        grid.insert(1_u32, Coordinate::new(0.0, -179.95)).unwrap();
        grid.insert(2, Coordinate::new(0.0, 179.95)).unwrap();
        grid.insert(3, Coordinate::new(0.0, 170.0)).unwrap();
        for i in 10..100_u32 {
            grid.insert(i, Coordinate::new(f64::from(i) * 0.5, 0.0)).unwrap();
        }

        let bbox = BoundingBox::around(Coordinate::new(0.0, 179.9), 20_000.0).unwrap();
        assert_eq!(grid.candidates(&bbox), vec![1, 2]);
    }

    #[test]
    fn wide_box_falls_back_to_scan() {
        let mut grid = GridIndex::new(0.01).unwrap();
        grid.insert(1_u32, Coordinate::new(0.0, 0.0)).unwrap();
        grid.insert(2, Coordinate::new(50.0, 50.0)).unwrap();
        assert_eq!(grid.candidates(&BoundingBox::WORLD), vec![1, 2]);
    }

    #[test]
    fn candidates_match_box_filter_on_random_points() {
        let mut rng = StdRng::seed_from_u64(0x00be_ac07);
        let mut grid = GridIndex::new(0.25).unwrap();
        for key in 0..5_000_u32 {
            let coord = Coordinate::new(
                rng.random_range(-90.0..=90.0),
                rng.random_range(-180.0..=180.0),
            );
            grid.insert(key, coord).unwrap();
        }
        for _ in 0..200 {
            let center =
                Coordinate::new(rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0));
            let radius = rng.random_range(0.0..300_000.0);
            let bbox = BoundingBox::around(center, radius).unwrap();
            let expected: Vec<u32> = grid
                .iter()
                .filter(|(_, coord)| bbox.contains(*coord))
                .map(|(key, _)| key)
                .collect();
            assert_eq!(grid.candidates(&bbox), expected);
        }
    }
}
