use super::geometry::PlateGeometry;
use super::shape::Shape;
use super::well::{WellCoord, WellLabel};
use serde::Serialize;

/// One physical plate: a fixed grid of wells, each empty or holding a label.
///
/// Wells are stored row-major. Once occupied, a well is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateGrid {
    rows: usize,
    columns: usize,
    wells: Vec<Option<WellLabel>>,
}

impl PlateGrid {
    pub fn new(geometry: PlateGeometry) -> Self {
        Self::with_dimensions(geometry.rows(), geometry.columns())
    }

    pub(crate) fn with_dimensions(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            wells: vec![None; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of non-empty wells.
    pub fn occupied(&self) -> usize {
        self.wells.iter().filter(|w| w.is_some()).count()
    }

    pub fn free(&self) -> usize {
        self.size() - self.occupied()
    }

    pub fn is_full(&self) -> bool {
        self.wells.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.wells.iter().all(Option::is_none)
    }

    pub fn well(&self, row: usize, column: usize) -> Option<&WellLabel> {
        self.index(column, row).and_then(|idx| self.wells[idx].as_ref())
    }

    /// Wells grouped by row, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Option<WellLabel>]> {
        self.wells.chunks(self.columns.max(1))
    }

    /// Coordinates of every empty well in row-major scan order.
    pub fn free_spaces(&self) -> impl Iterator<Item = WellCoord> + '_ {
        self.wells
            .iter()
            .enumerate()
            .filter(|(_, well)| well.is_none())
            .map(|(idx, _)| WellCoord::new(idx % self.columns, idx / self.columns))
    }

    /// Checks whether `shape` fits with its top-left cell at column `x`, row `y`.
    ///
    /// The shape is walked column by column and, within a column, row by row.
    /// The first target well that lies outside the plate or is already occupied
    /// rejects the location.
    pub fn check_shape(&self, x: usize, y: usize, shape: &Shape) -> bool {
        for col_offset in 0..shape.columns() {
            for row_offset in 0..shape.rows() {
                match self.index(x + col_offset, y + row_offset) {
                    Some(idx) if self.wells[idx].is_none() => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Writes `shape` into the plate with its top-left cell at column `x`, row `y`.
    ///
    /// Must follow a successful [`check_shape`](Self::check_shape) at the same
    /// location. Occupied wells are never overwritten and cells that fall
    /// outside the plate are skipped. If the anchor well is occupied the call
    /// is a no-op. Returns the number of wells written.
    pub fn place_shape(&mut self, x: usize, y: usize, shape: &Shape) -> usize {
        match self.index(x, y) {
            Some(anchor) if self.wells[anchor].is_none() => {}
            _ => {
                debug_assert!(false, "place_shape called on an unavailable anchor ({x}, {y})");
                return 0;
            }
        }

        let mut written = 0;
        for col_offset in 0..shape.columns() {
            for row_offset in 0..shape.rows() {
                let Some(idx) = self.index(x + col_offset, y + row_offset) else {
                    continue;
                };
                let Some(label) = shape.cell(row_offset, col_offset) else {
                    continue;
                };
                let slot = &mut self.wells[idx];
                if slot.is_none() {
                    *slot = Some(label.clone());
                    written += 1;
                }
            }
        }
        written
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: usize, columns: usize) -> Shape {
        let samples: Vec<String> = (0..rows).map(|i| format!("S{}", i)).collect();
        Shape::build("<R>", &samples, columns)
    }

    #[test]
    fn new_plate_is_empty_with_geometry_dimensions() {
        let plate = PlateGrid::new(PlateGeometry::Wells96);
        assert_eq!(plate.rows(), 8);
        assert_eq!(plate.columns(), 12);
        assert_eq!(plate.size(), 96);
        assert_eq!(plate.occupied(), 0);
        assert!(plate.is_empty());
        assert!(!plate.is_full());
    }

    #[test]
    fn free_spaces_are_reported_in_row_major_order() {
        let mut plate = PlateGrid::with_dimensions(2, 3);
        plate.place_shape(0, 0, &shape(1, 1));
        let spaces: Vec<_> = plate.free_spaces().collect();
        assert_eq!(
            spaces,
            vec![
                WellCoord::new(1, 0),
                WellCoord::new(2, 0),
                WellCoord::new(0, 1),
                WellCoord::new(1, 1),
                WellCoord::new(2, 1),
            ]
        );
    }

    #[test]
    fn check_shape_accepts_empty_in_bounds_location() {
        let plate = PlateGrid::new(PlateGeometry::Wells96);
        assert!(plate.check_shape(0, 0, &shape(8, 12)));
        assert!(plate.check_shape(10, 6, &shape(2, 2)));
    }

    #[test]
    fn check_shape_rejects_out_of_bounds_location() {
        let plate = PlateGrid::new(PlateGeometry::Wells96);
        assert!(!plate.check_shape(11, 0, &shape(1, 2)));
        assert!(!plate.check_shape(0, 7, &shape(2, 1)));
        assert!(!plate.check_shape(12, 0, &shape(1, 1)));
    }

    #[test]
    fn check_shape_rejects_any_occupied_target_well() {
        let mut plate = PlateGrid::new(PlateGeometry::Wells96);
        plate.place_shape(3, 3, &shape(1, 1));
        assert!(!plate.check_shape(0, 0, &shape(4, 4)));
        assert!(!plate.check_shape(3, 3, &shape(1, 1)));
        assert!(plate.check_shape(4, 0, &shape(4, 4)));
    }

    #[test]
    fn place_shape_writes_column_major_cells() {
        let mut plate = PlateGrid::new(PlateGeometry::Wells96);
        let s = shape(3, 2);
        assert!(plate.check_shape(5, 1, &s));
        assert_eq!(plate.place_shape(5, 1, &s), 6);
        assert_eq!(plate.occupied(), 6);
        assert_eq!(plate.well(1, 5), Some(&WellLabel::new("S0", "<R>")));
        assert_eq!(plate.well(3, 6), Some(&WellLabel::new("S2", "<R>")));
        assert!(plate.well(0, 5).is_none());
        assert!(plate.well(4, 5).is_none());
    }

    #[test]
    fn place_shape_never_overwrites_occupied_wells() {
        let mut plate = PlateGrid::with_dimensions(2, 2);
        let first = Shape::build("<A>", &["X"], 1);
        plate.place_shape(1, 1, &first);

        let second = Shape::build("<B>", &["Y", "Z"], 2);
        let written = plate.place_shape(0, 0, &second);
        assert_eq!(written, 3);
        assert_eq!(plate.well(1, 1), Some(&WellLabel::new("X", "<A>")));
        assert!(plate.is_full());
    }

    #[test]
    fn rows_iter_yields_each_row_once() {
        let mut plate = PlateGrid::with_dimensions(2, 3);
        plate.place_shape(2, 1, &shape(1, 1));
        let rows: Vec<_> = plate.rows_iter().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].iter().all(Option::is_none));
        assert!(rows[1][2].is_some());
    }
}
