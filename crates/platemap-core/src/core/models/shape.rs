use super::geometry::PlateGeometry;
use super::well::WellLabel;
use serde::Serialize;
use std::ops::Range;

/// A rectangular block of wells owned by a single reagent.
///
/// Rows correspond to the samples of the owning experiment and columns to its
/// replicates. Cells are stored row-major. Shapes are never mutated after
/// construction; splitting produces new shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
    reagent: String,
    rows: usize,
    columns: usize,
    cells: Vec<WellLabel>,
}

impl Shape {
    /// Builds the full shape of one reagent: `samples.len()` rows by `replicates`
    /// columns, every column an identical copy of the sample column.
    pub fn build<S: AsRef<str>>(reagent: &str, samples: &[S], replicates: usize) -> Self {
        let mut cells = Vec::with_capacity(samples.len() * replicates);
        for sample in samples {
            for _ in 0..replicates {
                cells.push(WellLabel::new(sample.as_ref(), reagent));
            }
        }
        Self {
            reagent: reagent.to_string(),
            rows: samples.len(),
            columns: replicates,
            cells,
        }
    }

    pub fn reagent(&self) -> &str {
        &self.reagent
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&WellLabel> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    pub fn cells(&self) -> &[WellLabel] {
        &self.cells
    }

    /// Sample identifiers in row order.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        (0..self.rows).filter_map(move |row| self.cell(row, 0).map(|c| c.sample.as_str()))
    }

    pub fn fits_within(&self, geometry: PlateGeometry) -> bool {
        self.rows <= geometry.rows() && self.columns <= geometry.columns()
    }

    /// Splits the replicate columns into pieces at most `max_columns` wide.
    ///
    /// Produces `columns / max_columns` full-width pieces followed by a
    /// remainder piece when `columns % max_columns` is non-zero. Each piece keeps
    /// every row; together they cover the original columns left to right.
    ///
    /// # Panics
    /// Panics if `max_columns` is zero.
    pub fn split_by_width(&self, max_columns: usize) -> Vec<Shape> {
        assert!(max_columns > 0, "split width must be non-zero");
        piece_ranges(self.columns, max_columns)
            .map(|range| self.column_slice(range))
            .collect()
    }

    /// Partitions the sample rows into pieces at most `max_rows` tall.
    ///
    /// Rows are consumed in order, never duplicated: `rows / max_rows` full
    /// pieces are followed by a remainder piece of `rows % max_rows` rows.
    ///
    /// # Panics
    /// Panics if `max_rows` is zero.
    pub fn split_by_height(&self, max_rows: usize) -> Vec<Shape> {
        assert!(max_rows > 0, "split height must be non-zero");
        piece_ranges(self.rows, max_rows)
            .map(|range| self.row_slice(range))
            .collect()
    }

    /// Decomposes the shape into pieces that each fit on a single plate.
    ///
    /// A shape too wide and too tall is split by width first and every width
    /// piece is then split by height. A shape exceeding a single dimension is
    /// split along that dimension only. A fitting shape is returned unchanged.
    pub fn fit_to(self, geometry: PlateGeometry) -> Vec<Shape> {
        let too_wide = self.columns > geometry.columns();
        let too_tall = self.rows > geometry.rows();

        match (too_wide, too_tall) {
            (true, true) => self
                .split_by_width(geometry.columns())
                .into_iter()
                .flat_map(|piece| piece.split_by_height(geometry.rows()))
                .collect(),
            (true, false) => self.split_by_width(geometry.columns()),
            (false, true) => self.split_by_height(geometry.rows()),
            (false, false) => vec![self],
        }
    }

    fn column_slice(&self, range: Range<usize>) -> Shape {
        let width = range.len();
        let mut cells = Vec::with_capacity(self.rows * width);
        for row in 0..self.rows {
            let start = row * self.columns;
            cells.extend_from_slice(&self.cells[start + range.start..start + range.end]);
        }
        Shape {
            reagent: self.reagent.clone(),
            rows: self.rows,
            columns: width,
            cells,
        }
    }

    fn row_slice(&self, range: Range<usize>) -> Shape {
        let height = range.len();
        let cells = self.cells[range.start * self.columns..range.end * self.columns].to_vec();
        Shape {
            reagent: self.reagent.clone(),
            rows: height,
            columns: self.columns,
            cells,
        }
    }
}

fn piece_ranges(extent: usize, max: usize) -> impl Iterator<Item = Range<usize>> {
    (0..extent)
        .step_by(max)
        .map(move |start| start..(start + max).min(extent))
}
