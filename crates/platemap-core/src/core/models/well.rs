use serde::Serialize;
use std::fmt;

/// Delimiter that opens the reagent part of a legacy composite well identifier.
pub const REAGENT_DELIMITER: char = '<';

/// Placeholder used when a composite identifier carries no reagent delimiter.
pub const NOT_AVAILABLE: &str = "n/a";

/// The payload of an occupied well: which sample receives which reagent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WellLabel {
    pub sample: String,
    pub reagent: String,
}

impl WellLabel {
    pub fn new(sample: impl Into<String>, reagent: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            reagent: reagent.into(),
        }
    }

    /// Renders the label as a single `sample` + `reagent` string (e.g. `Sample-1<Pink>`).
    pub fn composite(&self) -> String {
        format!("{}{}", self.sample, self.reagent)
    }

    /// Splits a composite identifier at its first [`REAGENT_DELIMITER`].
    ///
    /// The text before the delimiter becomes the sample and the text from the
    /// delimiter onwards the reagent. Identifiers without a delimiter yield
    /// [`NOT_AVAILABLE`] for both fields.
    pub fn decompose(composite: &str) -> Self {
        match composite.find(REAGENT_DELIMITER) {
            Some(idx) => Self::new(&composite[..idx], &composite[idx..]),
            None => Self::new(NOT_AVAILABLE, NOT_AVAILABLE),
        }
    }
}

impl fmt::Display for WellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.sample, self.reagent)
    }
}

/// Zero-based well position: `column` is the x axis, `row` the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WellCoord {
    pub column: usize,
    pub row: usize,
}

impl WellCoord {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Conventional plate notation: row letter followed by 1-based column (`A1`, `P24`).
    pub fn name(&self) -> String {
        format!("{}{}", self.row_name(), self.column + 1)
    }

    /// Row letter(s) alone: `A` for the first row, `AA` after `Z`.
    pub fn row_name(&self) -> String {
        row_letters(self.row)
    }
}

impl fmt::Display for WellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn row_letters(mut row: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (row % 26) as u8);
        if row < 26 {
            break;
        }
        row = row / 26 - 1;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}
