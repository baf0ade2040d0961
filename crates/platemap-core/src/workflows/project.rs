use crate::core::models::geometry::PlateGeometry;
use crate::core::models::shape::Shape;
use crate::core::models::well::WellLabel;
use crate::engine::placement::PlacementResult;
use serde::Serialize;
use std::fmt;

/// The `(sample, reagent)` pair of an occupied well.
///
/// Serializes as a two-element array, e.g. `["Sample-1", "<Pink>"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WellAssignment(pub String, pub String);

impl WellAssignment {
    pub fn sample(&self) -> &str {
        &self.0
    }

    pub fn reagent(&self) -> &str {
        &self.1
    }
}

impl From<&WellLabel> for WellAssignment {
    fn from(label: &WellLabel) -> Self {
        Self(label.sample.clone(), label.reagent.clone())
    }
}

/// Wells of one plate, indexed `[row][column]`; `None` marks an empty well.
pub type PlateMatrix = Vec<Vec<Option<WellAssignment>>>;

/// A shape that could not be placed, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnplacedSummary {
    pub reagent: String,
    pub samples: usize,
    pub replicates: usize,
}

impl From<&Shape> for UnplacedSummary {
    fn from(shape: &Shape) -> Self {
        Self {
            reagent: shape.reagent().to_string(),
            samples: shape.rows(),
            replicates: shape.columns(),
        }
    }
}

impl fmt::Display for UnplacedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-> {} - {} samples, {} replicates",
            self.reagent, self.samples, self.replicates
        )
    }
}

/// The externally consumed view of an assembly: `[plate][row][column]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateLayout {
    pub geometry: PlateGeometry,
    pub plates: Vec<PlateMatrix>,
    pub unplaced: Vec<UnplacedSummary>,
}

impl PlateLayout {
    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    pub fn well(&self, plate: usize, row: usize, column: usize) -> Option<&WellAssignment> {
        self.plates.get(plate)?.get(row)?.get(column)?.as_ref()
    }

    pub fn is_plate_empty(&self, plate: usize) -> bool {
        self.plates
            .get(plate)
            .is_none_or(|m| m.iter().flatten().all(Option::is_none))
    }

    pub fn empty_plates(&self) -> usize {
        (0..self.plates.len())
            .filter(|&i| self.is_plate_empty(i))
            .count()
    }

    /// Indices of plates holding at least one assignment, in plate order.
    pub fn occupied_plates(&self) -> Vec<usize> {
        (0..self.plates.len())
            .filter(|&i| !self.is_plate_empty(i))
            .collect()
    }
}

/// Projects the final well matrices into the `[plate][row][column]` layout.
///
/// Read-only: the placement result is not modified and no placement logic runs.
pub fn project(result: &PlacementResult) -> PlateLayout {
    let plates = result
        .plates
        .iter()
        .map(|plate| {
            plate
                .rows_iter()
                .map(|row| row.iter().map(|w| w.as_ref().map(WellAssignment::from)).collect())
                .collect()
        })
        .collect();

    PlateLayout {
        geometry: result.geometry,
        plates,
        unplaced: result.unplaced.iter().map(UnplacedSummary::from).collect(),
    }
}
