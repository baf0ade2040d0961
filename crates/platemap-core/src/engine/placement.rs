use crate::core::models::experiment::AssemblyInput;
use crate::core::models::geometry::PlateGeometry;
use crate::core::models::plate::PlateGrid;
use crate::core::models::shape::Shape;
use crate::core::models::well::WellCoord;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// How much plate height one reagent asks for, and where it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReagentDemand<'a> {
    pub reagent: &'a str,
    pub experiment: usize,
    pub samples: usize,
}

/// Where a shape ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Zero-based index into the plate array.
    pub plate: usize,
    /// Top-left well of the shape.
    pub anchor: WellCoord,
    pub reagent: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementResult {
    pub geometry: PlateGeometry,
    pub plates: Vec<PlateGrid>,
    /// Successful placements in placement order.
    pub placements: Vec<Placement>,
    /// Shapes no plate could admit, in placement order.
    pub unplaced: Vec<Shape>,
}

impl PlacementResult {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn occupied_wells(&self) -> usize {
        self.plates.iter().map(PlateGrid::occupied).sum()
    }

    pub fn used_plates(&self) -> usize {
        self.plates.iter().filter(|p| !p.is_empty()).count()
    }
}

/// Orders reagents by the sample count of their experiment, largest first.
///
/// The sort is stable: reagents with equal sample counts keep input order
/// (experiment order, then position within the experiment).
pub fn order_reagents(input: &AssemblyInput) -> Vec<ReagentDemand<'_>> {
    let owner: HashMap<&str, usize> = input
        .experiments()
        .flat_map(|exp| exp.reagents.iter().map(move |r| (r.as_str(), exp.index)))
        .collect();

    let mut demand: Vec<ReagentDemand> = input
        .experiments()
        .flat_map(|exp| exp.reagents.iter())
        .map(|reagent| {
            let experiment = owner[reagent.as_str()];
            ReagentDemand {
                reagent,
                experiment,
                samples: input.samples[experiment].len(),
            }
        })
        .collect();

    demand.sort_by(|a, b| b.samples.cmp(&a.samples));
    demand
}

/// Builds every reagent's shape, decomposes oversized ones to fit `geometry`,
/// and returns the pieces sorted by area, largest first.
///
/// The area sort is stable, so equal areas keep reagent processing order.
/// A status update naming the piece count is reported for every reagent.
pub fn build_shapes(
    input: &AssemblyInput,
    demand: &[ReagentDemand<'_>],
    geometry: PlateGeometry,
    reporter: &ProgressReporter,
) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for d in demand {
        let shape = Shape::build(
            d.reagent,
            &input.samples[d.experiment],
            input.replicates[d.experiment],
        );
        let pieces = shape.fit_to(geometry);
        debug!(
            reagent = d.reagent,
            samples = d.samples,
            replicates = input.replicates[d.experiment],
            pieces = pieces.len(),
            "Built reagent shape."
        );
        reporter.report(Progress::StatusUpdate {
            text: format!("{}: {} piece(s)", d.reagent, pieces.len()),
        });
        shapes.extend(pieces);
    }

    shapes.sort_by(|a, b| b.area().cmp(&a.area()));
    shapes
}

/// First-fit placement of shapes onto a fixed array of plates.
///
/// Plates are allocated up front and never added or removed. Each shape goes to
/// the first non-full plate, at the first free well in row-major order where it
/// fits. Shapes that fit nowhere are set aside; nothing already placed is
/// rolled back.
#[derive(Debug)]
pub struct PlacementEngine {
    geometry: PlateGeometry,
    plates: Vec<PlateGrid>,
    placements: Vec<Placement>,
    unplaced: Vec<Shape>,
}

impl PlacementEngine {
    pub fn new(geometry: PlateGeometry, plate_limit: usize) -> Self {
        Self {
            geometry,
            plates: vec![PlateGrid::new(geometry); plate_limit],
            placements: Vec::new(),
            unplaced: Vec::new(),
        }
    }

    pub fn plates(&self) -> &[PlateGrid] {
        &self.plates
    }

    /// Places one shape, returning where it landed, or `None` if it was set aside.
    pub fn place(&mut self, shape: Shape) -> Option<&Placement> {
        for (idx, plate) in self.plates.iter_mut().enumerate() {
            if plate.is_full() {
                continue;
            }

            let anchor = plate
                .free_spaces()
                .find(|c| plate.check_shape(c.column, c.row, &shape));

            if let Some(anchor) = anchor {
                plate.place_shape(anchor.column, anchor.row, &shape);
                trace!(
                    reagent = shape.reagent(),
                    plate = idx,
                    well = %anchor,
                    "Placed shape."
                );
                self.placements.push(Placement {
                    plate: idx,
                    anchor,
                    reagent: shape.reagent().to_string(),
                    rows: shape.rows(),
                    columns: shape.columns(),
                });
                return self.placements.last();
            }
        }

        warn!(
            reagent = shape.reagent(),
            rows = shape.rows(),
            columns = shape.columns(),
            "Shape does not fit on any plate."
        );
        self.unplaced.push(shape);
        None
    }

    pub fn finish(self) -> PlacementResult {
        PlacementResult {
            geometry: self.geometry,
            plates: self.plates,
            placements: self.placements,
            unplaced: self.unplaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    fn samples(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{}-{}", prefix, i)).collect()
    }

    #[test]
    fn reagents_with_more_samples_are_processed_first() {
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 2), ["R1"], 1)
            .with_experiment(samples("S", 10), ["R2"], 1);
        let order: Vec<_> = order_reagents(&input).iter().map(|d| d.reagent).collect();
        assert_eq!(order, vec!["R2", "R1"]);
    }

    #[test]
    fn equal_sample_counts_keep_input_order() {
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 3), ["<C>", "<A>"], 1)
            .with_experiment(samples("T", 3), ["<B>"], 2)
            .with_experiment(samples("U", 5), ["<Z>"], 1);
        let order: Vec<_> = order_reagents(&input).iter().map(|d| d.reagent).collect();
        assert_eq!(order, vec!["<Z>", "<C>", "<A>", "<B>"]);
    }

    #[test]
    fn demand_records_owning_experiment() {
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 1), ["<A>"], 1)
            .with_experiment(samples("S", 4), ["<B>"], 1);
        let demand = order_reagents(&input);
        assert_eq!(
            demand[0],
            ReagentDemand {
                reagent: "<B>",
                experiment: 1,
                samples: 4,
            }
        );
    }

    #[test]
    fn build_shapes_splits_tall_shape_before_placement() {
        let input = AssemblyInput::default().with_experiment(samples("S", 20), ["<R>"], 5);
        let demand = order_reagents(&input);
        let shapes = build_shapes(&input, &demand, PlateGeometry::Wells96, &ProgressReporter::new());
        let dims: Vec<_> = shapes.iter().map(|s| (s.rows(), s.columns())).collect();
        assert_eq!(dims, vec![(8, 5), (8, 5), (4, 5)]);
    }

    #[test]
    fn build_shapes_reports_piece_count_per_reagent() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let sink = updates.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::StatusUpdate { text } = p {
                sink.lock().unwrap().push(text);
            }
        }));
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 20), ["<Tall>"], 5)
            .with_experiment(samples("T", 2), ["<Small>"], 1);
        let demand = order_reagents(&input);

        build_shapes(&input, &demand, PlateGeometry::Wells96, &reporter);

        assert_eq!(
            *updates.lock().unwrap(),
            vec!["<Tall>: 3 piece(s)".to_string(), "<Small>: 1 piece(s)".to_string()]
        );
    }

    #[test]
    fn build_shapes_sorts_by_descending_area_stably() {
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 2), ["<small>"], 2)
            .with_experiment(samples("S", 4), ["<big>"], 3)
            .with_experiment(samples("S", 1), ["<same-a>", "<same-b>"], 4);
        let demand = order_reagents(&input);
        let shapes = build_shapes(&input, &demand, PlateGeometry::Wells96, &ProgressReporter::new());
        let order: Vec<_> = shapes.iter().map(Shape::reagent).collect();
        assert_eq!(order, vec!["<big>", "<small>", "<same-a>", "<same-b>"]);
    }

    #[test]
    fn shape_cell_totals_match_experiment_demand() {
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 37), ["<A>", "<B>"], 30)
            .with_experiment(samples("T", 3), ["<C>"], 7);
        let demand = order_reagents(&input);
        let shapes = build_shapes(&input, &demand, PlateGeometry::Wells384, &ProgressReporter::new());
        for (reagent, expected) in [("<A>", 37 * 30), ("<B>", 37 * 30), ("<C>", 21)] {
            let cells: usize = shapes
                .iter()
                .filter(|s| s.reagent() == reagent)
                .map(Shape::area)
                .sum();
            assert_eq!(cells, expected, "cell count for {}", reagent);
        }
        assert!(shapes.iter().all(|s| s.fits_within(PlateGeometry::Wells384)));
    }

    #[test]
    fn place_uses_first_free_location_on_first_plate() {
        let mut engine = PlacementEngine::new(PlateGeometry::Wells96, 2);
        let first = engine
            .place(Shape::build("<A>", &samples("S", 8), 4))
            .cloned()
            .unwrap();
        assert_eq!(first.plate, 0);
        assert_eq!(first.anchor, WellCoord::new(0, 0));

        let second = engine
            .place(Shape::build("<B>", &samples("S", 2), 2))
            .cloned()
            .unwrap();
        assert_eq!(second.plate, 0);
        assert_eq!(second.anchor, WellCoord::new(4, 0));
    }

    #[test]
    fn place_moves_to_next_plate_when_current_has_no_room() {
        let mut engine = PlacementEngine::new(PlateGeometry::Wells96, 2);
        engine.place(Shape::build("<A>", &samples("S", 8), 10));
        let placed = engine
            .place(Shape::build("<B>", &samples("S", 3), 3))
            .cloned()
            .unwrap();
        assert_eq!(placed.plate, 1);
        assert_eq!(placed.anchor, WellCoord::new(0, 0));
    }

    #[test]
    fn full_plates_are_skipped_and_unplaceable_shapes_set_aside() {
        let mut engine = PlacementEngine::new(PlateGeometry::Wells96, 1);
        assert!(engine.place(Shape::build("<A>", &samples("S", 8), 12)).is_some());
        assert!(engine.plates()[0].is_full());
        assert!(engine.place(Shape::build("<B>", &samples("S", 1), 1)).is_none());

        let result = engine.finish();
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].reagent(), "<B>");
        assert_eq!(result.placements.len(), 1);
        assert!(!result.is_complete());
    }

    #[test]
    fn no_well_is_assigned_twice() {
        let input = AssemblyInput::default()
            .with_experiment(samples("S", 5), ["<A>", "<B>", "<C>"], 3)
            .with_experiment(samples("T", 9), ["<D>"], 13)
            .with_experiment(samples("U", 2), ["<E>", "<F>"], 7);
        let demand = order_reagents(&input);
        let shapes = build_shapes(&input, &demand, PlateGeometry::Wells96, &ProgressReporter::new());
        let expected_cells: usize = shapes.iter().map(Shape::area).sum();

        let mut engine = PlacementEngine::new(PlateGeometry::Wells96, 4);
        for shape in shapes {
            engine.place(shape);
        }
        let result = engine.finish();
        assert!(result.is_complete());

        let mut seen = HashSet::new();
        let mut covered = 0;
        for p in &result.placements {
            for c in 0..p.columns {
                for r in 0..p.rows {
                    let well = (p.plate, p.anchor.column + c, p.anchor.row + r);
                    assert!(seen.insert(well), "well {:?} assigned twice", well);
                    covered += 1;
                }
            }
        }
        assert_eq!(covered, expected_cells);
        assert_eq!(result.occupied_wells(), expected_cells);
    }
}
