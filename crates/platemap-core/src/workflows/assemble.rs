use crate::core::models::experiment::AssemblyInput;
use crate::engine::config::AssemblyConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::{self, PlacementEngine, PlacementResult};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::validation;
use tracing::{info, instrument, warn};

/// Runs a complete assembly: validation, shape construction, and placement.
///
/// Invalid inputs abort the run before any plate is allocated and come back as
/// [`EngineError::InvalidInput`] carrying every problem found. Shapes that fit on
/// no plate do not fail the run; they are listed in
/// [`PlacementResult::unplaced`].
#[instrument(skip_all, name = "assembly_workflow")]
pub fn run(
    input: &AssemblyInput,
    config: &AssemblyConfig,
    reporter: &ProgressReporter,
) -> Result<PlacementResult, EngineError> {
    // === Phase 0: Validation ===
    let report = reporter.phase("Validating inputs", || validation::validate(input, config));
    if !report.is_empty() {
        warn!(errors = report.len(), "Input validation failed; aborting before allocation.");
        return Err(EngineError::InvalidInput(report));
    }

    let geometry = config.geometry().ok_or_else(|| {
        EngineError::Internal(format!(
            "plate size {} passed validation without a geometry",
            config.plate_size
        ))
    })?;
    info!(
        %geometry,
        plate_limit = config.plate_limit,
        experiments = input.samples.len(),
        required_wells = input.required_wells(),
        "Inputs accepted."
    );

    // === Phase 1: Shape construction ===
    let shapes = reporter.phase("Building shapes", || {
        let demand = placement::order_reagents(input);
        placement::build_shapes(input, &demand, geometry, reporter)
    });
    info!(shapes = shapes.len(), "Reagent shapes built and sorted by area.");

    // === Phase 2: Placement ===
    reporter.report(Progress::PhaseStart {
        name: "Placing shapes",
    });
    reporter.report(Progress::TaskStart {
        total: shapes.len() as u64,
    });

    let mut engine = PlacementEngine::new(geometry, config.plate_limit);
    for shape in shapes {
        let reagent = shape.reagent().to_string();
        let (rows, columns) = (shape.rows(), shape.columns());
        let event = match engine.place(shape) {
            Some(placement) => Progress::ShapePlaced {
                reagent,
                plate: placement.plate,
            },
            None => Progress::ShapeUnplaced {
                reagent,
                rows,
                columns,
            },
        };
        reporter.report(event);
        reporter.report(Progress::TaskIncrement { amount: 1 });
    }

    reporter.report(Progress::TaskFinish);

    // === Phase 3: Results ===
    let result = engine.finish();
    if !result.is_complete() {
        warn!(
            unplaced = result.unplaced.len(),
            "Some shapes could not be placed."
        );
        reporter.report(Progress::Message(format!(
            "{} shape(s) could not be placed on {} plate(s).",
            result.unplaced.len(),
            result.plates.len()
        )));
    }
    reporter.report(Progress::PhaseFinish);
    info!(
        placed = result.placements.len(),
        used_plates = result.used_plates(),
        occupied_wells = result.occupied_wells(),
        "Assembly complete."
    );
    Ok(result)
}
