pub mod assemble;
pub mod show;

use crate::cli::LayoutArgs;
use crate::config::PartialAssemblyConfig;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use platemap::core::io::manifest::ExperimentManifest;
use platemap::engine::progress::ProgressReporter;
use platemap::workflows::{self, project::PlateLayout};
use tokio::sync::mpsc;
use tracing::info;

/// Loads the manifest and configuration named by `args`, runs the assembly,
/// and projects the filled plates.
pub(crate) fn assemble_layout(
    args: &LayoutArgs,
    ui_sender: mpsc::Sender<UiEvent>,
) -> Result<PlateLayout> {
    let partial_config = PartialAssemblyConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(args)?;

    info!("Loading experiments from {:?}", &args.input);
    let input = ExperimentManifest::read_from_path(&args.input)?.into_input();

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core assembly workflow...");
    let result =
        tokio::task::block_in_place(|| workflows::assemble::run(&input, &config, &reporter))?;

    Ok(workflows::project::project(&result))
}

/// Prints the shapes that found no room, if any.
pub(crate) fn report_unplaced(layout: &PlateLayout) {
    if layout.unplaced.is_empty() {
        return;
    }
    tracing::warn!(
        count = layout.unplaced.len(),
        "Some shapes could not be placed."
    );
    println!("Warning: could not fit the following:\n");
    for summary in &layout.unplaced {
        println!("{}", summary);
    }
    println!();
}
