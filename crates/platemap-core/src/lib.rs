//! # Platemap Core Library
//!
//! Assigns laboratory samples, paired with reagents and replicate counts, to the wells
//! of 96- or 384-well microtiter plates.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Shape`, `PlateGrid`,
//!   `WellLabel`) and file formats for experiment manifests and layout export.
//!
//! - **[`engine`]: The Logic Core.** Input validation and the greedy placement engine
//!   that decomposes oversized shapes and packs them first-fit onto a fixed plate array.
//!
//! - **[`workflows`]: The Public API.** Complete procedures tying the layers together:
//!   [`workflows::assemble`] runs validation and placement end to end, and
//!   [`workflows::project`] turns the result into the `[plate][row][column]` layout
//!   consumed by displays and exporters.
//!
//! ## Example
//!
//! ```
//! use platemap::core::models::experiment::AssemblyInput;
//! use platemap::engine::config::AssemblyConfigBuilder;
//! use platemap::engine::progress::ProgressReporter;
//! use platemap::workflows::{assemble, project};
//!
//! let input = AssemblyInput::default()
//!     .with_experiment(["Sample-1", "Sample-2"], ["<Pink>", "<Green>"], 3);
//! let config = AssemblyConfigBuilder::new().plate_size(96).plate_limit(1).build()?;
//!
//! let result = assemble::run(&input, &config, &ProgressReporter::new())?;
//! let layout = project::project(&result);
//!
//! let well = layout.well(0, 0, 0).expect("top-left well is filled");
//! assert_eq!(well.sample(), "Sample-1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
