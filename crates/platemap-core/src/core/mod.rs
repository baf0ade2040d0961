//! # Core Module
//!
//! This module provides the stateless building blocks of plate assembly: the data
//! models describing wells, shapes, and plates, and the file formats used to get
//! experiments in and plate layouts out.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Wells, plate geometries, reagent shapes, and plate grids
//! - **File I/O** ([`io`]) - Experiment manifests (TOML) and layout export (CSV)
//!
//! ## Key Capabilities
//!
//! - **Shape construction** turning one experiment's samples and replicates into a well block
//! - **Shape decomposition** splitting blocks that exceed a plate by width and/or height
//! - **Plate bookkeeping** with row-major free-space scans and column-major fit checks

pub mod io;
pub mod models;
