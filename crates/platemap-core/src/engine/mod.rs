//! # Engine Module
//!
//! This module implements the assembly engine: it checks raw inputs, turns reagent
//! demand into plate-sized shapes, and packs those shapes onto a fixed array of
//! plates.
//!
//! ## Overview
//!
//! Assembly is a single deterministic pass. Inputs are validated exhaustively before
//! any plate is allocated; reagents are processed from the largest experiment down;
//! their shapes are decomposed to fit a plate and sorted by area; and each shape is
//! placed first-fit. Shapes that fit nowhere are reported, never retried.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Plate size selector, plate limit, and capacity policy
//! - **Validation** ([`validation`]) - Accumulating pre-flight checks on the raw inputs
//! - **Placement** ([`placement`]) - Reagent ordering, shape construction, and first-fit packing
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod placement;
pub mod progress;
pub mod validation;
