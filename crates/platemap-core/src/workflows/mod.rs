//! # Workflows Module
//!
//! High-level entry points that drive a complete plate assembly.
//!
//! ## Overview
//!
//! A workflow ties validation, shape construction, and placement together behind a
//! single call, reporting progress along the way. Its output is then projected into
//! the `[plate][row][column]` layout consumed by exporters and front ends.
//!
//! ## Architecture
//!
//! - **Assembly Workflow** ([`assemble`]) - Validates inputs, builds and orders reagent
//!   shapes, and places them first-fit onto a fixed number of plates.
//! - **Result Projection** ([`project`]) - Turns the filled plates into a read-only
//!   layout of `(sample, reagent)` pairs with a summary of anything left unplaced.

pub mod assemble;
pub mod project;
