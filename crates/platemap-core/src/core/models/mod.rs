//! # Models Module
//!
//! Value types shared by every layer of the crate.
//!
//! - **Experiments** ([`experiment`]) - The raw, index-correlated assembly input
//! - **Wells** ([`well`]) - The structured `(sample, reagent)` payload of a well and well coordinates
//! - **Geometry** ([`geometry`]) - The supported 96- and 384-well plate formats
//! - **Shapes** ([`shape`]) - Per-reagent rectangular blocks and their plate-sized decomposition
//! - **Plates** ([`plate`]) - The well matrix with free-space queries, fit checks, and placement

pub mod experiment;
pub mod geometry;
pub mod plate;
pub mod shape;
pub mod well;
