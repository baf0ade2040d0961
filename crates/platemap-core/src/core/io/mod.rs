//! Reading experiment manifests and writing finished plate layouts.
//!
//! Manifests are TOML documents listing experiments; layouts are exported as CSV,
//! one record per occupied well.

pub mod export;
pub mod manifest;
