//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - curve identities and output options (`CurveKind`, `TableFormat`, `ViewMode`, `Interpolation`)
//! - the generated tables (`EnvelopeTables`)
//! - run configuration (`GenerateConfig`) and the JSON export schema (`TablesFile`)

pub mod types;

pub use types::*;
