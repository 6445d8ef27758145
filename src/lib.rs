//! `env-lut` library crate.
//!
//! Generates envelope lookup tables (linear, exponential and "quartic" curves),
//! shows them, and writes them out as C float literals.
//!
//! The binary (`envlut`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the table math and writers are reusable from other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
