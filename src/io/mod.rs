//! Input/output helpers.
//!
//! - C float literal tables, raw and C-array (`table`)
//! - JSON export of a whole run (`export`)

pub mod export;
pub mod table;

pub use export::*;
pub use table::*;
