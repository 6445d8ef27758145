//! Numeric core: envelope formulas and table lookup.

pub mod envelope;
pub mod interp;

pub use envelope::*;
pub use interp::*;
