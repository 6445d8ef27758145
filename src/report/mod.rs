//! Reporting utilities: curve statistics and read-back verification.

use std::path::{Path, PathBuf};

use crate::domain::{CurveKind, EnvelopeTables, TableFormat};
use crate::error::AppError;
use crate::io::read_table;
use crate::math::is_strictly_increasing;

pub mod format;

pub use format::*;

/// Largest accepted difference between a written record and the curve value.
///
/// Records carry 6 decimals, so rounding alone accounts for up to `5e-7`.
pub const CHECK_TOLERANCE: f64 = 1e-6;

/// Summary of one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStats {
    pub kind: CurveKind,
    pub len: usize,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub strictly_increasing: bool,
}

/// Result of reading back one written table.
#[derive(Debug, Clone)]
pub struct TableCheck {
    pub kind: CurveKind,
    pub path: PathBuf,
    pub expected_len: usize,
    pub found_len: usize,
    /// Largest `|written - expected|` over the overlapping prefix.
    pub max_abs_diff: f64,
    /// Index of the first record outside [`CHECK_TOLERANCE`], if any.
    pub first_mismatch: Option<usize>,
}

impl TableCheck {
    pub fn passed(&self) -> bool {
        self.expected_len == self.found_len && self.first_mismatch.is_none()
    }
}

/// Stats for every curve, in plot order.
pub fn curve_stats(tables: &EnvelopeTables) -> Vec<CurveStats> {
    tables
        .iter()
        .map(|(kind, values)| {
            let (min, max) = values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            CurveStats {
                kind,
                len: values.len(),
                first: values.first().copied().unwrap_or(f64::NAN),
                last: values.last().copied().unwrap_or(f64::NAN),
                min,
                max,
                strictly_increasing: is_strictly_increasing(values),
            }
        })
        .collect()
}

/// Compare parsed `values` against `expected`.
pub fn compare_table(kind: CurveKind, path: &Path, values: &[f64], expected: &[f64]) -> TableCheck {
    let mut max_abs_diff: f64 = 0.0;
    let mut first_mismatch = None;
    for (i, (&got, &want)) in values.iter().zip(expected.iter()).enumerate() {
        let diff = (got - want).abs();
        // Written as a negation so NaN counts as a mismatch.
        if !(diff <= CHECK_TOLERANCE) && first_mismatch.is_none() {
            first_mismatch = Some(i);
        }
        if diff.is_finite() {
            max_abs_diff = max_abs_diff.max(diff);
        }
    }

    TableCheck {
        kind,
        path: path.to_path_buf(),
        expected_len: expected.len(),
        found_len: values.len(),
        max_abs_diff,
        first_mismatch,
    }
}

/// Read back every written table in `dir` and compare it to `tables`.
///
/// I/O and parse failures propagate; value mismatches are reported in the result.
pub fn verify_tables(
    dir: &Path,
    tables: &EnvelopeTables,
    format: TableFormat,
) -> Result<Vec<TableCheck>, AppError> {
    CurveKind::WRITTEN
        .iter()
        .map(|&kind| {
            let path = dir.join(format.file_name(kind));
            let values = read_table(&path)?;
            let check = compare_table(kind, &path, &values, tables.curve(kind));
            log::debug!(
                "{}: {} values, max diff {:.3e}",
                path.display(),
                check.found_len,
                check.max_abs_diff
            );
            Ok(check)
        })
        .collect()
}
