//! Envelope curve formulas and table generation.
//!
//! All curves are functions of the normalized ramp value `x ∈ [0, 1]`:
//!
//! - linear:  `x`
//! - expo:    `(1 - exp(-3x)) * 1.052395620771343`
//! - quartic: `x^3`
//!
//! The expo form is computed as `-expm1(-3x)` which is exact to the last bit
//! for small `x` where `1 - exp(-3x)` would cancel.

use crate::domain::{EXPO_NORM, EXPO_RATE, EnvelopeTables};
use crate::error::AppError;

/// `i / (size - 1)` for `i in 0..size`.
///
/// Each entry is computed by a single division so `ramp[i] == i as f64 / 255.0`
/// holds exactly for the default size.
pub fn linear_ramp(size: usize) -> Vec<f64> {
    let last = (size.max(2) - 1) as f64;
    (0..size).map(|i| i as f64 / last).collect()
}

/// Exponential envelope value at ramp position `x`.
pub fn expo(x: f64) -> f64 {
    -(-EXPO_RATE * x).exp_m1() * EXPO_NORM
}

/// "Quartic" envelope value at ramp position `x` (a cube).
pub fn quartic(x: f64) -> f64 {
    x * x * x
}

impl EnvelopeTables {
    /// Build the three curves over `size` entries.
    pub fn generate(size: usize) -> Result<Self, AppError> {
        if size < 2 {
            return Err(AppError::io(format!(
                "Table size must be at least 2 (got {size})."
            )));
        }

        let linear = linear_ramp(size);
        let expo_curve = linear.iter().map(|&x| expo(x)).collect();
        let quartic_curve = linear.iter().map(|&x| quartic(x)).collect();

        let tables = Self {
            size,
            linear,
            expo: expo_curve,
            quartic: quartic_curve,
        };
        log::debug!(
            "generated {size}-entry tables: expo[last]={:.9}, quartic[last]={:.9}",
            tables.expo[size - 1],
            tables.quartic[size - 1]
        );
        Ok(tables)
    }
}

/// True when every element is strictly greater than its predecessor.
pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[1] > w[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TABLE_SIZE;

    fn tables() -> EnvelopeTables {
        EnvelopeTables::generate(TABLE_SIZE).unwrap()
    }

    #[test]
    fn linear_ramp_is_exact_division() {
        let t = tables();
        assert_eq!(t.linear.len(), 256);
        for (i, &v) in t.linear.iter().enumerate() {
            assert_eq!(v, i as f64 / 255.0, "linear[{i}]");
        }
    }

    #[test]
    fn expo_matches_reference_formula() {
        let t = tables();
        for (i, (&x, &y)) in t.linear.iter().zip(t.expo.iter()).enumerate() {
            let reference = (1.0 - (-3.0 * x).exp()) * 1.052395620771343;
            assert!((y - reference).abs() < 1e-9, "expo[{i}] = {y}, expected {reference}");
        }
    }

    #[test]
    fn quartic_is_a_cube() {
        let t = tables();
        for (i, (&x, &y)) in t.linear.iter().zip(t.quartic.iter()).enumerate() {
            assert!((y - x.powi(3)).abs() < 1e-9, "quartic[{i}]");
        }
    }

    #[test]
    fn curves_start_at_zero_and_end_near_one() {
        let t = tables();
        assert_eq!(t.linear[0], 0.0);
        assert_eq!(t.expo[0], 0.0);
        assert_eq!(t.quartic[0], 0.0);

        assert_eq!(t.linear[255], 1.0);
        assert_eq!(t.quartic[255], 1.0);
        assert!((t.expo[255] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn curves_are_strictly_increasing() {
        let t = tables();
        assert!(is_strictly_increasing(&t.linear));
        assert!(is_strictly_increasing(&t.expo));
        assert!(is_strictly_increasing(&t.quartic));
    }

    #[test]
    fn expo_is_concave_quartic_is_convex() {
        let t = tables();
        for i in 1..255 {
            assert!(t.expo[i] > t.linear[i], "expo above ramp at {i}");
            assert!(t.quartic[i] < t.linear[i], "quartic below ramp at {i}");
        }
    }

    #[test]
    fn rejects_degenerate_size() {
        let err = EnvelopeTables::generate(1).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
        assert!(EnvelopeTables::generate(2).is_ok());
    }
}
