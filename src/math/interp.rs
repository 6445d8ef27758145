//! Reading a table at a fractional position.
//!
//! A phase `p ∈ [0, 1]` maps to position `p * (n - 1)`, split into a node index
//! `i` and fraction `u`. The 4-point kernels read `table[i-1..=i+2]` with indices
//! clamped to the table ends.

use crate::domain::Interpolation;

/// Positions this close to a node are snapped onto it, so `i / (n - 1)` phases
/// hit node `i` instead of `i - 1` with `u ≈ 1`.
const NODE_SNAP: f64 = 1e-9;

/// Sample `table` at `phase` (clamped to `[0, 1]`).
///
/// Returns 0.0 for an empty table.
pub fn sample(table: &[f64], phase: f64, mode: Interpolation) -> f64 {
    let n = table.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return table[0];
    }

    let (i, u) = split_position(phase, n);
    let at = |k: isize| table[k.clamp(0, n as isize - 1) as usize];
    let i = i as isize;

    match mode {
        Interpolation::None => at(i),
        Interpolation::Linear => {
            let a = at(i);
            a + (at(i + 1) - a) * u
        }
        Interpolation::Hermite => hermite4(at(i - 1), at(i), at(i + 1), at(i + 2), u),
        Interpolation::BSpline => bspline4(at(i - 1), at(i), at(i + 1), at(i + 2), u),
    }
}

/// Resample `table` to `points` evenly spaced phases.
pub fn resample(table: &[f64], points: usize, mode: Interpolation) -> Vec<f64> {
    let points = points.max(2);
    (0..points)
        .map(|k| sample(table, k as f64 / (points as f64 - 1.0), mode))
        .collect()
}

fn split_position(phase: f64, n: usize) -> (usize, f64) {
    let phase = if phase.is_nan() { 0.0 } else { phase.clamp(0.0, 1.0) };
    let mut pos = phase * (n as f64 - 1.0);
    let nearest = pos.round();
    if (pos - nearest).abs() < NODE_SNAP {
        pos = nearest;
    }

    let i = (pos.floor() as usize).min(n - 1);
    (i, pos - i as f64)
}

/// 4-point, 3rd-order Hermite (x-form). Passes through `x1` at `t = 0` and `x2` at `t = 1`.
fn hermite4(x0: f64, x1: f64, x2: f64, x3: f64, t: f64) -> f64 {
    let c0 = x1;
    let c1 = 0.5 * (x2 - x0);
    let c2 = x0 - 2.5 * x1 + 2.0 * x2 - 0.5 * x3;
    let c3 = 0.5 * (x3 - x0) + 1.5 * (x1 - x2);
    ((c3 * t + c2) * t + c1) * t + c0
}

/// Uniform cubic B-spline segment. Smooths rather than interpolates: at `u = 0`
/// it yields `(p0 + 4 p1 + p2) / 6`.
fn bspline4(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let a = (-p0 + 3.0 * p1 - 3.0 * p2 + p3) / 6.0;
    let b = (3.0 * p0 - 6.0 * p1 + 3.0 * p2) / 6.0;
    let c = (-3.0 * p0 + 3.0 * p2) / 6.0;
    let d = (p0 + 4.0 * p1 + p2) / 6.0;
    ((a * u + b) * u + c) * u + d
}
