//! Formatted terminal output for stats and checks.
//!
//! We keep formatting code in one place so:
//! - the math code stays clean and testable
//! - output changes are localized

use super::{CHECK_TOLERANCE, CurveStats, TableCheck};

/// Format per-curve stats as a small table.
pub fn format_stats(stats: &[CurveStats]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:<10}\n",
        "curve", "n", "first", "last", "min", "max", "monotonic"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<6} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", "", ""
    ));

    for s in stats {
        out.push_str(
            format!(
                "{:<10} {:>6} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:<10}\n",
                s.kind.display_name(),
                s.len,
                s.first,
                s.last,
                s.min,
                s.max,
                if s.strictly_increasing { "yes" } else { "no" },
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format read-back results, one line per file.
pub fn format_checks(checks: &[TableCheck]) -> String {
    let mut out = String::new();
    for c in checks {
        let status = if c.passed() { "ok" } else { "FAIL" };
        out.push_str(&format!(
            "{status:<4} {} ({}): {}/{} values, max |diff| = {:.2e}",
            c.path.display(),
            c.kind.display_name(),
            c.found_len,
            c.expected_len,
            c.max_abs_diff,
        ));
        if let Some(i) = c.first_mismatch {
            out.push_str(&format!(", first value off by more than {CHECK_TOLERANCE:e} at index {i}"));
        }
        out.push('\n');
    }
    out
}
