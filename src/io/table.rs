//! Write and read envelope tables as C float literals.
//!
//! Raw format: every value is written as `%.6f` followed by `f,`, records are
//! concatenated with nothing in between and there is no trailing newline:
//!
//! ```text
//! 0.000000f,0.012316f,0.024488f,...,1.000000f,
//! ```
//!
//! The C-array format wraps the same records in a complete declaration so the
//! file can be `#include`d directly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{CurveKind, EnvelopeTables, TableFormat};
use crate::error::AppError;

/// Records per line in the C-array format.
const RECORDS_PER_LINE: usize = 8;

/// Format a single record: `0.123457f,`.
pub fn format_record(value: f64) -> String {
    format!("{value:.6}f,")
}

/// Format a whole table in the raw format.
pub fn format_raw(values: &[f64]) -> String {
    values.iter().map(|&v| format_record(v)).collect()
}

/// Format a whole table as a C array declaration named `name`.
pub fn format_c_array(name: &str, values: &[f64]) -> String {
    let mut out = format!("static const float {name}[{}] = {{\n", values.len());
    for chunk in values.chunks(RECORDS_PER_LINE) {
        out.push_str("    ");
        out.push_str(&format_raw(chunk));
        out.push('\n');
    }
    out.push_str("};\n");
    out
}

/// Format `kind`'s table in the requested format.
pub fn format_table(kind: CurveKind, values: &[f64], format: TableFormat) -> String {
    match format {
        TableFormat::Raw => format_raw(values),
        TableFormat::CArray => format_c_array(kind.table_name(), values),
    }
}

/// Write one table to `path`, replacing any existing file.
pub fn write_table(
    path: &Path,
    kind: CurveKind,
    values: &[f64],
    format: TableFormat,
) -> Result<(), AppError> {
    fs::write(path, format_table(kind, values, format))
        .map_err(|e| AppError::io(format!("Failed to write table '{}': {e}", path.display())))?;
    log::info!("wrote {} ({} values)", path.display(), values.len());
    Ok(())
}

/// Write the expo and quartic tables into `dir`, in that order.
///
/// Stops at the first failure; returns the written paths otherwise.
pub fn write_tables(
    dir: &Path,
    tables: &EnvelopeTables,
    format: TableFormat,
) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::with_capacity(CurveKind::WRITTEN.len());
    for kind in CurveKind::WRITTEN {
        let path = dir.join(format.file_name(kind));
        write_table(&path, kind, tables.curve(kind), format)?;
        written.push(path);
    }
    Ok(written)
}

/// Parse table text in either format back into values.
///
/// When the text contains a `{ ... }` block only its body is parsed. Every
/// record must end in `f`; whitespace around records is ignored.
pub fn parse_table(text: &str) -> Result<Vec<f64>, AppError> {
    let body = match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if open < close => &text[open + 1..close],
        (None, None) => text,
        _ => return Err(AppError::io("Unbalanced braces in table text.")),
    };

    let body = body.trim();
    let body = body.strip_suffix(',').unwrap_or(body);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .enumerate()
        .map(|(idx, token)| parse_record(idx, token.trim()))
        .collect()
}

fn parse_record(idx: usize, token: &str) -> Result<f64, AppError> {
    let number = token
        .strip_suffix('f')
        .ok_or_else(|| AppError::io(format!("Record {idx} ('{token}') is missing the 'f' suffix.")))?;
    number
        .parse::<f64>()
        .map_err(|e| AppError::io(format!("Record {idx} ('{token}') is not a number: {e}")))
}

/// Read and parse a table file.
pub fn read_table(path: &Path) -> Result<Vec<f64>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read table '{}': {e}", path.display())))?;
    parse_table(&text).map_err(|e| AppError::io(format!("{}: {}", path.display(), e.message())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TABLE_SIZE;

    fn tables() -> EnvelopeTables {
        EnvelopeTables::generate(TABLE_SIZE).unwrap()
    }

    #[test]
    fn record_format_matches_c_literal() {
        assert_eq!(format_record(0.0), "0.000000f,");
        assert_eq!(format_record(1.0), "1.000000f,");
        assert_eq!(format_record(0.1234567), "0.123457f,");
        assert_eq!(format_raw(&[0.5, 0.25]), "0.500000f,0.250000f,");
    }

    #[test]
    fn expo_file_has_256_suffixed_records() {
        let dir = tempfile::tempdir().unwrap();
        let t = tables();
        write_tables(dir.path(), &t, TableFormat::Raw).unwrap();

        let text = fs::read_to_string(dir.path().join("ENV_EXPO")).unwrap();
        assert!(text.ends_with("f,"));
        assert!(!text.contains('\n'));
        assert!(text.starts_with("0.000000f,"));

        let tokens: Vec<&str> = text.strip_suffix(',').unwrap().split(',').collect();
        assert_eq!(tokens.len(), 256);
        for (i, token) in tokens.iter().enumerate() {
            let number = token.strip_suffix('f').expect("record ends in f");
            let v: f64 = number.parse().unwrap();
            assert!((v - t.expo[i]).abs() <= 5e-7 + 1e-12, "ENV_EXPO[{i}] = {v}");
        }
    }

    #[test]
    fn quartic_round_trips_to_six_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let t = tables();
        write_tables(dir.path(), &t, TableFormat::Raw).unwrap();

        let values = read_table(&dir.path().join("ENV_QUARTIC")).unwrap();
        assert_eq!(values.len(), 256);
        for (i, &v) in values.iter().enumerate() {
            let x = i as f64 / 255.0;
            assert!((v - x.powi(3)).abs() <= 5e-7 + 1e-12, "ENV_QUARTIC[{i}] = {v}");
        }
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ENV_EXPO");
        fs::write(&path, "stale contents that are longer than the table").unwrap();

        write_table(&path, CurveKind::Expo, &[0.25], TableFormat::Raw).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0.250000f,");
    }

    #[test]
    fn c_array_declares_and_parses_back() {
        let t = tables();
        let text = format_table(CurveKind::Quartic, &t.quartic, TableFormat::CArray);
        assert!(text.starts_with("static const float ENV_QUARTIC[256] = {\n"));
        assert!(text.ends_with("};\n"));
        assert_eq!(text.lines().count(), 256 / 8 + 2);

        let values = parse_table(&text).unwrap();
        assert_eq!(values.len(), 256);
        assert!((values[128] - t.quartic[128]).abs() <= 5e-7 + 1e-12);
    }

    #[test]
    fn parse_rejects_missing_suffix() {
        let err = parse_table("0.100000f,0.200000,0.300000f,").unwrap_err();
        assert!(err.message().contains("Record 1"), "{err}");
    }

    #[test]
    fn parse_rejects_garbage_number() {
        let err = parse_table("0.1f,abcf,").unwrap_err();
        assert!(err.message().contains("not a number"), "{err}");
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_table("").unwrap().is_empty());
        assert!(parse_table("static const float X[0] = {\n};\n").unwrap().is_empty());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_tables(&missing, &tables(), TableFormat::Raw).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
        assert!(err.message().contains("ENV_EXPO"));
        assert!(!missing.join("ENV_QUARTIC").exists());
    }
}
