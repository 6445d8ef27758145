//! Read/write the JSON export of a run.
//!
//! The export holds all three curves plus the constants used to build them, so
//! a run can be re-plotted later without regenerating. The schema is defined by
//! `domain::TablesFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{EXPO_NORM, EXPO_RATE, EnvelopeTables, TablesFile};
use crate::error::AppError;

/// Write the tables as pretty JSON.
pub fn write_tables_json(path: &Path, tables: &EnvelopeTables) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create JSON export '{}': {e}", path.display())))?;

    let export = TablesFile {
        tool: "envlut".to_string(),
        generated_at: chrono::Utc::now(),
        expo_rate: EXPO_RATE,
        expo_norm: EXPO_NORM,
        tables: tables.clone(),
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| AppError::io(format!("Failed to write JSON export: {e}")))?;
    log::info!("wrote {}", path.display());

    Ok(())
}

/// Read a JSON export.
pub fn read_tables_json(path: &Path) -> Result<TablesFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open JSON export '{}': {e}", path.display())))?;
    let export: TablesFile =
        serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid JSON export: {e}")))?;

    let t = &export.tables;
    if t.linear.len() != t.size || t.expo.len() != t.size || t.quartic.len() != t.size {
        return Err(AppError::io(format!(
            "JSON export '{}' declares size {} but holds {}/{}/{} values.",
            path.display(),
            t.size,
            t.linear.len(),
            t.expo.len(),
            t.quartic.len()
        )));
    }
    Ok(export)
}
