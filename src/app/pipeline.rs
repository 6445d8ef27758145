//! Shared "generate → write" logic used by the CLI front-end.
//!
//! Display sits between the two steps and is owned by the caller, so the
//! pipeline itself stays free of terminal handling and is testable headless.

use std::path::PathBuf;

use crate::domain::{EnvelopeTables, GenerateConfig};
use crate::error::AppError;

/// Files produced by a single `envlut generate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Table files, expo first.
    pub written: Vec<PathBuf>,
    pub export: Option<PathBuf>,
}

/// Step 1: build the curves.
pub fn generate_tables(config: &GenerateConfig) -> Result<EnvelopeTables, AppError> {
    let tables = EnvelopeTables::generate(config.size)?;
    log::info!("generated {} entries per curve", tables.size);
    Ok(tables)
}

/// Step 3: write the expo and quartic tables, then the optional JSON export.
pub fn write_outputs(tables: &EnvelopeTables, config: &GenerateConfig) -> Result<RunOutput, AppError> {
    let written = crate::io::write_tables(&config.out_dir, tables, config.format)?;

    let export = match &config.export_json {
        Some(path) => {
            crate::io::write_tables_json(path, tables)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunOutput { written, export })
}
