//! Command-line parsing for the envelope table generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the table math and I/O.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{CurveKind, Interpolation, TABLE_SIZE, TableFormat, ViewMode};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "envlut", version, about = "Envelope lookup table generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the tables, show them, then write ENV_EXPO and ENV_QUARTIC.
    ///
    /// This is what a bare `envlut` runs.
    Generate(GenerateArgs),
    /// Print an ASCII plot of the curves (freshly generated or from a JSON export).
    Plot(PlotArgs),
    /// Read back written tables and compare them with freshly generated curves.
    Check(CheckArgs),
    /// Read one curve at a fractional phase.
    Sample(SampleArgs),
}

/// Options for `generate`.
#[derive(Debug, Parser, Clone)]
pub struct GenerateArgs {
    /// Number of entries per table.
    #[arg(long, default_value_t = TABLE_SIZE)]
    pub size: usize,

    /// Directory the tables are written into.
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Output format of the written tables.
    #[arg(long, value_enum, default_value_t = TableFormat::Raw)]
    pub format: TableFormat,

    /// How to display the curves before writing.
    #[arg(long, value_enum, default_value_t = ViewMode::Tui)]
    pub view: ViewMode,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also export all three curves to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for `plot`.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Number of entries per table (ignored with --from-json).
    #[arg(long, default_value_t = TABLE_SIZE)]
    pub size: usize,

    /// Plot a JSON file produced by `envlut generate --export-json`.
    #[arg(long = "from-json", value_name = "JSON")]
    pub from_json: Option<PathBuf>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for `check`.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Directory holding the written tables.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Number of entries the tables were generated with.
    #[arg(long, default_value_t = TABLE_SIZE)]
    pub size: usize,

    /// Format the tables were written in.
    #[arg(long, value_enum, default_value_t = TableFormat::Raw)]
    pub format: TableFormat,
}

/// Options for `sample`.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Curve to read.
    #[arg(long, value_enum)]
    pub curve: CurveKind,

    /// Normalized position in [0, 1]; values outside are clamped.
    #[arg(long, allow_negative_numbers = true)]
    pub phase: f64,

    /// Interpolation between table entries.
    #[arg(long, value_enum, default_value_t = Interpolation::Linear)]
    pub interp: Interpolation,

    /// Number of entries per table.
    #[arg(long, default_value_t = TABLE_SIZE)]
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["envlut", "generate"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.size, 256);
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert_eq!(args.format, TableFormat::Raw);
        assert_eq!(args.view, ViewMode::Tui);
        assert!(args.export_json.is_none());
    }

    #[test]
    fn value_enums_parse() {
        let cli = Cli::try_parse_from([
            "envlut", "generate", "--format", "c-array", "--view", "none",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.format, TableFormat::CArray);
        assert_eq!(args.view, ViewMode::None);

        let cli = Cli::try_parse_from([
            "envlut", "sample", "--curve", "quartic", "--phase", "0.5", "--interp", "bspline",
        ])
        .unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.curve, CurveKind::Quartic);
        assert_eq!(args.interp, Interpolation::BSpline);
    }

    #[test]
    fn sample_requires_curve() {
        assert!(Cli::try_parse_from(["envlut", "sample", "--phase", "0.5"]).is_err());
    }
}
