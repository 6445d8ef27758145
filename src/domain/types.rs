//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - generated in-memory for a single run
//! - exported to JSON
//! - reloaded later for plotting

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of entries in each envelope table.
pub const TABLE_SIZE: usize = 256;

/// Rate of the exponential envelope: `1 - exp(-EXPO_RATE * x)`.
pub const EXPO_RATE: f64 = 3.0;

/// Normalization for the exponential envelope, `1 / (1 - exp(-3))`, so the last
/// entry lands on 1.0.
pub const EXPO_NORM: f64 = 1.052395620771343;

/// One of the generated envelope curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CurveKind {
    Linear,
    Expo,
    /// Named "quartic" by its consumers, but the values are `x^3`.
    Quartic,
}

impl CurveKind {
    /// Plot order: expo first, then linear, then quartic.
    pub const ALL: [CurveKind; 3] = [CurveKind::Expo, CurveKind::Linear, CurveKind::Quartic];

    /// Curves that are written to disk.
    pub const WRITTEN: [CurveKind; 2] = [CurveKind::Expo, CurveKind::Quartic];

    pub fn display_name(self) -> &'static str {
        match self {
            CurveKind::Linear => "linear",
            CurveKind::Expo => "expo",
            CurveKind::Quartic => "quartic",
        }
    }

    /// File stem of the written table; also the C array identifier.
    pub fn table_name(self) -> &'static str {
        match self {
            CurveKind::Linear => "ENV_LINEAR",
            CurveKind::Expo => "ENV_EXPO",
            CurveKind::Quartic => "ENV_QUARTIC",
        }
    }

    /// Glyph used by the ASCII plot.
    pub fn glyph(self) -> char {
        match self {
            CurveKind::Linear => 'l',
            CurveKind::Expo => 'e',
            CurveKind::Quartic => 'q',
        }
    }

    /// Chart colour as RGB, shared by the Plotters series and the Ratatui legend.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            CurveKind::Linear => (255, 200, 0),
            CurveKind::Expo => (0, 255, 255),
            CurveKind::Quartic => (255, 0, 255),
        }
    }
}

/// Output format for the written tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    /// `0.000000f,0.011696f,...` with no brackets and no trailing newline.
    Raw,
    /// A complete `static const float NAME[N] = { ... };` declaration.
    CArray,
}

impl TableFormat {
    /// File name for `kind` in this format.
    pub fn file_name(self, kind: CurveKind) -> String {
        match self {
            TableFormat::Raw => kind.table_name().to_string(),
            TableFormat::CArray => format!("{}.h", kind.table_name()),
        }
    }
}

/// How (and whether) the curves are displayed before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    /// Interactive terminal chart; blocks until closed.
    Tui,
    /// Print an ASCII plot to stdout.
    Ascii,
    /// Skip display.
    None,
}

/// Interpolation used when reading a table at a fractional position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Interpolation {
    None,
    Linear,
    Hermite,
    #[value(name = "bspline")]
    BSpline,
}

/// The three envelope curves of a single run.
///
/// All vectors have length `size`. Built by [`EnvelopeTables::generate`]
/// (see `math::envelope`) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeTables {
    pub size: usize,
    pub linear: Vec<f64>,
    pub expo: Vec<f64>,
    pub quartic: Vec<f64>,
}

impl EnvelopeTables {
    pub fn curve(&self, kind: CurveKind) -> &[f64] {
        match kind {
            CurveKind::Linear => &self.linear,
            CurveKind::Expo => &self.expo,
            CurveKind::Quartic => &self.quartic,
        }
    }

    /// Curves in plot order.
    pub fn iter(&self) -> impl Iterator<Item = (CurveKind, &[f64])> {
        CurveKind::ALL.into_iter().map(move |kind| (kind, self.curve(kind)))
    }
}

/// Everything a `generate` run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub size: usize,
    pub out_dir: PathBuf,
    pub format: TableFormat,
    pub view: ViewMode,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_json: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            size: TABLE_SIZE,
            out_dir: PathBuf::from("."),
            format: TableFormat::Raw,
            view: ViewMode::Tui,
            plot_width: 100,
            plot_height: 25,
            export_json: None,
        }
    }
}

/// Schema of the JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesFile {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub expo_rate: f64,
    pub expo_norm: f64,
    pub tables: EnvelopeTables,
}
