//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - generates the envelope tables
//! - shows them (terminal chart or ASCII plot)
//! - writes the table files and optional exports

use clap::Parser;

use crate::cli::{CheckArgs, Command, GenerateArgs, PlotArgs, SampleArgs};
use crate::domain::{EnvelopeTables, GenerateConfig, ViewMode};
use crate::error::{AppError, EXIT_MISMATCH};

pub mod pipeline;

/// Entry point for the `envlut` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // A bare `envlut` generates with defaults; clap needs the subcommand name.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Plot(args) => handle_plot(args),
        Command::Check(args) => handle_check(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_logging() {
    // `try_init` so repeated calls (tests) don't panic.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = generate_config_from_args(&args);
    let tables = pipeline::generate_tables(&config)?;

    match config.view {
        ViewMode::Tui => {
            crate::tui::run(&tables)?;
            log::info!("viewer closed");
        }
        ViewMode::Ascii => {
            println!(
                "{}",
                crate::plot::render_ascii_plot(&tables, config.plot_width, config.plot_height)
            );
        }
        ViewMode::None => {}
    }

    let run = pipeline::write_outputs(&tables, &config)?;
    for path in &run.written {
        println!("wrote {}", path.display());
    }
    if let Some(path) = &run.export {
        println!("exported {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let tables = match &args.from_json {
        Some(path) => crate::io::read_tables_json(path)?.tables,
        None => EnvelopeTables::generate(args.size)?,
    };

    println!("{}", crate::plot::render_ascii_plot(&tables, args.width, args.height));
    println!("{}", crate::report::format_stats(&crate::report::curve_stats(&tables)));
    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let tables = EnvelopeTables::generate(args.size)?;
    let checks = crate::report::verify_tables(&args.dir, &tables, args.format)?;

    print!("{}", crate::report::format_checks(&checks));

    let failed = checks.iter().filter(|c| !c.passed()).count();
    if failed > 0 {
        return Err(AppError::new(
            EXIT_MISMATCH,
            format!("{failed} table(s) do not match the generated curves."),
        ));
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let tables = EnvelopeTables::generate(args.size)?;
    let value = crate::math::sample(tables.curve(args.curve), args.phase, args.interp);
    println!("{value:.6}");
    Ok(())
}

pub fn generate_config_from_args(args: &GenerateArgs) -> GenerateConfig {
    GenerateConfig {
        size: args.size,
        out_dir: args.out_dir.clone(),
        format: args.format,
        view: args.view,
        plot_width: args.width,
        plot_height: args.height,
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `envlut` defaults to `envlut generate`.
///
/// Rules:
/// - `envlut`                      -> `envlut generate`
/// - `envlut --view none ...`      -> `envlut generate --view none ...`
/// - `envlut --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("generate".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "generate" | "plot" | "check" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "generate flags".
    if arg1.starts_with('-') {
        argv.insert(1, "generate".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::{TABLE_SIZE, TableFormat};
    use crate::error::EXIT_IO;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_generates() {
        assert_eq!(rewrite_args(args(&["envlut"])), args(&["envlut", "generate"]));
    }

    #[test]
    fn leading_flags_belong_to_generate() {
        assert_eq!(
            rewrite_args(args(&["envlut", "--view", "none"])),
            args(&["envlut", "generate", "--view", "none"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(args(&["envlut", "check"])), args(&["envlut", "check"]));
        assert_eq!(rewrite_args(args(&["envlut", "--help"])), args(&["envlut", "--help"]));
    }

    #[test]
    fn config_mirrors_args() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(args(&["envlut", "--size", "64"])));
        let Command::Generate(generate) = cli.command else {
            panic!("expected generate");
        };
        let config = generate_config_from_args(&generate);
        assert_eq!(config.size, 64);
        assert_eq!(config.view, ViewMode::Tui);
        assert_eq!(config.plot_width, 100);
    }

    fn check_args(dir: &std::path::Path, format: TableFormat) -> CheckArgs {
        CheckArgs {
            dir: dir.to_path_buf(),
            size: TABLE_SIZE,
            format,
        }
    }

    fn write_fresh(dir: &std::path::Path, format: TableFormat) {
        let tables = EnvelopeTables::generate(TABLE_SIZE).unwrap();
        crate::io::write_tables(dir, &tables, format).unwrap();
    }

    #[test]
    fn check_accepts_fresh_tables_in_both_formats() {
        for format in [TableFormat::Raw, TableFormat::CArray] {
            let dir = tempfile::tempdir().unwrap();
            write_fresh(dir.path(), format);
            assert!(handle_check(check_args(dir.path(), format)).is_ok(), "{format:?}");
        }
    }

    #[test]
    fn check_rejects_an_edited_record() {
        for format in [TableFormat::Raw, TableFormat::CArray] {
            let dir = tempfile::tempdir().unwrap();
            write_fresh(dir.path(), format);

            let path = dir.path().join(format.file_name(crate::domain::CurveKind::Expo));
            let text = fs::read_to_string(&path).unwrap();
            let edited = text.replacen("0.000000f,", "0.100000f,", 1);
            assert_ne!(text, edited);
            fs::write(&path, edited).unwrap();

            let err = handle_check(check_args(dir.path(), format)).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_MISMATCH, "{format:?}");
        }
    }

    #[test]
    fn check_reports_missing_tables_as_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = handle_check(check_args(dir.path(), TableFormat::Raw)).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
    }
}
