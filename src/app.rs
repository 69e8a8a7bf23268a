//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that
//! parses CLI arguments, runs the load pipeline, and routes the composed
//! table to a front-end (TUI dashboard, terminal tables, or CSV export).

use clap::Parser;

use crate::cli::{Command, DataArgs, ExportArgs, TableArgs};
use crate::domain::LoadConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `wdash` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `wdash` (and `wdash --sample` etc.) to behave like
    // `wdash show`. Clap requires a subcommand name, so we do a small,
    // explicit rewrite of the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => crate::tui::run(load_config_from_args(&args)),
        Command::Table(args) => handle_table(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let config = load_config_from_args(&args.data);
    let dashboard = pipeline::run_load(&config)?;
    let fmt = args.locale.number_format();

    print!(
        "{}",
        crate::report::format_run_summary(&dashboard, &config)
    );
    println!();
    print!(
        "{}",
        crate::report::format_composed_table(&dashboard.composed, &fmt)
    );
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = load_config_from_args(&args.data);
    let dashboard = pipeline::run_load(&config)?;
    crate::io::export::write_composed_csv(&args.out, &dashboard.composed)?;
    println!(
        "Wrote {} composed rows to '{}'.",
        dashboard.composed.len(),
        args.out.display()
    );
    Ok(())
}

pub fn load_config_from_args(args: &DataArgs) -> LoadConfig {
    LoadConfig {
        source: crate::data::DataSource::resolve(args.data.as_deref(), args.sample),
        base_year_included: args.include_base_year,
        invalid_policy: args.invalid_policy,
        base_position: args.base_position,
    }
}

/// Rewrite argv so `wdash` defaults to `wdash show`.
///
/// Rules:
/// - `wdash`                     -> `wdash show`
/// - `wdash --sample ...`        -> `wdash show --sample ...`
/// - `wdash --help/--version/-h` -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "table" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_show() {
        assert_eq!(rewrite_args(args(&["wdash"])), args(&["wdash", "show"]));
    }

    #[test]
    fn leading_flag_routes_to_show() {
        assert_eq!(
            rewrite_args(args(&["wdash", "--sample"])),
            args(&["wdash", "show", "--sample"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["wdash", "table"])),
            args(&["wdash", "table"])
        );
        assert_eq!(
            rewrite_args(args(&["wdash", "--help"])),
            args(&["wdash", "--help"])
        );
    }
}
