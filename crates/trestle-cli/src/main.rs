//! Trestle CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use trestle_cli::{Args, Outcome, error_adapter::to_reportable};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let mut log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    if args.verbose {
        log_level = log_level.max(LevelFilter::Debug);
    }

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Trestle");
    debug!(args:?; "Parsed arguments");

    match trestle_cli::run(&args) {
        Ok(Outcome::Success) => info!("Completed successfully"),
        Ok(Outcome::LintFailures(failures)) => {
            error!(failures; "Some definitions failed to lint");
            process::exit(1);
        }
        Err(err) => {
            let reportable = to_reportable(&err);
            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            if reporter.render_report(&mut writer, &reportable).is_err() {
                writer = err.to_string();
            }

            error!("{writer}");
            process::exit(1);
        }
    }
}
