//! ccsmoke - Main Entry Point
//!
//! Parses arguments, initializes logging and runs the smoke tests. The exit
//! code is 0 only when every probe passed.

use std::process::ExitCode;

use ccsmoke::cli::Cli;
use ccsmoke_infrastructure::ConsoleReporter;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_CONFIG_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match Cli::parse().into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let mut reporter = ConsoleReporter::new(std::io::stdout());
    match ccsmoke::run(settings, &mut reporter).await {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "smoke run could not start");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}
