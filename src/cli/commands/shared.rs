//! Shared components for CLI commands
//!
//! Logging setup, layered configuration and the loader's final report.

use crate::cli::args::{LogArgs, StoreArgs};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::LoadReport;
use colored::*;
use indicatif::HumanDuration;
use tracing::{debug, info};

/// Set up structured logging on stderr
pub fn setup_logging(args: &LogArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("records_service={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Defaults, then environment, then flags
pub fn load_store_config(args: &StoreArgs) -> Result<StoreConfig> {
    let config = args.apply(StoreConfig::from_env());
    config.validate()?;
    info!(
        "Using collection {}.{}",
        config.database, config.collection
    );
    Ok(config)
}

/// Print the loader summary to stdout
pub fn print_load_report(report: &LoadReport) {
    let duration = HumanDuration(report.elapsed);

    println!();
    if report.dry_run {
        println!("{}", "Dry run complete (store untouched)".bright_yellow().bold());
    } else {
        println!("{}", "Load complete".bright_green().bold());
    }
    println!("  {} {}", "Input:".bright_cyan(), report.input_path.display());
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        report.rows_read.to_string().bright_white().bold()
    );
    if !report.dry_run {
        println!(
            "  {} {}",
            "Inserted:".bright_cyan(),
            report.records_inserted.to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "Timestamp index:".bright_cyan(),
            if report.index_ensured { "ready" } else { "missing" }
        );
    }
    println!("  {} {}", "Elapsed:".bright_cyan(), duration);
}
