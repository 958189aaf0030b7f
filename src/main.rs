//! Strategy parameter generator - main entry point
//!
//! This binary provides two subcommands:
//! - generate: Write one parameter CSV per instrument (default when no subcommand is given)
//! - validate: Check existing parameter CSVs against the column ranges

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "strategy-params")]
#[command(about = "Seeded random parameter sets for strategy backtesting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate parameter CSV files
    Generate {
        /// Path to configuration file (built-in ETH/GALA/BTC 5m batch if omitted)
        #[arg(short, long)]
        config: Option<String>,

        /// Rows per instrument (overrides config file)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        rows: Option<u64>,

        /// Output directory (overrides config file)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Only generate these symbols (comma-separated). E.g., "ETHUSDT,BTCUSDT"
        #[arg(long)]
        symbols: Option<String>,

        /// Run sequentially instead of parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Validate existing parameter CSV files
    Validate {
        /// Path to configuration file (used when no files are given)
        #[arg(short, long)]
        config: Option<String>,

        /// Output directory to look in (overrides config file)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Files to validate. Defaults to the configured instruments' files
        files: Vec<PathBuf>,
    },
}

fn setup_logging(verbose: bool, command_name: &str) -> Result<()> {
    // Create logs directory
    std::fs::create_dir_all("logs")?;

    // Create log file with naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from("logs").join(&log_filename);

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::never("logs", &log_filename);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    // File layer - same format but without ANSI colors
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized");
    info!("Log file: {}", log_path.display());

    Ok(())
}

/// No subcommand runs the default batch
fn resolve_command(command: Option<Commands>) -> Commands {
    command.unwrap_or(Commands::Generate {
        config: None,
        rows: None,
        output_dir: None,
        symbols: None,
        sequential: false,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = resolve_command(cli.command);

    let command_name = match &command {
        Commands::Generate { .. } => "generate",
        Commands::Validate { .. } => "validate",
    };

    setup_logging(cli.verbose, command_name)?;

    match command {
        Commands::Generate {
            config,
            rows,
            output_dir,
            symbols,
            sequential,
        } => commands::generate::run(config, rows, output_dir, symbols, sequential),

        Commands::Validate {
            config,
            output_dir,
            files,
        } => commands::validate::run(config, output_dir, files),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_default_batch() {
        let cli = Cli::try_parse_from(["strategy-params"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            resolve_command(cli.command),
            Commands::Generate {
                config: None,
                rows: None,
                output_dir: None,
                symbols: None,
                sequential: false,
            }
        ));
    }

    #[test]
    fn test_generate_rows_parsed() {
        let cli = Cli::try_parse_from(["strategy-params", "generate", "--rows", "25"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Generate { rows: Some(25), .. })
        ));
    }

    #[test]
    fn test_generate_rejects_invalid_rows() {
        for rows in ["0", "-1", "1.5", "abc"] {
            let result = Cli::try_parse_from(["strategy-params", "generate", "--rows", rows]);
            assert!(result.is_err(), "--rows {} should be rejected", rows);
        }
    }

    #[test]
    fn test_validate_accepts_files() {
        let cli = Cli::try_parse_from(["strategy-params", "validate", "a.csv", "b.csv"]).unwrap();
        match cli.command {
            Some(Commands::Validate { files, .. }) => {
                assert_eq!(files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
