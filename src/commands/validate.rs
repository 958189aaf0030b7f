//! Validate command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;
use strategy_params::output::{load_table, validate_rows};
use strategy_params::params::PARAMETER_SPECS;
use strategy_params::Config;
use tracing::{error, info, warn};

pub fn run(
    config_path: Option<String>,
    output_dir_override: Option<String>,
    files: Vec<PathBuf>,
) -> Result<()> {
    info!("Starting validation");

    // Row counts are only known when the files come from a config
    let (files, expected_rows) = if files.is_empty() {
        let mut config = Config::load_or_default(config_path.as_deref())?;
        if let Some(dir) = output_dir_override {
            config.output_dir = PathBuf::from(dir);
        }
        let paths: Vec<PathBuf> = config
            .instruments
            .iter()
            .map(|i| config.output_path(i))
            .collect();
        (paths, Some(config.rows))
    } else {
        (files, None)
    };

    let mut failed = 0;

    for path in &files {
        println!("\n{}", "=".repeat(70));
        println!("{}", path.display());
        println!("{}", "=".repeat(70));

        let rows = match load_table(path) {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                println!("  FAILED: {}", e);
                failed += 1;
                continue;
            }
        };

        let mut result = validate_rows(&rows);
        if let Some(expected) = expected_rows {
            result.check_row_count(expected);
        }
        println!("  Rows: {}", result.rows);
        println!("  {:<22} {:>10} {:>10}   {}", "Column", "Min", "Max", "Allowed");
        for (column, spec) in result.columns.iter().zip(PARAMETER_SPECS.iter()) {
            println!(
                "  {:<22} {:>10} {:>10}   {}",
                column.name,
                column.min.to_string(),
                column.max.to_string(),
                spec.range_label()
            );
        }

        if result.is_valid() {
            info!("{}: {} rows OK", path.display(), result.rows);
        } else {
            failed += 1;
            for err in &result.errors {
                warn!("{}: {}", path.display(), err);
                println!("  {}", err);
            }
        }
    }
    println!();

    if failed > 0 {
        bail!("{} of {} files failed validation", failed, files.len());
    }

    info!("All {} files valid", files.len());
    Ok(())
}
