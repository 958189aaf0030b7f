//! Generate command implementation

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use strategy_params::batch::BatchGenerator;
use strategy_params::Config;
use tracing::{debug, info};

/// Parse comma-separated symbols
fn parse_symbol_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|sym| sym.trim().to_uppercase())
        .filter(|sym| !sym.is_empty())
        .collect()
}

pub fn run(
    config_path: Option<String>,
    rows_override: Option<u64>,
    output_dir_override: Option<String>,
    symbols: Option<String>,
    sequential: bool,
) -> Result<()> {
    info!("Starting parameter generation");

    let mut config = Config::load_or_default(config_path.as_deref())?;
    match &config_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("Using built-in configuration"),
    }

    if let Some(rows) = rows_override {
        info!("Overriding rows to: {}", rows);
        config.rows = usize::try_from(rows).context("Row count does not fit in memory")?;
    }

    if let Some(dir) = output_dir_override {
        info!("Overriding output directory to: {}", dir);
        config.output_dir = PathBuf::from(dir);
    }

    if let Some(ref s) = symbols {
        let wanted = parse_symbol_list(s);
        config.retain_symbols(&wanted);
        info!("Filtered instruments to {:?}", wanted);
    }

    debug!("Instruments: {:?}", config.instruments);

    let generator = BatchGenerator::new(config);
    let outcomes = generator.run(sequential)?;

    println!("\n{}", "=".repeat(70));
    println!("PARAMETER GENERATION SUMMARY");
    println!("{}", "=".repeat(70));
    println!("  Rows per file: {}", generator.config().rows);
    println!("  Mode:          {}", if sequential { "sequential" } else { "parallel" });
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => println!(
                "  {:<16} seed {:<6} -> {}",
                outcome.instrument.to_string(),
                outcome.instrument.seed,
                path.display()
            ),
            Err(e) => println!(
                "  {:<16} seed {:<6} FAILED: {}",
                outcome.instrument.to_string(),
                outcome.instrument.seed,
                e
            ),
        }
    }
    println!("{}\n", "=".repeat(70));

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        bail!("{} of {} instruments failed", failed, outcomes.len());
    }

    info!("Generated {} parameter files", outcomes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(
            parse_symbol_list(" ethusdt, BTCUSDT ,,"),
            vec!["ETHUSDT".to_string(), "BTCUSDT".to_string()]
        );
    }
}
