//! Batch generation across instruments
//!
//! Runs generate-and-write once per configured instrument. Each instrument
//! gets its own generator, so parallel and sequential runs write identical
//! files.

use itertools::Itertools;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::generate;
use crate::output::write_table;
use crate::types::Instrument;

/// Outcome of one instrument in a batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub instrument: Instrument,
    pub result: GeneratorResult<PathBuf>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct BatchGenerator {
    config: Config,
}

impl BatchGenerator {
    pub fn new(config: Config) -> Self {
        BatchGenerator { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate and write one instrument's table
    pub fn run_instrument(&self, instrument: &Instrument) -> GeneratorResult<PathBuf> {
        let path = self.config.output_path(instrument);
        info!(
            "Generating {} rows for {} (seed {})",
            self.config.rows, instrument, instrument.seed
        );
        let table = generate(self.config.rows, instrument.seed)?;
        write_table(&table, &path)
    }

    /// Run every instrument, in config order when `sequential`
    ///
    /// Instruments must map to distinct output files. All instruments are
    /// attempted even if some fail. Outcomes are returned in config order
    /// either way.
    pub fn run(&self, sequential: bool) -> GeneratorResult<Vec<BatchOutcome>> {
        if self.config.instruments.is_empty() {
            return Err(GeneratorError::InvalidArgument(
                "no instruments configured".to_string(),
            ));
        }

        let duplicates: Vec<PathBuf> = self
            .config
            .instruments
            .iter()
            .map(|i| self.config.output_path(i))
            .duplicates()
            .collect();
        if !duplicates.is_empty() {
            return Err(GeneratorError::InvalidArgument(format!(
                "instruments share output files: {}",
                duplicates.iter().map(|p| p.display()).join(", ")
            )));
        }

        let run_one = |instrument: &Instrument| {
            let result = self.run_instrument(instrument);
            if let Err(ref e) = result {
                error!("Failed to generate {}: {}", instrument, e);
            }
            BatchOutcome {
                instrument: instrument.clone(),
                result,
            }
        };

        let outcomes: Vec<BatchOutcome> = if sequential {
            self.config.instruments.iter().map(run_one).collect()
        } else {
            self.config.instruments.par_iter().map(run_one).collect()
        };

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_is_invalid() {
        let config = Config {
            instruments: Vec::new(),
            ..Config::default()
        };
        let err = BatchGenerator::new(config).run(true).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidArgument(_)));
    }

    #[test]
    fn test_shared_output_file_is_invalid() {
        let dir = std::env::temp_dir()
            .join(format!("strategy_params_dup_{}", std::process::id()));
        let config = Config {
            rows: 10,
            output_dir: dir.clone(),
            instruments: vec![
                Instrument::new("ETHUSDT", "5m", 1),
                Instrument::new("ethusdt", "5m", 2),
            ],
        };

        let err = BatchGenerator::new(config).run(false).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InvalidArgument(ref msg) if msg.contains("ethusdt_5m.csv")
        ));
        assert!(!dir.join("ethusdt_5m.csv").exists());
    }

    #[test]
    fn test_zero_rows_fails_per_instrument() {
        let config = Config {
            rows: 0,
            output_dir: std::env::temp_dir(),
            instruments: vec![Instrument::new("ZEROUSDT", "5m", 1)],
        };
        let outcomes = BatchGenerator::new(config).run(true).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0].result,
            Err(GeneratorError::InvalidArgument(_))
        ));
    }
}
