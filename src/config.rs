//! Configuration management
//!
//! Handles loading the batch configuration from a JSON file. Every field is
//! optional; an empty object `{}` is the same as [`Config::default`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::DEFAULT_ROWS;
use crate::types::{default_instruments, Instrument};

/// Batch generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Rows generated per instrument
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Directory the CSV files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_instruments")]
    pub instruments: Vec<Instrument>,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: default_rows(),
            output_dir: default_output_dir(),
            instruments: default_instruments(),
        }
    }
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use the built-in defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Keep only instruments whose symbol is in `symbols` (case-insensitive)
    pub fn retain_symbols(&mut self, symbols: &[String]) {
        self.instruments
            .retain(|i| symbols.iter().any(|s| s.eq_ignore_ascii_case(&i.symbol)));
    }

    /// Full output path for an instrument
    pub fn output_path(&self, instrument: &Instrument) -> PathBuf {
        self.output_dir.join(instrument.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rows, 500);
        assert_eq!(config.instruments.len(), 3);
    }

    #[test]
    fn test_parse_custom_config() {
        let json = r#"{
            "rows": 20,
            "output_dir": "out",
            "instruments": [
                { "symbol": "SOLUSDT", "timeframe": "15m", "seed": 7 }
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.instruments, vec![Instrument::new("SOLUSDT", "15m", 7)]);
        assert_eq!(
            config.output_path(&config.instruments[0]),
            PathBuf::from("out").join("solusdt_15m.csv")
        );
    }

    #[test]
    fn test_retain_symbols() {
        let mut config = Config::default();
        config.retain_symbols(&["btcusdt".to_string(), "ETHUSDT".to_string()]);
        let symbols: Vec<&str> = config.instruments.iter().map(|i| i.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ETHUSDT", "BTCUSDT"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file("does/not/exist.json").is_err());
    }
}
