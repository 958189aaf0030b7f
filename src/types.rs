//! Instrument definitions for batch generation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A target instrument with its own seed and output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub timeframe: String,
    pub seed: u64,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>, seed: u64) -> Self {
        Instrument {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            seed,
        }
    }

    /// Output file name, e.g. `ethusdt_5m.csv`
    pub fn file_name(&self) -> String {
        format!("{}_{}.csv", self.symbol.to_lowercase(), self.timeframe)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.timeframe)
    }
}

/// Instruments generated when no config file is given
pub fn default_instruments() -> Vec<Instrument> {
    vec![
        Instrument::new("ETHUSDT", "5m", 101),
        Instrument::new("GALAUSDT", "5m", 202),
        Instrument::new("BTCUSDT", "5m", 303),
    ]
}
