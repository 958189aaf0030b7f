//! Strategy Parameter Sets
//!
//! Seeded generation of randomized strategy parameter combinations for
//! backtesting, written as one CSV file per instrument.

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod params;
pub mod types;

pub use config::Config;
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{generate, DEFAULT_ROWS, DEFAULT_SEED};
pub use params::{ParamValue, ParameterRow, ParameterTable, PARAMETER_SPECS};
pub use types::Instrument;
