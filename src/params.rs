//! Parameter schema and row types
//!
//! Defines the 13 strategy parameters, their sampling ranges and the
//! row/table types produced by the generator. The order of
//! [`PARAMETER_SPECS`] is both the CSV column order and the sampling order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Schema
// =============================================================================

/// Number of decimal places for decimal parameters
pub const DECIMAL_PLACES: u32 = 2;

/// Value range of a single parameter column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Uniform integer over `[min, max]` (inclusive)
    Integer { min: i64, max: i64 },
    /// Uniform 2 dp decimal over `[min_cents / 100, max_cents / 100)`
    Decimal { min_cents: i64, max_cents: i64 },
}

/// Named parameter column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

const fn int(name: &'static str, min: i64, max: i64) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Integer { min, max },
    }
}

const fn dec(name: &'static str, min_cents: i64, max_cents: i64) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Decimal {
            min_cents,
            max_cents,
        },
    }
}

pub const PARAMETER_COUNT: usize = 13;

pub const PARAMETER_SPECS: [ParamSpec; PARAMETER_COUNT] = [
    int("p", 6, 10),
    int("atr_p", 3, 6),
    dec("mult", 25, 60),
    int("supertrend_atr", 4, 7),
    dec("supertrend_factor", 120, 200),
    int("atrnowinput", 2, 4),
    int("atrAvginput", 8, 14),
    dec("volatilityMultiplier", 50, 100),
    dec("bodyratioMult", 55, 90),
    int("structureLookback", 20, 34),
    dec("bufferMult", 30, 120),
    dec("maxSlDistance", 500, 12_000),
    int("isStrongTrendMult", 9, 19),
];

/// Column names in output order
pub fn column_names() -> [&'static str; PARAMETER_COUNT] {
    PARAMETER_SPECS.map(|spec| spec.name)
}

impl ParamSpec {
    /// Check whether a value has the right kind and lies in range
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self.kind, value) {
            (ParamKind::Integer { min, max }, ParamValue::Integer(v)) => (min..=max).contains(v),
            (
                ParamKind::Decimal {
                    min_cents,
                    max_cents,
                },
                ParamValue::Decimal(v),
            ) => {
                v.normalize().scale() <= DECIMAL_PLACES
                    && *v >= Decimal::new(min_cents, DECIMAL_PLACES)
                    && *v < Decimal::new(max_cents, DECIMAL_PLACES)
            }
            _ => false,
        }
    }

    /// Human readable range, e.g. `[6, 10]` or `[0.25, 0.60)`
    pub fn range_label(&self) -> String {
        match self.kind {
            ParamKind::Integer { min, max } => format!("[{}, {}]", min, max),
            ParamKind::Decimal {
                min_cents,
                max_cents,
            } => format!(
                "[{}, {})",
                Decimal::new(min_cents, DECIMAL_PLACES),
                Decimal::new(max_cents, DECIMAL_PLACES)
            ),
        }
    }
}

// =============================================================================
// Values and rows
// =============================================================================

/// A single sampled cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
pub enum ParamValue {
    Integer(i64),
    Decimal(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// One complete set of strategy configuration values
///
/// Field order matches [`PARAMETER_SPECS`]; serde names are the CSV headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub p: i64,
    pub atr_p: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub mult: Decimal,
    pub supertrend_atr: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub supertrend_factor: Decimal,
    pub atrnowinput: i64,
    #[serde(rename = "atrAvginput")]
    pub atr_avg_input: i64,
    #[serde(rename = "volatilityMultiplier", with = "rust_decimal::serde::str")]
    pub volatility_multiplier: Decimal,
    #[serde(rename = "bodyratioMult", with = "rust_decimal::serde::str")]
    pub body_ratio_mult: Decimal,
    #[serde(rename = "structureLookback")]
    pub structure_lookback: i64,
    #[serde(rename = "bufferMult", with = "rust_decimal::serde::str")]
    pub buffer_mult: Decimal,
    #[serde(rename = "maxSlDistance", with = "rust_decimal::serde::str")]
    pub max_sl_distance: Decimal,
    #[serde(rename = "isStrongTrendMult")]
    pub is_strong_trend_mult: i64,
}

impl ParameterRow {
    /// Build a row from values in schema order
    ///
    /// Returns `None` if a value has the wrong kind for its column.
    pub fn from_values(values: &[ParamValue; PARAMETER_COUNT]) -> Option<Self> {
        use ParamValue::{Decimal as D, Integer as I};

        match *values {
            [
                I(p),
                I(atr_p),
                D(mult),
                I(supertrend_atr),
                D(supertrend_factor),
                I(atrnowinput),
                I(atr_avg_input),
                D(volatility_multiplier),
                D(body_ratio_mult),
                I(structure_lookback),
                D(buffer_mult),
                D(max_sl_distance),
                I(is_strong_trend_mult),
            ] => Some(ParameterRow {
                p,
                atr_p,
                mult,
                supertrend_atr,
                supertrend_factor,
                atrnowinput,
                atr_avg_input,
                volatility_multiplier,
                body_ratio_mult,
                structure_lookback,
                buffer_mult,
                max_sl_distance,
                is_strong_trend_mult,
            }),
            _ => None,
        }
    }

    /// Row values in schema order
    pub fn values(&self) -> [ParamValue; PARAMETER_COUNT] {
        use ParamValue::{Decimal as D, Integer as I};

        [
            I(self.p),
            I(self.atr_p),
            D(self.mult),
            I(self.supertrend_atr),
            D(self.supertrend_factor),
            I(self.atrnowinput),
            I(self.atr_avg_input),
            D(self.volatility_multiplier),
            D(self.body_ratio_mult),
            I(self.structure_lookback),
            D(self.buffer_mult),
            D(self.max_sl_distance),
            I(self.is_strong_trend_mult),
        ]
    }
}

/// The generated rows for one instrument, in generation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTable {
    seed: u64,
    rows: Vec<ParameterRow>,
}

impl ParameterTable {
    pub(crate) fn new(seed: u64, rows: Vec<ParameterRow>) -> Self {
        ParameterTable { seed, rows }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rows(&self) -> &[ParameterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, in row order
    pub fn column(&self, index: usize) -> Vec<ParamValue> {
        self.rows.iter().map(|row| row.values()[index]).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
