//! Seeded parameter set generation
//!
//! Every call to [`generate`] owns a fresh ChaCha8 stream, so tables depend
//! only on `(n, seed)` and never on what other generations ran before or
//! alongside them. Columns are drawn column-major in schema order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{GeneratorError, GeneratorResult};
use crate::params::{
    ParamKind, ParamSpec, ParamValue, ParameterRow, ParameterTable, DECIMAL_PLACES,
    PARAMETER_COUNT, PARAMETER_SPECS,
};

/// Default number of rows per table
pub const DEFAULT_ROWS: usize = 500;

/// Default seed when none is given
pub const DEFAULT_SEED: u64 = 42;

/// Column sampler over a single seeded stream
pub struct ParameterSampler {
    rng: ChaCha8Rng,
}

impl ParameterSampler {
    pub fn new(seed: u64) -> Self {
        ParameterSampler {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw `n` values for one column
    pub fn sample_column(&mut self, spec: &ParamSpec, n: usize) -> Vec<ParamValue> {
        match spec.kind {
            ParamKind::Integer { min, max } => (0..n)
                .map(|_| ParamValue::Integer(self.rng.gen_range(min..=max)))
                .collect(),
            ParamKind::Decimal {
                min_cents,
                max_cents,
            } => (0..n)
                .map(|_| {
                    let cents = self.rng.gen_range(min_cents..max_cents);
                    ParamValue::Decimal(Decimal::new(cents, DECIMAL_PLACES))
                })
                .collect(),
        }
    }
}

/// Generate a table of `n` parameter rows from `seed`
pub fn generate(n: usize, seed: u64) -> GeneratorResult<ParameterTable> {
    if n == 0 {
        return Err(GeneratorError::InvalidArgument(
            "row count must be a positive integer".to_string(),
        ));
    }

    let mut sampler = ParameterSampler::new(seed);
    let columns: Vec<Vec<ParamValue>> = PARAMETER_SPECS
        .iter()
        .map(|spec| sampler.sample_column(spec, n))
        .collect();

    let rows = assemble_rows(&columns, n)?;

    debug!("Generated {} rows with seed {}", rows.len(), seed);
    Ok(ParameterTable::new(seed, rows))
}

/// Zip per-column samples into rows
fn assemble_rows(columns: &[Vec<ParamValue>], n: usize) -> GeneratorResult<Vec<ParameterRow>> {
    (0..n)
        .map(|row| {
            let values: [ParamValue; PARAMETER_COUNT] =
                std::array::from_fn(|c| columns[c][row]);
            ParameterRow::from_values(&values).ok_or(GeneratorError::RowLayout { row })
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
