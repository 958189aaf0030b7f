//! CSV output and loading of parameter tables
//!
//! Files are written with a header row of the column names and no index
//! column. Writes go to a sibling `.tmp` file that is renamed into place.
//! A failed write removes both the temp file and any older file at the
//! target path, so no table is left under that name.

use itertools::{Itertools, MinMaxResult};
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{GeneratorError, GeneratorResult};
use crate::params::{column_names, ParamValue, ParameterRow, ParameterTable, PARAMETER_SPECS};

// =============================================================================
// CSV Writing
// =============================================================================

/// Write a table to `path`, replacing any existing file
pub fn write_table(table: &ParameterTable, path: impl AsRef<Path>) -> GeneratorResult<PathBuf> {
    let path = path.as_ref();
    let tmp_path = temp_path(path)?;

    let result = write_rows(table.rows(), &tmp_path)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| GeneratorError::io(path, e)));

    if let Err(err) = result {
        // A failed write leaves no table under this name, old or partial
        remove_if_exists(&tmp_path);
        remove_if_exists(path);
        return Err(err);
    }

    info!("Saved {} rows to {}", table.len(), path.display());
    Ok(path.to_path_buf())
}

fn write_rows(rows: &[ParameterRow], path: &Path) -> GeneratorResult<()> {
    let file = File::create(path).map_err(|e| GeneratorError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    for row in rows {
        writer.serialize(row)?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|e| GeneratorError::io(path, e.into_error()))?;
    inner.flush().map_err(|e| GeneratorError::io(path, e))?;
    inner
        .get_ref()
        .sync_all()
        .map_err(|e| GeneratorError::io(path, e))?;
    Ok(())
}

fn remove_if_exists(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}

fn temp_path(path: &Path) -> GeneratorResult<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| {
            GeneratorError::InvalidArgument(format!("not a file path: {}", path.display()))
        })?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

// =============================================================================
// CSV Loading
// =============================================================================

/// Load parameter rows from a CSV file written by [`write_table`]
///
/// The header must list exactly the schema columns in schema order.
pub fn load_table(path: impl AsRef<Path>) -> GeneratorResult<Vec<ParameterRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GeneratorError::io(path, e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let expected = column_names();
    if !headers.iter().eq(expected.iter().copied()) {
        return Err(GeneratorError::Schema {
            path: path.to_path_buf(),
            message: format!(
                "expected header `{}`, found `{}`",
                expected.iter().join(","),
                headers.iter().join(",")
            ),
        });
    }

    let rows = reader
        .deserialize()
        .enumerate()
        .map(|(i, result)| {
            result.map_err(|e| GeneratorError::Schema {
                path: path.to_path_buf(),
                message: format!("row {}: {}", i + 1, e),
            })
        })
        .collect::<GeneratorResult<Vec<ParameterRow>>>()?;

    Ok(rows)
}

// =============================================================================
// Validation
// =============================================================================

/// Observed bounds of one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRange {
    pub name: &'static str,
    pub min: ParamValue,
    pub max: ParamValue,
}

/// Result of table validation
#[derive(Debug)]
pub struct ValidationResult {
    pub rows: usize,
    pub errors: Vec<String>,
    pub columns: Vec<ColumnRange>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error unless exactly `expected` rows were checked
    pub fn check_row_count(&mut self, expected: usize) {
        if self.rows != expected {
            self.errors
                .push(format!("Expected {} rows, found {}", expected, self.rows));
        }
    }
}

/// Check every value against its column's range
pub fn validate_rows(rows: &[ParameterRow]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut columns: Vec<ColumnRange> = Vec::new();

    if rows.is_empty() {
        errors.push("No rows provided".to_string());
        return ValidationResult {
            rows: 0,
            errors,
            columns,
        };
    }

    for (i, row) in rows.iter().enumerate() {
        for (spec, value) in PARAMETER_SPECS.iter().zip(row.values()) {
            if !spec.contains(&value) {
                errors.push(format!(
                    "Row {}: {} = {} outside {}",
                    i + 1,
                    spec.name,
                    value,
                    spec.range_label()
                ));
            }
        }
    }

    for (c, spec) in PARAMETER_SPECS.iter().enumerate() {
        let values = rows.iter().map(|row| row.values()[c]);
        let bounds = values.minmax_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let (min, max) = match bounds {
            MinMaxResult::MinMax(min, max) => (min, max),
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::NoElements => continue,
        };
        columns.push(ColumnRange {
            name: spec.name,
            min,
            max,
        });
    }

    ValidationResult {
        rows: rows.len(),
        errors,
        columns,
    }
}

// =============================================================================
// Tests
// =============================================================================
