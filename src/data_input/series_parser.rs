// src/data_input/series_parser.rs

use csv::ReaderBuilder;
use ndarray::Array1;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::{DEFAULT_VALUE_COLUMN, TIME_COLUMN};
use crate::data_input::series_data::TimeSeries;
use crate::error::SpectrumError;

/// Which columns of the comma-separated file hold the time stamps and the signal.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub time_column: usize,
    pub value_column: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            time_column: TIME_COLUMN,
            value_column: DEFAULT_VALUE_COLUMN,
        }
    }
}

/// Reads a headerless CSV file of `time, value[, ...]` rows into a `TimeSeries`.
///
/// Irregular or non-increasing time stamps are reported as warnings only; the
/// spectrum is always computed with the interval of the first two rows.
pub fn parse_series_file(
    input_file_path: &Path,
    options: &ParseOptions,
) -> Result<TimeSeries, SpectrumError> {
    let file = File::open(input_file_path)?;
    let series = parse_series(BufReader::new(file), options)?;
    tracing::debug!(
        rows = series.len(),
        path = %input_file_path.display(),
        "parsed time series"
    );

    if let Some(check) = series.sampling_check() {
        if check.non_increasing_steps > 0 {
            tracing::warn!(
                "{} time steps are not increasing; spectrum assumes dt = {}",
                check.non_increasing_steps,
                check.dt
            );
        } else if !check.is_uniform() {
            tracing::warn!(
                "Time stamps deviate from dt = {} by up to {:.1}%; spectrum assumes uniform sampling",
                check.dt,
                check.max_relative_deviation * 100.0
            );
        }
    }
    Ok(series)
}

/// Parses CSV rows from any reader. Every field of every row must be numeric and all
/// rows must have the same number of columns. `#` starts a comment line.
pub fn parse_series<R: Read>(source: R, options: &ParseOptions) -> Result<TimeSeries, SpectrumError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(source);

    let needed_columns = options.time_column.max(options.value_column) + 1;
    let mut time: Vec<f64> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut row: Vec<f64> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line());

        if record.len() < needed_columns {
            return Err(SpectrumError::malformed(
                line,
                format!(
                    "expected at least {} columns, found {}",
                    needed_columns,
                    record.len()
                ),
            ));
        }

        row.clear();
        for (column, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| {
                SpectrumError::malformed(line, format!("column {column}: '{field}' is not numeric"))
            })?;
            row.push(value);
        }
        time.push(row[options.time_column]);
        values.push(row[options.value_column]);
    }

    if values.len() < 2 {
        return Err(SpectrumError::malformed(
            None,
            format!("need at least 2 data rows, found {}", values.len()),
        ));
    }

    TimeSeries::new(Array1::from(time), Array1::from(values))
}

fn csv_error(err: csv::Error) -> SpectrumError {
    let line = err.position().map(|p| p.line());
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => SpectrumError::Io(io_err),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => SpectrumError::malformed(
            line,
            format!("inconsistent column count: expected {expected_len}, found {len}"),
        ),
        _ => SpectrumError::malformed(line, message),
    }
}
