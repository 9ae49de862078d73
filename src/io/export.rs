//! CSV export for hourly results and JSON export for run statistics.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::grid::resource::ResourceSpec;
use crate::grid::stats::RunningStats;
use crate::grid::types::HourResult;

/// Leading columns of the hourly CSV; one `<resource>_kwh` column per
/// resource follows, then [`TRAILING_COLUMNS`].
const LEADING_COLUMNS: &[&str] = &["hour", "demand_kwh", "min_target_kwh", "max_target_kwh"];
const TRAILING_COLUMNS: &[&str] = &["supplied_kwh", "cost", "met_pct", "strategy"];

/// Errors raised while writing exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Column header for the given resource set.
pub fn csv_header(resources: &[ResourceSpec]) -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|c| (*c).to_string())
        .chain(resources.iter().map(|r| format!("{}_kwh", r.name)))
        .chain(TRAILING_COLUMNS.iter().map(|c| (*c).to_string()))
        .collect()
}

/// Exports hourly results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an [`ExportError`] if file creation or writing fails.
pub fn export_csv(
    results: &[HourResult],
    resources: &[ResourceSpec],
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, resources, buf)
}

/// Writes hourly results as CSV to any writer.
///
/// Writes a header row followed by one row per hour. Resource columns
/// follow the order of `resources`. Output is deterministic for identical
/// inputs.
///
/// # Errors
///
/// Returns an [`ExportError`] if writing fails.
pub fn write_csv(
    results: &[HourResult],
    resources: &[ResourceSpec],
    writer: impl Write,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(csv_header(resources))?;

    for r in results {
        let mut record = vec![
            r.hour.to_string(),
            r.demand_kwh.to_string(),
            r.band.min_kwh.to_string(),
            r.band.max_kwh.to_string(),
        ];
        record.extend(resources.iter().map(|res| r.allocation.units(&res.name).to_string()));
        record.extend([
            r.supplied_kwh.to_string(),
            format!("{:.2}", r.cost),
            format!("{:.1}", r.met_pct),
            r.strategy.to_string(),
        ]);
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports run statistics as pretty-printed JSON to the given path.
///
/// # Errors
///
/// Returns an [`ExportError`] if file creation or serialization fails.
pub fn export_summary_json(stats: &RunningStats, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_summary_json(stats, &mut buf)?;
    buf.flush()?;
    Ok(())
}

/// Writes run statistics as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an [`ExportError`] if serialization fails.
pub fn write_summary_json(stats: &RunningStats, writer: impl Write) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, stats)?;
    Ok(())
}
