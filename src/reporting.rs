//! Plain-text hourly table and final analysis.

use std::io::{self, Write};

use crate::grid::resource::ResourceSpec;
use crate::grid::stats::RunningStats;
use crate::grid::types::{HourResult, Strategy};

const COLUMN_WIDTH: usize = 7;

/// Writes one row per hour: district demands, total, per-resource units, cost and percent met.
///
/// Rows resolved by the greedy fallback are marked with `*`.
pub fn write_hour_table(
    mut out: impl Write,
    results: &[HourResult],
    district_names: &[&str],
    resources: &[ResourceSpec],
) -> io::Result<()> {
    let mut header = format!("{:<3} |", "Hr");
    for name in district_names {
        header.push_str(&format!(" {:<w$}", format!("Dem {name}"), w = COLUMN_WIDTH));
    }
    header.push_str(&format!(" | {:<w$} |", "Total", w = COLUMN_WIDTH));
    for r in resources {
        header.push_str(&format!(" {:<w$}", r.name, w = COLUMN_WIDTH));
    }
    header.push_str(&format!(" | {:<10} | Met %", "Cost"));

    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.len()))?;

    for r in results {
        let mut row = format!("{:02}  |", r.hour);
        for kwh in &r.district_demand_kwh {
            row.push_str(&format!(" {kwh:<w$}", w = COLUMN_WIDTH));
        }
        row.push_str(&format!(" | {:<w$} |", r.demand_kwh, w = COLUMN_WIDTH));
        for res in resources {
            row.push_str(&format!(
                " {:<w$}",
                r.allocation.units(&res.name),
                w = COLUMN_WIDTH
            ));
        }
        row.push_str(&format!(" | {:<10.2} | {:<5.1}", r.cost, r.met_pct));
        if r.strategy == Strategy::GreedyFallback {
            row.push_str(" *");
        }
        writeln!(out, "{row}")?;
    }

    writeln!(out, "{}", "-".repeat(header.len()))
}

/// Prints the hourly table and final analysis to stdout.
pub fn print_day_report(
    results: &[HourResult],
    district_names: &[&str],
    resources: &[ResourceSpec],
    stats: &RunningStats,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_hour_table(&mut out, results, district_names, resources)?;
    writeln!(out, "{stats}")
}
