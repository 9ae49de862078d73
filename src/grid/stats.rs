//! Running totals across allocated hours and the final analysis report.

use std::fmt;

use serde::Serialize;

use super::resource::ResourceSpec;
use super::types::{HourResult, Strategy};

/// Cumulative statistics over a sequence of hourly allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningStats {
    /// Number of hours recorded.
    pub hours: usize,
    /// Total cost across all hours.
    pub total_cost: f64,
    /// Total demand (kWh).
    pub total_demand_kwh: u64,
    /// Total supplied (kWh).
    pub total_supplied_kwh: u64,
    /// Supply from non-fossil resources (kWh).
    pub renewable_kwh: u64,
    /// Supply from fossil resources (kWh).
    pub fossil_kwh: u64,
    /// Hours resolved by the greedy fallback.
    pub fallback_hours: usize,
    /// Lowest percent of demand met in any recorded hour (100 when empty).
    pub lowest_met_pct: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            hours: 0,
            total_cost: 0.0,
            total_demand_kwh: 0,
            total_supplied_kwh: 0,
            renewable_kwh: 0,
            fossil_kwh: 0,
            fallback_hours: 0,
            lowest_met_pct: 100.0,
        }
    }
}

impl RunningStats {
    /// Folds one hour's result into the totals.
    ///
    /// `resources` supplies the fossil flag for each allocated resource;
    /// allocations for names not found in `resources` count as renewable.
    pub fn record(&mut self, result: &HourResult, resources: &[ResourceSpec]) {
        self.hours += 1;
        self.total_cost += result.cost;
        self.total_demand_kwh += u64::from(result.demand_kwh);
        self.total_supplied_kwh += u64::from(result.supplied_kwh);

        for entry in result.allocation.iter() {
            let fossil = resources
                .iter()
                .find(|r| r.name == entry.name)
                .is_some_and(|r| r.fossil);
            if fossil {
                self.fossil_kwh += u64::from(entry.units);
            } else {
                self.renewable_kwh += u64::from(entry.units);
            }
        }

        if result.strategy == Strategy::GreedyFallback {
            self.fallback_hours += 1;
        }
        self.lowest_met_pct = self.lowest_met_pct.min(result.met_pct);
    }

    /// Renewable share of total supply in percent, `None` if nothing was supplied.
    pub fn renewable_pct(&self) -> Option<f64> {
        self.share_pct(self.renewable_kwh)
    }

    /// Fossil share of total supply in percent, `None` if nothing was supplied.
    pub fn fossil_pct(&self) -> Option<f64> {
        self.share_pct(self.fossil_kwh)
    }

    fn share_pct(&self, kwh: u64) -> Option<f64> {
        if self.total_supplied_kwh == 0 {
            None
        } else {
            Some(kwh as f64 / self.total_supplied_kwh as f64 * 100.0)
        }
    }
}

impl fmt::Display for RunningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FINAL ANALYSIS")?;
        writeln!(f, "Total Daily Cost:      {:.2}", self.total_cost)?;
        writeln!(f, "Total Demand:          {} kWh", self.total_demand_kwh)?;
        writeln!(f, "Total Supplied:        {} kWh", self.total_supplied_kwh)?;
        if let (Some(renewable), Some(fossil)) = (self.renewable_pct(), self.fossil_pct()) {
            writeln!(f, "Renewable Energy Used: {renewable:.1}%")?;
            writeln!(f, "Fossil Energy Used:    {fossil:.1}%")?;
        }
        writeln!(f, "Fallback Hours:        {}", self.fallback_hours)?;
        write!(f, "Lowest Met %:          {:.1}%", self.lowest_met_pct)
    }
}
