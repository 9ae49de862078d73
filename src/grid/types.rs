//! Core allocation types: tolerance band, per-resource allocation, and hourly results.

use std::fmt;

use serde::Serialize;

use super::resource::ResourceSpec;

/// Inclusive integer supply range accepted as a substitute for exact demand.
///
/// # Examples
///
/// ```
/// use grid_alloc::grid::types::ToleranceBand;
///
/// let band = ToleranceBand::around(35, 10);
/// assert_eq!((band.min_kwh, band.max_kwh), (31, 38));
/// assert!(band.contains(35));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToleranceBand {
    /// Lowest acceptable supply (kWh).
    pub min_kwh: u32,
    /// Highest acceptable supply (kWh).
    pub max_kwh: u32,
}

impl ToleranceBand {
    /// Builds the band `[floor((100 - pct)% of demand), floor((100 + pct)% of demand)]`.
    ///
    /// Integer arithmetic keeps the floor exact; `tolerance_pct` above 100
    /// saturates the lower bound at zero.
    pub fn around(demand_kwh: u32, tolerance_pct: u32) -> Self {
        let demand = u64::from(demand_kwh);
        let pct = u64::from(tolerance_pct);
        let min = demand * 100u64.saturating_sub(pct) / 100;
        let max = demand * (100 + pct) / 100;
        Self {
            min_kwh: u32::try_from(min).unwrap_or(u32::MAX),
            max_kwh: u32::try_from(max).unwrap_or(u32::MAX),
        }
    }

    /// Returns `true` if `supply_kwh` lies within the band.
    pub fn contains(&self, supply_kwh: u32) -> bool {
        self.min_kwh <= supply_kwh && supply_kwh <= self.max_kwh
    }
}

/// Which phase produced an hour's allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Minimum-cost supply level found inside the tolerance band.
    Exact,
    /// Cost-ascending saturation used when no band level was reachable.
    GreedyFallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::GreedyFallback => "greedy_fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units dispatched from one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceUnits {
    pub name: String,
    pub units: u32,
}

/// Per-resource dispatch for one hour.
///
/// Holds an entry for every configured resource, in configuration order;
/// resources that were unavailable or unused carry zero units.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Allocation {
    entries: Vec<ResourceUnits>,
}

impl Allocation {
    /// Creates an all-zero allocation covering `resources`.
    pub fn zeroed(resources: &[ResourceSpec]) -> Self {
        Self {
            entries: resources
                .iter()
                .map(|r| ResourceUnits {
                    name: r.name.clone(),
                    units: 0,
                })
                .collect(),
        }
    }

    /// Adds `units` to the entry for `name`. Unknown names are ignored.
    pub(crate) fn add(&mut self, name: &str, units: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.units += units;
        }
    }

    /// Units supplied by `name`, or zero if the resource is unknown.
    pub fn units(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map_or(0, |e| e.units)
    }

    /// Total units across all resources.
    pub fn total_kwh(&self) -> u32 {
        self.entries.iter().map(|e| e.units).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceUnits> {
        self.entries.iter()
    }
}

/// Complete record of one allocated hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourResult {
    /// Hour of day (0-23).
    pub hour: usize,
    /// Demand per district, in profile order (kWh).
    pub district_demand_kwh: Vec<u32>,
    /// Total demand (kWh).
    pub demand_kwh: u32,
    /// Acceptable supply range for this hour.
    pub band: ToleranceBand,
    /// Total supplied (kWh).
    pub supplied_kwh: u32,
    /// Total cost of the allocation.
    pub cost: f64,
    /// Per-resource dispatch.
    pub allocation: Allocation,
    /// Share of demand met, in percent. Zero demand counts as fully met.
    pub met_pct: f64,
    /// Phase that produced the allocation.
    pub strategy: Strategy,
}

impl HourResult {
    /// Percent of `demand_kwh` covered by `supplied_kwh`, guarding zero demand.
    pub fn met_percentage(supplied_kwh: u32, demand_kwh: u32) -> f64 {
        if demand_kwh == 0 {
            100.0
        } else {
            f64::from(supplied_kwh) / f64::from(demand_kwh) * 100.0
        }
    }
}

impl fmt::Display for HourResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:02} | demand={:>4} kWh band=[{}, {}] | supplied={:>4} kWh cost={:>8.2} met={:>5.1}% |",
            self.hour,
            self.demand_kwh,
            self.band.min_kwh,
            self.band.max_kwh,
            self.supplied_kwh,
            self.cost,
            self.met_pct,
        )?;
        for entry in self.allocation.iter() {
            write!(f, " {}={}", entry.name, entry.units)?;
        }
        write!(f, " ({})", self.strategy)
    }
}
