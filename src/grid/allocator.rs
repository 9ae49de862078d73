//! Hour-by-hour minimum-cost allocator with tolerance band and greedy fallback.

use tracing::{debug, warn};

use super::demand::total_kwh;
use super::frontier::AllocationFrontier;
use super::greedy::greedy_fill;
use super::resource::ResourceSpec;
use super::stats::RunningStats;
use super::types::{Allocation, HourResult, Strategy, ToleranceBand};

/// Default accepted deviation from demand, in percent.
pub const DEFAULT_TOLERANCE_PCT: u32 = 10;
/// Default headroom above the band's upper bound explored by the frontier.
pub const DEFAULT_PRUNING_SLACK_KWH: u32 = 10;

/// Tunable parameters of the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorSettings {
    /// Half-width of the tolerance band in percent of demand.
    pub tolerance_pct: u32,
    /// Supply levels above `max_target + pruning_slack_kwh` are never explored.
    pub pruning_slack_kwh: u32,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
            pruning_slack_kwh: DEFAULT_PRUNING_SLACK_KWH,
        }
    }
}

/// Allocates integer kWh units across a fixed resource set, one hour at a time.
///
/// The exact phase builds an [`AllocationFrontier`] over the resources
/// available that hour and takes the cheapest level inside the tolerance
/// band. When no level in the band is reachable, the greedy fallback
/// saturates resources in ascending cost order. The allocator never fails;
/// under-supplied hours simply report a lower percent met.
///
/// # Examples
///
/// ```
/// use grid_alloc::grid::allocator::{AllocatorSettings, HourlyAllocator};
/// use grid_alloc::grid::resource::{HourWindow, ResourceSpec};
///
/// let mut allocator = HourlyAllocator::new(
///     vec![
///         ResourceSpec::new("Solar", 50, 1.0, HourWindow::new(6, 19)),
///         ResourceSpec::new("Hydro", 40, 1.5, HourWindow::ALL_DAY),
///     ],
///     AllocatorSettings::default(),
/// );
///
/// let result = allocator.solve_hour(10, &[12, 8]);
/// assert_eq!(result.allocation.units("Hydro"), 0);
/// assert!(result.band.contains(result.supplied_kwh));
/// ```
#[derive(Debug, Clone)]
pub struct HourlyAllocator {
    resources: Vec<ResourceSpec>,
    settings: AllocatorSettings,
    stats: RunningStats,
}

impl HourlyAllocator {
    pub fn new(resources: Vec<ResourceSpec>, settings: AllocatorSettings) -> Self {
        Self {
            resources,
            settings,
            stats: RunningStats::default(),
        }
    }

    /// Resource definitions in configuration order.
    pub fn resources(&self) -> &[ResourceSpec] {
        &self.resources
    }

    /// Statistics accumulated by [`HourlyAllocator::solve_hour`].
    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    /// Allocates one hour from per-district demand and records the result.
    pub fn solve_hour(&mut self, hour: usize, district_demand_kwh: &[u32]) -> HourResult {
        let mut result = self.allocate(hour, total_kwh(district_demand_kwh));
        result.district_demand_kwh = district_demand_kwh.to_vec();
        self.stats.record(&result, &self.resources);
        result
    }

    /// Allocates one hour for a total demand without touching statistics.
    ///
    /// The returned result lists the demand as a single district.
    pub fn allocate(&self, hour: usize, demand_kwh: u32) -> HourResult {
        let active: Vec<&ResourceSpec> = self
            .resources
            .iter()
            .filter(|r| r.is_available(hour))
            .collect();
        let band = ToleranceBand::around(demand_kwh, self.settings.tolerance_pct);
        let ceiling = band.max_kwh.saturating_add(self.settings.pruning_slack_kwh);

        let frontier = AllocationFrontier::build(&active, ceiling);
        let (units, cost, strategy) = match frontier.cheapest_in(band) {
            Some((supply, cost)) => {
                let units = frontier.reconstruct(supply);
                (units, cost, Strategy::Exact)
            }
            None => {
                let (units, cost) = greedy_fill(&active, demand_kwh);
                (units, cost, Strategy::GreedyFallback)
            }
        };

        let mut allocation = Allocation::zeroed(&self.resources);
        for (resource, &u) in active.iter().zip(&units) {
            allocation.add(&resource.name, u);
        }
        let supplied_kwh = allocation.total_kwh();
        let met_pct = HourResult::met_percentage(supplied_kwh, demand_kwh);

        debug!(
            hour,
            demand_kwh,
            active = active.len(),
            band_min = band.min_kwh,
            band_max = band.max_kwh,
            supplied_kwh,
            cost,
            strategy = strategy.as_str(),
            "hour allocated"
        );
        if strategy == Strategy::GreedyFallback && supplied_kwh < demand_kwh {
            warn!(
                hour,
                demand_kwh,
                supplied_kwh,
                "no supply level within tolerance band; demand partially unmet"
            );
        }

        HourResult {
            hour,
            district_demand_kwh: vec![demand_kwh],
            demand_kwh,
            band,
            supplied_kwh,
            cost,
            allocation,
            met_pct,
            strategy,
        }
    }
}
