//! Day simulation that drives the allocator through 24 hourly demand samples.

use tracing::debug;

use super::allocator::HourlyAllocator;
use super::demand::{DemandProfile, HOURS_PER_DAY};
use super::stats::RunningStats;
use super::types::HourResult;

/// Owns an allocator and a demand profile and runs them hour by hour.
pub struct DaySimulation {
    allocator: HourlyAllocator,
    demand: DemandProfile,
}

impl DaySimulation {
    pub fn new(allocator: HourlyAllocator, demand: DemandProfile) -> Self {
        Self { allocator, demand }
    }

    /// Samples demand for `hour` and allocates it.
    pub fn step(&mut self, hour: usize) -> HourResult {
        let sample = self.demand.sample(hour);
        self.allocator.solve_hour(sample.hour, &sample.district_kwh)
    }

    /// Runs hours 0 through 23 and returns every hourly result.
    pub fn run(&mut self) -> Vec<HourResult> {
        let mut results = Vec::with_capacity(HOURS_PER_DAY);
        for hour in 0..HOURS_PER_DAY {
            results.push(self.step(hour));
        }
        debug!(
            total_cost = self.allocator.stats().total_cost,
            fallback_hours = self.allocator.stats().fallback_hours,
            "day complete"
        );
        results
    }

    /// Statistics accumulated over the hours run so far.
    pub fn stats(&self) -> &RunningStats {
        self.allocator.stats()
    }

    pub fn allocator(&self) -> &HourlyAllocator {
        &self.allocator
    }

    pub fn demand(&self) -> &DemandProfile {
        &self.demand
    }
}
