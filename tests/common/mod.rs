//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use grid_alloc::config::ScenarioConfig;
use grid_alloc::grid::{
    AllocatorSettings, DaySimulation, HourResult, HourWindow, HourlyAllocator, ResourceSpec,
    RunningStats,
};

/// Solar (50 kWh, 1.0, 06-19), Hydro (40 kWh, 1.5, all day), Diesel (60 kWh, 3.0, 17-24, fossil).
pub fn grid_resources() -> Vec<ResourceSpec> {
    vec![
        ResourceSpec::new("Solar", 50, 1.0, HourWindow::new(6, 19)),
        ResourceSpec::new("Hydro", 40, 1.5, HourWindow::ALL_DAY),
        ResourceSpec::new("Diesel", 60, 3.0, HourWindow::new(17, 24)).fossil(),
    ]
}

/// Allocator over [`grid_resources`] with default settings.
pub fn grid_allocator() -> HourlyAllocator {
    HourlyAllocator::new(grid_resources(), AllocatorSettings::default())
}

/// Baseline preset simulation (districts A, B and C).
pub fn baseline_simulation() -> DaySimulation {
    ScenarioConfig::baseline().build_simulation()
}

/// Folds a finished result vector into fresh statistics.
pub fn post_hoc_stats(results: &[HourResult], resources: &[ResourceSpec]) -> RunningStats {
    let mut stats = RunningStats::default();
    for r in results {
        stats.record(r, resources);
    }
    stats
}
