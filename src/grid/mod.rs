//! Hourly allocation engine: resources, demand, frontier, fallback, and statistics.

/// Per-hour allocator combining the exact and fallback phases.
pub mod allocator;
/// Day simulation driver.
pub mod day;
/// District demand profiles.
pub mod demand;
pub mod frontier;
pub mod greedy;
/// Resource definitions and availability windows.
pub mod resource;
pub mod stats;
pub mod types;

pub use allocator::{AllocatorSettings, HourlyAllocator};
pub use day::DaySimulation;
pub use demand::{DemandProfile, DemandSample, DistrictProfile};
pub use resource::{HourWindow, ResourceSpec};
pub use stats::RunningStats;
pub use types::{Allocation, HourResult, Strategy, ToleranceBand};
