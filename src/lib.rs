//! Hour-by-hour energy grid allocation with a bounded-knapsack exact phase
//! and a greedy fallback.

/// TOML scenario configuration and presets.
pub mod config;
pub mod grid;
pub mod io;
pub mod logging;
pub mod reporting;
