//! Integration tests for the baseline day simulation.

mod common;

use grid_alloc::config::ScenarioConfig;
use grid_alloc::grid::Strategy;
use grid_alloc::io::export::write_csv;

/// (hour, demand, solar, hydro, diesel, cost) for the baseline day.
const EXPECTED_DAY: [(usize, u32, u32, u32, u32, f64); 24] = [
    (0, 23, 0, 20, 0, 30.0),
    (1, 19, 0, 17, 0, 25.5),
    (2, 19, 0, 17, 0, 25.5),
    (3, 23, 0, 20, 0, 30.0),
    (4, 33, 0, 29, 0, 43.5),
    (5, 45, 0, 40, 0, 60.0),
    (6, 60, 50, 4, 0, 56.0),
    (7, 65, 50, 8, 0, 62.0),
    (8, 65, 50, 8, 0, 62.0),
    (9, 60, 50, 4, 0, 56.0),
    (10, 45, 40, 0, 0, 40.0),
    (11, 45, 40, 0, 0, 40.0),
    (12, 45, 40, 0, 0, 40.0),
    (13, 45, 40, 0, 0, 40.0),
    (14, 60, 50, 4, 0, 56.0),
    (15, 75, 50, 17, 0, 75.5),
    (16, 90, 50, 31, 0, 96.5),
    (17, 95, 50, 35, 0, 102.5),
    (18, 95, 50, 35, 0, 102.5),
    (19, 80, 0, 40, 32, 156.0),
    (20, 65, 0, 40, 18, 114.0),
    (21, 50, 0, 40, 5, 75.0),
    (22, 38, 0, 34, 0, 51.0),
    (23, 28, 0, 25, 0, 37.5),
];

#[test]
fn baseline_day_matches_reference_table() {
    let mut sim = common::baseline_simulation();
    let results = sim.run();
    assert_eq!(results.len(), 24);

    for (r, &(hour, demand, solar, hydro, diesel, cost)) in results.iter().zip(&EXPECTED_DAY) {
        assert_eq!(r.hour, hour);
        assert_eq!(r.demand_kwh, demand, "demand at hour {hour}");
        assert_eq!(r.allocation.units("Solar"), solar, "solar at hour {hour}");
        assert_eq!(r.allocation.units("Hydro"), hydro, "hydro at hour {hour}");
        assert_eq!(r.allocation.units("Diesel"), diesel, "diesel at hour {hour}");
        assert!((r.cost - cost).abs() < 1e-9, "cost at hour {hour}: {}", r.cost);
        assert_eq!(r.strategy, Strategy::Exact);
    }
}

#[test]
fn baseline_day_totals() {
    let mut sim = common::baseline_simulation();
    sim.run();
    let stats = sim.stats();

    assert!((stats.total_cost - 1477.0).abs() < 1e-9);
    assert_eq!(stats.total_demand_kwh, 1268);
    assert_eq!(stats.total_supplied_kwh, 1133);
    assert_eq!(stats.fossil_kwh, 55);
    assert_eq!(stats.renewable_kwh, 1078);
    assert_eq!(stats.fallback_hours, 0);

    let renewable = stats.renewable_pct().unwrap_or_default();
    let fossil = stats.fossil_pct().unwrap_or_default();
    assert_eq!(format!("{renewable:.1}"), "95.1");
    assert_eq!(format!("{fossil:.1}"), "4.9");
}

#[test]
fn baseline_day_stays_inside_tolerance_band() {
    let mut sim = common::baseline_simulation();
    for r in sim.run() {
        assert!(
            r.band.contains(r.supplied_kwh),
            "hour {} supplied {} outside [{}, {}]",
            r.hour,
            r.supplied_kwh,
            r.band.min_kwh,
            r.band.max_kwh
        );
    }
}

#[test]
fn running_stats_agree_with_post_hoc() {
    let mut sim = common::baseline_simulation();
    let results = sim.run();
    let post_hoc = common::post_hoc_stats(&results, sim.allocator().resources());
    assert_eq!(sim.stats(), &post_hoc);
}

#[test]
fn diesel_outage_falls_back_in_the_evening() {
    let mut sim = ScenarioConfig::diesel_outage().build_simulation();
    let results = sim.run();

    let fallback: Vec<usize> = results
        .iter()
        .filter(|r| r.strategy == Strategy::GreedyFallback)
        .map(|r| r.hour)
        .collect();
    assert_eq!(fallback, vec![19, 20, 21]);

    for hour in fallback {
        let r = &results[hour];
        assert_eq!(r.allocation.units("Hydro"), 40);
        assert_eq!(r.supplied_kwh, 40);
        assert!(r.met_pct < 90.0);
    }

    let stats = sim.stats();
    assert_eq!(stats.fallback_hours, 3);
    assert_eq!(stats.fossil_kwh, 0);
    assert_eq!(stats.total_supplied_kwh, 1078);
    assert!((stats.total_cost - 1312.0).abs() < 1e-9);
    assert!((stats.lowest_met_pct - 50.0).abs() < 1e-9);
}

#[test]
fn noisy_demand_is_reproducible() {
    let mut a = ScenarioConfig::noisy_demand().build_simulation();
    let mut b = ScenarioConfig::noisy_demand().build_simulation();
    assert_eq!(a.run(), b.run());
}

#[test]
fn noisy_demand_differs_from_baseline() {
    let noisy = ScenarioConfig::noisy_demand().build_simulation().run();
    let plain = common::baseline_simulation().run();
    assert!(noisy.iter().zip(&plain).any(|(n, p)| n.demand_kwh != p.demand_kwh));
}

#[test]
fn csv_export_is_deterministic() {
    let mut run_a = common::baseline_simulation();
    let mut run_b = common::baseline_simulation();
    let results_a = run_a.run();
    let results_b = run_b.run();

    let mut out_a = Vec::new();
    write_csv(&results_a, run_a.allocator().resources(), &mut out_a).ok();
    let mut out_b = Vec::new();
    write_csv(&results_b, run_b.allocator().resources(), &mut out_b).ok();

    assert_eq!(out_a, out_b);
    let text = String::from_utf8(out_a).unwrap_or_default();
    assert_eq!(text.lines().count(), 25);
    assert!(text.lines().any(|l| l == "19,80,72,88,0,40,32,72,156.00,90.0,exact"));
}
