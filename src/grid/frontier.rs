//! Minimum-cost supply frontier built by bounded-knapsack dynamic programming.

use super::resource::ResourceSpec;
use super::types::ToleranceBand;

/// Backpointer recorded in one resource's layer for one supply level.
///
/// `resource` indexes the slice of active resources the frontier was built
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationChoice {
    pub resource: usize,
    pub units: u32,
    pub prior_supply_kwh: u32,
}

/// Map from reachable integer supply level to the cheapest cost of reaching it.
///
/// Levels are dense indices `0..=ceiling_kwh`; unreachable levels are `None`.
/// Each resource is folded in against a read-only snapshot of the frontier
/// as it stood before that resource, so no resource contributes more than
/// its own capacity to any level.
///
/// Backpointers are kept per resource layer: `layers[i][s]` is the number of
/// units resource `i` adds to reach level `s` from the layer before it, zero
/// when the level was carried over unchanged. Later resources never rewrite
/// an earlier layer, so every reconstructed path stays within capacity.
#[derive(Debug, Clone)]
pub struct AllocationFrontier {
    costs: Vec<Option<f64>>,
    layers: Vec<Vec<u32>>,
}

impl AllocationFrontier {
    /// Builds the frontier over `resources`, ignoring levels above `ceiling_kwh`.
    ///
    /// The effective ceiling is also capped at the combined capacity, so the
    /// frontier never allocates levels no combination can reach.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_alloc::grid::frontier::AllocationFrontier;
    /// use grid_alloc::grid::resource::{HourWindow, ResourceSpec};
    ///
    /// let solar = ResourceSpec::new("Solar", 5, 1.0, HourWindow::ALL_DAY);
    /// let hydro = ResourceSpec::new("Hydro", 5, 1.5, HourWindow::ALL_DAY);
    /// let frontier = AllocationFrontier::build(&[&solar, &hydro], 100);
    ///
    /// assert_eq!(frontier.ceiling_kwh(), 10);
    /// assert_eq!(frontier.cost_at(5), Some(5.0));
    /// assert_eq!(frontier.cost_at(7), Some(8.0));
    /// assert_eq!(frontier.reconstruct(7), vec![5, 2]);
    /// ```
    pub fn build(resources: &[&ResourceSpec], ceiling_kwh: u32) -> Self {
        let total_capacity: u64 = resources.iter().map(|r| u64::from(r.capacity_kwh)).sum();
        let ceiling = u64::from(ceiling_kwh).min(total_capacity) as usize;

        let mut costs: Vec<Option<f64>> = vec![None; ceiling + 1];
        costs[0] = Some(0.0);
        let mut layers = Vec::with_capacity(resources.len());

        for resource in resources {
            let previous = costs;
            let mut next = previous.clone();
            let mut chosen = vec![0u32; ceiling + 1];

            for (prior, cost) in previous.iter().enumerate() {
                let Some(prior_cost) = *cost else {
                    continue;
                };
                for units in 1..=resource.capacity_kwh {
                    let supply = prior + units as usize;
                    if supply > ceiling {
                        break;
                    }
                    let cost = prior_cost + f64::from(units) * resource.unit_cost;
                    if next[supply].is_none_or(|existing| cost < existing) {
                        next[supply] = Some(cost);
                        chosen[supply] = units;
                    }
                }
            }

            costs = next;
            layers.push(chosen);
        }

        Self { costs, layers }
    }

    /// Highest supply level represented in the frontier.
    pub fn ceiling_kwh(&self) -> u32 {
        (self.costs.len() - 1) as u32
    }

    /// Minimum cost to supply exactly `supply_kwh`, if reachable.
    pub fn cost_at(&self, supply_kwh: u32) -> Option<f64> {
        self.costs.get(supply_kwh as usize).copied().flatten()
    }

    /// Backpointer recorded by `resource` for `supply_kwh`, `None` when that
    /// resource left the level unchanged.
    pub fn choice_at(&self, resource: usize, supply_kwh: u32) -> Option<AllocationChoice> {
        let units = *self.layers.get(resource)?.get(supply_kwh as usize)?;
        (units > 0).then(|| AllocationChoice {
            resource,
            units,
            prior_supply_kwh: supply_kwh - units,
        })
    }

    /// Cheapest reachable level inside `band`.
    ///
    /// Scans the band in ascending order; on equal cost the lower level wins.
    pub fn cheapest_in(&self, band: ToleranceBand) -> Option<(u32, f64)> {
        let mut best: Option<(u32, f64)> = None;
        for supply in band.min_kwh..=band.max_kwh.min(self.ceiling_kwh()) {
            if let Some(cost) = self.cost_at(supply) {
                if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                    best = Some((supply, cost));
                }
            }
        }
        best
    }

    /// Walks the layers from the last resource to the first and returns the
    /// units each resource contributes to `supply_kwh`.
    ///
    /// Unreachable levels yield all zeros.
    pub fn reconstruct(&self, supply_kwh: u32) -> Vec<u32> {
        let mut units = vec![0; self.layers.len()];
        if self.cost_at(supply_kwh).is_none() {
            return units;
        }
        let mut current = supply_kwh;
        for resource in (0..self.layers.len()).rev() {
            if let Some(choice) = self.choice_at(resource, current) {
                units[resource] = choice.units;
                current = choice.prior_supply_kwh;
            }
        }
        units
    }
}
