//! Cost-ascending greedy fill used when the exact phase finds no feasible level.

use super::resource::ResourceSpec;

/// Saturates `resources` in ascending unit-cost order until `demand_kwh` is met.
///
/// Returns the units taken from each resource (indexed like `resources`)
/// and the total cost. Equal-cost resources keep their input order. The
/// result supplies `min(demand_kwh, total capacity)`; it is not
/// cost-optimal with respect to any tolerance band.
///
/// # Examples
///
/// ```
/// use grid_alloc::grid::greedy::greedy_fill;
/// use grid_alloc::grid::resource::{HourWindow, ResourceSpec};
///
/// let diesel = ResourceSpec::new("Diesel", 60, 3.0, HourWindow::ALL_DAY);
/// let hydro = ResourceSpec::new("Hydro", 40, 1.5, HourWindow::ALL_DAY);
/// let (units, cost) = greedy_fill(&[&diesel, &hydro], 50);
/// assert_eq!(units, vec![10, 40]);
/// assert_eq!(cost, 90.0);
/// ```
pub fn greedy_fill(resources: &[&ResourceSpec], demand_kwh: u32) -> (Vec<u32>, f64) {
    let mut order: Vec<usize> = (0..resources.len()).collect();
    order.sort_by(|&a, &b| resources[a].unit_cost.total_cmp(&resources[b].unit_cost));

    let mut units = vec![0; resources.len()];
    let mut total_cost = 0.0;
    let mut remaining = demand_kwh;

    for idx in order {
        if remaining == 0 {
            break;
        }
        let resource = resources[idx];
        let take = remaining.min(resource.capacity_kwh);
        units[idx] = take;
        total_cost += f64::from(take) * resource.unit_cost;
        remaining -= take;
    }

    (units, total_cost)
}
