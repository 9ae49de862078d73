//! Supply resource definitions and their hourly availability.

use serde::{Deserialize, Serialize};

use super::demand::HOURS_PER_DAY;

/// Half-open hour-of-day window `[start, end)` during which a resource can supply.
///
/// A window with `start > end` wraps past midnight, so `22..6` covers
/// 22:00 through 05:59. `start == end` never matches; use
/// [`HourWindow::ALL_DAY`] for round-the-clock availability.
///
/// # Examples
///
/// ```
/// use grid_alloc::grid::resource::HourWindow;
///
/// let daylight = HourWindow::new(6, 19);
/// assert!(daylight.contains(6));
/// assert!(daylight.contains(18));
/// assert!(!daylight.contains(19));
///
/// let night = HourWindow::new(22, 6);
/// assert!(night.contains(23));
/// assert!(night.contains(0));
/// assert!(!night.contains(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HourWindow {
    /// First hour of availability (inclusive).
    pub start: usize,
    /// Hour at which availability ends (exclusive).
    pub end: usize,
}

impl HourWindow {
    /// Available at every hour of the day.
    pub const ALL_DAY: Self = Self {
        start: 0,
        end: HOURS_PER_DAY,
    };

    /// Creates a window covering `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the resource may supply during `hour` (0-23).
    pub fn contains(&self, hour: usize) -> bool {
        let hour = hour % HOURS_PER_DAY;
        if self.start <= self.end {
            self.start <= hour && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

impl Default for HourWindow {
    fn default() -> Self {
        Self::ALL_DAY
    }
}

/// Immutable definition of one supply resource.
///
/// Capacity is counted in whole kWh units per hour; the allocator may
/// dispatch any integer amount between zero and `capacity_kwh`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSpec {
    /// Unique resource identifier.
    pub name: String,
    /// Maximum kWh the resource can supply in one hour.
    pub capacity_kwh: u32,
    /// Cost per kWh supplied.
    pub unit_cost: f64,
    /// Hours of the day during which the resource is available.
    pub availability: HourWindow,
    /// Whether supply from this resource counts as fossil (diesel-equivalent) usage.
    pub fossil: bool,
}

impl ResourceSpec {
    /// Creates a renewable resource.
    pub fn new(
        name: impl Into<String>,
        capacity_kwh: u32,
        unit_cost: f64,
        availability: HourWindow,
    ) -> Self {
        Self {
            name: name.into(),
            capacity_kwh,
            unit_cost,
            availability,
            fossil: false,
        }
    }

    /// Marks the resource as fossil-fuelled.
    pub fn fossil(mut self) -> Self {
        self.fossil = true;
        self
    }

    /// Returns `true` if the resource is available during `hour`.
    pub fn is_available(&self, hour: usize) -> bool {
        self.availability.contains(hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_day_window_covers_every_hour() {
        let w = HourWindow::ALL_DAY;
        assert!((0..HOURS_PER_DAY).all(|h| w.contains(h)));
    }

    #[test]
    fn daytime_window_is_half_open() {
        let w = HourWindow::new(6, 19);
        assert!(!w.contains(5));
        assert!(w.contains(6));
        assert!(w.contains(18));
        assert!(!w.contains(19));
    }

    #[test]
    fn wrapping_window_spans_midnight() {
        let w = HourWindow::new(22, 6);
        let covered: Vec<usize> = (0..HOURS_PER_DAY).filter(|&h| w.contains(h)).collect();
        assert_eq!(covered, vec![0, 1, 2, 3, 4, 5, 22, 23]);
    }

    #[test]
    fn empty_window_never_matches() {
        let w = HourWindow::new(7, 7);
        assert!((0..HOURS_PER_DAY).all(|h| !w.contains(h)));
    }

    #[test]
    fn fossil_builder_sets_flag() {
        let diesel = ResourceSpec::new("Diesel", 60, 3.0, HourWindow::new(17, 24)).fossil();
        assert!(diesel.fossil);
        assert!(diesel.is_available(20));
        assert!(!diesel.is_available(10));
    }
}
