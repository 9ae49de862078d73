//! District demand profiles and per-hour demand samples.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

/// Number of hourly samples in one daily profile.
pub const HOURS_PER_DAY: usize = 24;

/// A consuming district with a fixed 24-hour demand sequence (kWh per hour).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictProfile {
    /// District identifier.
    pub name: String,
    /// Demand for each hour of the day.
    pub hourly_kwh: [u32; HOURS_PER_DAY],
}

impl DistrictProfile {
    pub fn new(name: impl Into<String>, hourly_kwh: [u32; HOURS_PER_DAY]) -> Self {
        Self {
            name: name.into(),
            hourly_kwh,
        }
    }
}

/// One hour's demand across all districts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandSample {
    /// Hour of day (0-23).
    pub hour: usize,
    /// Demand per district, in profile order.
    pub district_kwh: Vec<u32>,
}

impl DemandSample {
    /// Creates a sample for `hour` from per-district demand values.
    pub fn new(hour: usize, district_kwh: Vec<u32>) -> Self {
        Self { hour, district_kwh }
    }

    /// Scalar allocation target: the sum of all district demands.
    pub fn total_kwh(&self) -> u32 {
        total_kwh(&self.district_kwh)
    }
}

/// Sums per-district demand, saturating at `u32::MAX`.
pub fn total_kwh(district_kwh: &[u32]) -> u32 {
    let total: u64 = district_kwh.iter().map(|&kwh| u64::from(kwh)).sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Daily demand table for a set of districts, optionally jittered.
///
/// With `noise_std == 0.0` samples are the table values verbatim. Otherwise
/// each district value receives seeded Gaussian noise, rounded to whole
/// kWh and clamped at zero, so runs with the same seed are reproducible.
///
/// # Examples
///
/// ```
/// use grid_alloc::grid::demand::{DemandProfile, DistrictProfile};
///
/// let mut profile = DemandProfile::new(vec![
///     DistrictProfile::new("A", [10; 24]),
///     DistrictProfile::new("B", [5; 24]),
/// ]);
/// assert_eq!(profile.sample(3).total_kwh(), 15);
/// ```
#[derive(Debug, Clone)]
pub struct DemandProfile {
    districts: Vec<DistrictProfile>,
    noise_std: f64,
    rng: StdRng,
}

impl DemandProfile {
    /// Creates a noiseless profile.
    pub fn new(districts: Vec<DistrictProfile>) -> Self {
        Self {
            districts,
            noise_std: 0.0,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Enables Gaussian jitter with the given standard deviation (kWh) and seed.
    pub fn with_noise(mut self, noise_std: f64, seed: u64) -> Self {
        self.noise_std = noise_std.max(0.0);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// District names in profile order.
    pub fn district_names(&self) -> Vec<&str> {
        self.districts.iter().map(|d| d.name.as_str()).collect()
    }

    /// Draws the demand sample for `hour`. Hours past 23 wrap to the next day.
    pub fn sample(&mut self, hour: usize) -> DemandSample {
        let idx = hour % HOURS_PER_DAY;
        let mut district_kwh = Vec::with_capacity(self.districts.len());
        for district in &self.districts {
            let base = district.hourly_kwh[idx];
            let kwh = if self.noise_std > 0.0 {
                let jittered = f64::from(base) + gaussian_noise(&mut self.rng, self.noise_std);
                jittered.round().max(0.0) as u32
            } else {
                base
            };
            district_kwh.push(kwh);
        }
        DemandSample::new(idx, district_kwh)
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
