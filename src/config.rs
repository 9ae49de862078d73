//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::grid::allocator::{
    AllocatorSettings, DEFAULT_PRUNING_SLACK_KWH, DEFAULT_TOLERANCE_PCT, HourlyAllocator,
};
use crate::grid::day::DaySimulation;
use crate::grid::demand::{DemandProfile, DistrictProfile, HOURS_PER_DAY};
use crate::grid::resource::{HourWindow, ResourceSpec};

/// Upper bound on configured capacities and hourly district demand (kWh).
///
/// The exact phase allocates one frontier entry per supply level, so this
/// also bounds its memory.
pub const MAX_KWH_PER_HOUR: u32 = 100_000;

/// Top-level scenario configuration parsed from TOML.
///
/// Every section has defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Allocator tuning parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// District demand profiles.
    #[serde(default)]
    pub demand: DemandConfig,
    /// Supply resources, in dispatch-table order.
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceConfig>,
}

/// Allocator tuning parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Accepted deviation from demand in percent (0-100).
    pub tolerance_pct: u32,
    /// Headroom above the band's upper bound explored by the frontier (kWh).
    pub pruning_slack_kwh: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
            pruning_slack_kwh: DEFAULT_PRUNING_SLACK_KWH,
        }
    }
}

/// Demand profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Seed for demand jitter.
    pub seed: u64,
    /// Standard deviation of per-district Gaussian jitter (kWh); 0 disables it.
    pub noise_std: f64,
    /// Consuming districts.
    pub districts: Vec<DistrictConfig>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            noise_std: 0.0,
            districts: default_districts(),
        }
    }
}

/// One consuming district.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistrictConfig {
    /// District name.
    pub name: String,
    /// Demand per hour (exactly 24 entries, kWh).
    pub hourly_kwh: Vec<u32>,
}

/// One supply resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Unique resource name.
    pub name: String,
    /// Hourly capacity (kWh).
    pub capacity_kwh: u32,
    /// Cost per kWh.
    pub unit_cost: f64,
    /// Availability window; all day when omitted.
    #[serde(default)]
    pub available: HourWindow,
    /// Whether the resource burns fossil fuel.
    #[serde(default)]
    pub fossil: bool,
}

impl ResourceConfig {
    fn new(name: &str, capacity_kwh: u32, unit_cost: f64, available: HourWindow) -> Self {
        Self {
            name: name.to_string(),
            capacity_kwh,
            unit_cost,
            available,
            fossil: false,
        }
    }
}

fn default_resources() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig::new("Solar", 50, 1.0, HourWindow::new(6, 19)),
        ResourceConfig::new("Hydro", 40, 1.5, HourWindow::ALL_DAY),
        ResourceConfig {
            fossil: true,
            ..ResourceConfig::new("Diesel", 60, 3.0, HourWindow::new(17, 24))
        },
    ]
}

fn default_districts() -> Vec<DistrictConfig> {
    vec![
        DistrictConfig {
            name: "A".to_string(),
            hourly_kwh: vec![
                10, 8, 8, 10, 15, 20, 25, 30, 30, 25, 20, 20, 20, 20, 25, 30, 35, 40, 40, 35, 30,
                25, 20, 15,
            ],
        },
        DistrictConfig {
            name: "B".to_string(),
            hourly_kwh: vec![
                8, 6, 6, 8, 10, 15, 20, 20, 20, 20, 15, 15, 15, 15, 20, 25, 30, 30, 30, 25, 20, 15,
                10, 8,
            ],
        },
        DistrictConfig {
            name: "C".to_string(),
            hourly_kwh: vec![
                5, 5, 5, 5, 8, 10, 15, 15, 15, 15, 10, 10, 10, 10, 15, 20, 25, 25, 25, 20, 15, 10,
                8, 5,
            ],
        },
    ]
}

/// Errors raised while loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid scenario TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown preset \"{name}\", available: {available}")]
    UnknownPreset { name: String, available: String },
    /// A field violates a constraint; `field` is the dotted path.
    #[error("config error: {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted field path for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Invalid { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: Solar/Hydro/Diesel serving districts A, B and C.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            demand: DemandConfig::default(),
            resources: default_resources(),
        }
    }

    /// Returns the diesel-outage preset: no diesel, so the evening peak cannot be covered.
    pub fn diesel_outage() -> Self {
        Self {
            resources: default_resources()
                .into_iter()
                .filter(|r| !r.fossil)
                .collect(),
            ..Self::baseline()
        }
    }

    /// Returns the noisy-demand preset: baseline with seeded demand jitter.
    pub fn noisy_demand() -> Self {
        Self {
            demand: DemandConfig {
                noise_std: 4.0,
                seed: 7,
                ..DemandConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "diesel_outage", "noisy_demand"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "diesel_outage" => Ok(Self::diesel_outage()),
            "noisy_demand" => Ok(Self::noisy_demand()),
            _ => Err(ConfigError::UnknownPreset {
                name: name.to_string(),
                available: Self::PRESETS.join(", "),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.tolerance_pct > 100 {
            errors.push(ConfigError::invalid(
                "simulation.tolerance_pct",
                format!("must be <= 100, got {}", self.simulation.tolerance_pct),
            ));
        }

        let d = &self.demand;
        if !d.noise_std.is_finite() || d.noise_std < 0.0 {
            errors.push(ConfigError::invalid(
                "demand.noise_std",
                "must be finite and >= 0",
            ));
        }
        if d.districts.is_empty() {
            errors.push(ConfigError::invalid(
                "demand.districts",
                "at least one district is required",
            ));
        }
        let mut district_names = HashSet::new();
        for (i, district) in d.districts.iter().enumerate() {
            if !district_names.insert(district.name.as_str()) {
                errors.push(ConfigError::invalid(
                    format!("demand.districts[{i}].name"),
                    format!("duplicate district \"{}\"", district.name),
                ));
            }
            if district.hourly_kwh.len() != HOURS_PER_DAY {
                errors.push(ConfigError::invalid(
                    format!("demand.districts[{i}].hourly_kwh"),
                    format!(
                        "must have {HOURS_PER_DAY} entries, got {}",
                        district.hourly_kwh.len()
                    ),
                ));
            }
            let peak = district.hourly_kwh.iter().copied().max().unwrap_or(0);
            if peak > MAX_KWH_PER_HOUR {
                errors.push(ConfigError::invalid(
                    format!("demand.districts[{i}].hourly_kwh"),
                    format!("entries must be <= {MAX_KWH_PER_HOUR}, got {peak}"),
                ));
            }
        }

        if self.resources.is_empty() {
            errors.push(ConfigError::invalid(
                "resources",
                "at least one resource is required",
            ));
        }
        let mut resource_names = HashSet::new();
        for (i, r) in self.resources.iter().enumerate() {
            if r.name.trim().is_empty() {
                errors.push(ConfigError::invalid(
                    format!("resources[{i}].name"),
                    "must not be empty",
                ));
            } else if !resource_names.insert(r.name.as_str()) {
                errors.push(ConfigError::invalid(
                    format!("resources[{i}].name"),
                    format!("duplicate resource \"{}\"", r.name),
                ));
            }
            if r.capacity_kwh > MAX_KWH_PER_HOUR {
                errors.push(ConfigError::invalid(
                    format!("resources[{i}].capacity_kwh"),
                    format!("must be <= {MAX_KWH_PER_HOUR}, got {}", r.capacity_kwh),
                ));
            }
            if !r.unit_cost.is_finite() || r.unit_cost < 0.0 {
                errors.push(ConfigError::invalid(
                    format!("resources[{i}].unit_cost"),
                    "must be finite and >= 0",
                ));
            }
            if r.available.start > HOURS_PER_DAY || r.available.end > HOURS_PER_DAY {
                errors.push(ConfigError::invalid(
                    format!("resources[{i}].available"),
                    format!("hours must be <= {HOURS_PER_DAY}"),
                ));
            }
        }

        errors
    }

    /// Immutable resource definitions in configuration order.
    pub fn resource_specs(&self) -> Vec<ResourceSpec> {
        self.resources
            .iter()
            .map(|r| ResourceSpec {
                name: r.name.clone(),
                capacity_kwh: r.capacity_kwh,
                unit_cost: r.unit_cost,
                availability: r.available,
                fossil: r.fossil,
            })
            .collect()
    }

    pub fn allocator_settings(&self) -> AllocatorSettings {
        AllocatorSettings {
            tolerance_pct: self.simulation.tolerance_pct,
            pruning_slack_kwh: self.simulation.pruning_slack_kwh,
        }
    }

    /// Builds the demand profile. Districts with the wrong number of
    /// entries are padded with zeros or truncated; run [`Self::validate`] first.
    pub fn demand_profile(&self) -> DemandProfile {
        let districts = self
            .demand
            .districts
            .iter()
            .map(|d| {
                let mut hourly = [0; HOURS_PER_DAY];
                for (slot, kwh) in hourly.iter_mut().zip(&d.hourly_kwh) {
                    *slot = *kwh;
                }
                DistrictProfile::new(d.name.clone(), hourly)
            })
            .collect();
        DemandProfile::new(districts).with_noise(self.demand.noise_std, self.demand.seed)
    }

    /// Builds a ready-to-run day simulation from this scenario.
    pub fn build_simulation(&self) -> DaySimulation {
        let allocator = HourlyAllocator::new(self.resource_specs(), self.allocator_settings());
        DaySimulation::new(allocator, self.demand_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(matches!(err, Err(ConfigError::UnknownPreset { .. })));
        let msg = err.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("unknown preset"));
        assert!(msg.contains("diesel_outage"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn diesel_outage_has_no_fossil_resources() {
        let cfg = ScenarioConfig::diesel_outage();
        assert!(cfg.resources.iter().all(|r| !r.fossil));
        assert_eq!(cfg.resources.len(), 2);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
tolerance_pct = 5
pruning_slack_kwh = 20

[demand]
seed = 3
noise_std = 1.5

[[demand.districts]]
name = "North"
hourly_kwh = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24]

[[resources]]
name = "Wind"
capacity_kwh = 30
unit_cost = 0.8
available = { start = 20, end = 8 }

[[resources]]
name = "Gas"
capacity_kwh = 100
unit_cost = 2.5
fossil = true
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.tolerance_pct), Some(5));
        assert_eq!(cfg.as_ref().map(|c| c.demand.districts.len()), Some(1));
        assert_eq!(cfg.as_ref().map(|c| c.resources.len()), Some(2));
        let specs = cfg.as_ref().map(ScenarioConfig::resource_specs).unwrap_or_default();
        assert_eq!(specs[0].availability, HourWindow::new(20, 8));
        assert_eq!(specs[1].availability, HourWindow::ALL_DAY);
        assert!(specs[1].fossil);
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[simulation]
tolerance_pct = 10
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
tolerance_pct = 15
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.tolerance_pct), Some(15));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.pruning_slack_kwh), Some(10));
        assert_eq!(cfg.as_ref().map(|c| c.resources.len()), Some(3));
        assert_eq!(cfg.as_ref().map(|c| c.demand.districts.len()), Some(3));
    }

    #[test]
    fn validation_catches_excess_tolerance() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.tolerance_pct = 120;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field() == Some("simulation.tolerance_pct")));
    }

    #[test]
    fn validation_catches_duplicate_resource() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.resources[1].name = "Solar".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field() == Some("resources[1].name")));
    }

    #[test]
    fn validation_catches_negative_cost() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.resources[0].unit_cost = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field() == Some("resources[0].unit_cost")));
    }

    #[test]
    fn validation_catches_short_district() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.demand.districts[2].hourly_kwh.truncate(20);
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field() == Some("demand.districts[2].hourly_kwh"))
        );
    }

    #[test]
    fn validation_caps_capacity_and_demand() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.resources[2].capacity_kwh = MAX_KWH_PER_HOUR + 1;
        cfg.demand.districts[0].hourly_kwh[19] = u32::MAX;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field() == Some("resources[2].capacity_kwh")));
        assert!(
            errors
                .iter()
                .any(|e| e.field() == Some("demand.districts[0].hourly_kwh"))
        );

        cfg.resources[2].capacity_kwh = MAX_KWH_PER_HOUR;
        cfg.demand.districts[0].hourly_kwh[19] = MAX_KWH_PER_HOUR;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_bad_window() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.resources[0].available = HourWindow::new(6, 30);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field() == Some("resources[0].available")));
    }

    #[test]
    fn validation_reports_every_violation() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.resources.clear();
        cfg.demand.districts.clear();
        cfg.demand.noise_std = f64::NAN;
        let errors = cfg.validate();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn demand_profile_matches_table() {
        let cfg = ScenarioConfig::baseline();
        let mut profile = cfg.demand_profile();
        assert_eq!(profile.district_names(), vec!["A", "B", "C"]);
        assert_eq!(profile.sample(19).district_kwh, vec![35, 25, 20]);
    }
}
