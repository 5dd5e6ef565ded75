//! Preset initial conditions.
//!
//! Each scenario exercises one branch of the engine:
//! - Radial drop (degenerate orbit, numeric)
//! - Eccentric and circular bound orbits (analytic)
//! - Escape trajectory (numeric)
//! - Moving primary
//! - Forced numeric integration of a bound orbit

pub mod presets;

use bevy::log::info;
use bevy::math::DVec3;

use crate::config::{BodyConfig, SimulationConfig, SimulationMethod};
use crate::types::{EARTH_MASS, G, KM_TO_METERS};

pub use presets::SCENARIOS;

/// A predefined scenario configuration.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier for the scenario.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the scenario.
    pub description: &'static str,
    /// Primary mass (kg).
    pub primary_mass: f64,
    /// Primary velocity (km/s). The primary always starts at the origin.
    pub primary_velocity_km_s: DVec3,
    /// Secondary position (km).
    pub secondary_position_km: DVec3,
    /// Secondary velocity (km/s). None = circular prograde orbit around the
    /// primary, computed from its mass.
    pub secondary_velocity_km_s: Option<DVec3>,
    /// Propagation method preference.
    pub method: SimulationMethod,
    /// Simulation seconds per real second.
    pub time_scale: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            id: "sandbox",
            name: "Sandbox",
            description: "Default configuration",
            primary_mass: EARTH_MASS,
            primary_velocity_km_s: DVec3::ZERO,
            secondary_position_km: DVec3::new(-500.0, 0.0, 0.0),
            secondary_velocity_km_s: Some(DVec3::new(5.0, 0.0, 0.0)),
            method: SimulationMethod::AnalyticPreferred,
            time_scale: 3.0,
        }
    }
}

impl Scenario {
    /// Build the engine configuration for this scenario.
    ///
    /// Everything the scenario doesn't specify keeps its
    /// [`SimulationConfig::default`] value.
    pub fn config(&self) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        let velocity = self
            .secondary_velocity_km_s
            .unwrap_or_else(|| self.circular_velocity_km_s());

        SimulationConfig {
            primary: BodyConfig {
                mass: self.primary_mass,
                velocity_km_s: self.primary_velocity_km_s,
                ..defaults.primary
            },
            secondary: BodyConfig {
                position_km: self.secondary_position_km,
                velocity_km_s: self.primary_velocity_km_s + velocity,
                ..defaults.secondary
            },
            method: self.method,
            time_scale: self.time_scale,
            ..defaults
        }
    }

    /// Prograde circular velocity (km/s) at the secondary's position,
    /// relative to the primary.
    fn circular_velocity_km_s(&self) -> DVec3 {
        let r = self.secondary_position_km * KM_TO_METERS;
        let speed = (G * self.primary_mass / r.length()).sqrt() / KM_TO_METERS;
        DVec3::new(-r.y, r.x, 0.0).normalize_or_zero() * speed
    }
}

/// Get a scenario by ID.
pub fn find_scenario(id: &str) -> Option<&'static Scenario> {
    let scenario = SCENARIOS.iter().find(|s| s.id == id);
    if let Some(scenario) = scenario {
        info!("Loading scenario: {} ({})", scenario.name, scenario.id);
    }
    scenario
}
