//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec3;
use orbitsim::config::{SimulationConfig, SimulationMethod};
use orbitsim::engine::SimulationEngine;
use orbitsim::types::{EARTH_MASS, G};

/// Gravitational parameter of the default primary (m³/s²).
pub const GM_EARTH: f64 = G * EARTH_MASS;

/// Config for a secondary at `position_km` moving at `velocity_km_s`
/// around a stationary Earth-mass primary.
pub fn config_with(position_km: DVec3, velocity_km_s: DVec3) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.secondary.position_km = position_km;
    config.secondary.velocity_km_s = velocity_km_s;
    config
}

/// Config starting at periapsis `periapsis_km` on the +x axis.
pub fn elliptical_config(periapsis_km: f64, eccentricity: f64) -> SimulationConfig {
    let r_p = periapsis_km * 1e3;
    let a = r_p / (1.0 - eccentricity);
    let v = (GM_EARTH * (2.0 / r_p - 1.0 / a)).sqrt();
    config_with(DVec3::new(periapsis_km, 0.0, 0.0), DVec3::new(0.0, v / 1e3, 0.0))
}

/// Same initial conditions, integrated numerically.
pub fn numeric(mut config: SimulationConfig) -> SimulationConfig {
    config.method = SimulationMethod::Numeric;
    config
}

/// Started engine with the start-up log already drained.
pub fn started(config: &SimulationConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new();
    engine.start(config);
    engine.drain_events();
    engine
}

/// Tick `engine` `steps` times with a fixed dt.
pub fn run(engine: &mut SimulationEngine, dt: f64, steps: usize) {
    for _ in 0..steps {
        engine.tick(dt);
    }
}

/// Compute specific orbital energy.
pub fn orbital_energy(pos: DVec3, vel: DVec3) -> f64 {
    let r = pos.length();
    let v = vel.length();
    0.5 * v * v - GM_EARTH / r
}

/// Compute orbital period for elliptical orbit.
pub fn orbital_period(semi_major_axis: f64) -> f64 {
    use std::f64::consts::TAU;
    TAU * (semi_major_axis.powi(3) / GM_EARTH).sqrt()
}
