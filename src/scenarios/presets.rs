//! Preset scenario definitions.
//!
//! Six scenarios around an Earth-mass primary. Positions in km, velocities
//! in km/s.

use bevy::math::DVec3;

use crate::config::SimulationMethod;
use crate::types::EARTH_MASS;

use super::Scenario;

/// All available preset scenarios.
pub static SCENARIOS: &[Scenario] = &[
    RADIAL_DROP,
    LOW_ORBIT,
    CIRCULAR_LEO,
    ESCAPE,
    DRIFTING_PLANET,
    FORCED_NUMERIC,
];

/// Scenario 1: Radial Drop (Default)
///
/// The ship starts 500 km from the planet's center heading straight at it.
/// Zero angular momentum, so there is no ellipse to follow and the run falls
/// back to numeric integration.
pub const RADIAL_DROP: Scenario = Scenario {
    id: "radial_drop",
    name: "Radial Drop",
    description: "Ship launched straight at the planet. Degenerate orbit, numeric mode.",
    primary_mass: EARTH_MASS,
    primary_velocity_km_s: DVec3::ZERO,
    secondary_position_km: DVec3::new(-500.0, 0.0, 0.0),
    secondary_velocity_km_s: Some(DVec3::new(5.0, 0.0, 0.0)),
    method: SimulationMethod::AnalyticPreferred,
    time_scale: 3.0,
};

/// Scenario 2: Low Orbit
///
/// Tangential launch at 500 km: a very eccentric ellipse starting at
/// apoapsis with a period of about 40 s.
pub const LOW_ORBIT: Scenario = Scenario {
    id: "low_orbit",
    name: "Low Orbit",
    description: "Tangential launch from apoapsis. Highly eccentric ellipse, analytic mode.",
    primary_mass: EARTH_MASS,
    primary_velocity_km_s: DVec3::ZERO,
    secondary_position_km: DVec3::new(-500.0, 0.0, 0.0),
    secondary_velocity_km_s: Some(DVec3::new(0.0, 5.0, 0.0)),
    method: SimulationMethod::AnalyticPreferred,
    time_scale: 1.0,
};

/// Scenario 3: Circular LEO
pub const CIRCULAR_LEO: Scenario = Scenario {
    id: "circular_leo",
    name: "Circular Orbit",
    description: "Circular orbit 7000 km from the center, about 97 minutes per revolution.",
    primary_mass: EARTH_MASS,
    primary_velocity_km_s: DVec3::ZERO,
    secondary_position_km: DVec3::new(7000.0, 0.0, 0.0),
    secondary_velocity_km_s: None, // Computed: circular velocity
    method: SimulationMethod::AnalyticPreferred,
    time_scale: 60.0,
};

/// Scenario 4: Escape
///
/// 11 km/s at 7000 km is above escape velocity (about 10.7 km/s), so the
/// specific energy is positive and the run is integrated numerically.
pub const ESCAPE: Scenario = Scenario {
    id: "escape",
    name: "Escape Trajectory",
    description: "Faster than escape velocity. Unbound, numeric mode.",
    primary_mass: EARTH_MASS,
    primary_velocity_km_s: DVec3::ZERO,
    secondary_position_km: DVec3::new(7000.0, 0.0, 0.0),
    secondary_velocity_km_s: Some(DVec3::new(0.0, 11.0, 0.0)),
    method: SimulationMethod::AnalyticPreferred,
    time_scale: 60.0,
};

/// Scenario 5: Drifting Planet
///
/// The planet coasts at 2 km/s and the ship orbits along with it. The
/// ship's velocity is given relative to the planet.
pub const DRIFTING_PLANET: Scenario = Scenario {
    id: "drifting_planet",
    name: "Drifting Planet",
    description: "Moving primary carrying an eccentric orbit with it.",
    primary_mass: EARTH_MASS,
    primary_velocity_km_s: DVec3::new(2.0, 0.0, 0.0),
    secondary_position_km: DVec3::new(7000.0, 0.0, 0.0),
    secondary_velocity_km_s: Some(DVec3::new(0.0, 8.0, 0.0)),
    method: SimulationMethod::AnalyticPreferred,
    time_scale: 60.0,
};

/// Scenario 6: Forced Numeric
///
/// A bound ellipse that could be solved analytically, integrated with RK4
/// instead. Useful for comparing the two propagators.
pub const FORCED_NUMERIC: Scenario = Scenario {
    id: "forced_numeric",
    name: "Forced Numeric",
    description: "Bound ellipse integrated with RK4.",
    primary_mass: EARTH_MASS,
    primary_velocity_km_s: DVec3::ZERO,
    secondary_position_km: DVec3::new(7000.0, 0.0, 0.0),
    secondary_velocity_km_s: Some(DVec3::new(0.0, 8.5, 0.0)),
    method: SimulationMethod::Numeric,
    time_scale: 60.0,
};
