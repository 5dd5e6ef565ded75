//! Simulation configuration supplied by the host application.
//!
//! Distances and velocities are entered in kilometers and km/s; the engine
//! scales them to meters when a run starts. The engine never mutates the
//! configuration.

use bevy::math::DVec3;
use bevy::prelude::Resource;

use crate::orbit::KeplerSeed;
use crate::types::{EARTH_MASS, G, KM_TO_METERS};

/// Lower bounds applied by [`SimulationConfig::clamped`].
pub const MIN_PRIMARY_MASS: f64 = 1e10;
pub const MIN_SECONDARY_MASS: f64 = 1e3;
pub const MIN_SECONDARY_RADIUS_KM: f64 = 0.01;
pub const MIN_GRAV_CONST: f64 = 1e-12;

/// How the secondary body should be propagated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationMethod {
    /// Closed-form Kepler orbit when the initial state is a bound ellipse,
    /// numeric integration otherwise.
    #[default]
    AnalyticPreferred,
    /// Always integrate numerically.
    Numeric,
}

/// Invalid configuration detected by [`SimulationConfig::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("gravitational parameter must be positive (got {0})")]
    NonPositiveGravParam(f64),

    #[error("{0} mass must be positive (got {1})")]
    NonPositiveMass(&'static str, f64),

    #[error("bodies start at the same position")]
    ZeroSeparation,

    #[error("{0} is not finite")]
    NonFinite(&'static str),

    #[error("time scale must be finite and non-negative (got {0})")]
    InvalidTimeScale(f64),
}

/// Initial conditions for one body, in kilometer units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyConfig {
    /// Mass in kilograms
    pub mass: f64,
    /// Position in km
    pub position_km: DVec3,
    /// Velocity in km/s
    pub velocity_km_s: DVec3,
    /// Visual radius in km. Not used by gravity.
    pub radius_km: f64,
}

/// Engine input: both bodies, constants and run options.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational constant (m³·kg⁻¹·s⁻²)
    pub grav_const: f64,
    /// Massive body (planet)
    pub primary: BodyConfig,
    /// Whether the primary is drawn as a point. Cosmetic only.
    pub point_mass: bool,
    /// Light body (ship)
    pub secondary: BodyConfig,
    /// Propagation method preference
    pub method: SimulationMethod,
    /// Simulation seconds per real second, applied by the scheduler
    pub time_scale: f64,
    /// Initial guess used by the Kepler solver
    pub kepler_seed: KeplerSeed,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grav_const: G,
            primary: BodyConfig {
                mass: EARTH_MASS,
                position_km: DVec3::ZERO,
                velocity_km_s: DVec3::ZERO,
                radius_km: 0.0,
            },
            point_mass: true,
            secondary: BodyConfig {
                mass: 1e4,
                position_km: DVec3::new(-500.0, 0.0, 0.0),
                velocity_km_s: DVec3::new(5.0, 0.0, 0.0),
                radius_km: 0.01,
            },
            method: SimulationMethod::AnalyticPreferred,
            time_scale: 3.0,
            kepler_seed: KeplerSeed::default(),
        }
    }
}

impl SimulationConfig {
    /// Gravitational parameter μ = G·M of the primary (m³/s²).
    pub fn gm(&self) -> f64 {
        self.grav_const * self.primary.mass
    }

    /// Initial position of the secondary relative to the primary, in meters.
    pub fn relative_position(&self) -> DVec3 {
        (self.secondary.position_km - self.primary.position_km) * KM_TO_METERS
    }

    /// Initial velocity of the secondary relative to the primary, in m/s.
    pub fn relative_velocity(&self) -> DVec3 {
        (self.secondary.velocity_km_s - self.primary.velocity_km_s) * KM_TO_METERS
    }

    /// Copy with masses, radii and G raised to their input minimums.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        out.primary.mass = out.primary.mass.max(MIN_PRIMARY_MASS);
        out.primary.radius_km = out.primary.radius_km.max(0.0);
        out.secondary.mass = out.secondary.mass.max(MIN_SECONDARY_MASS);
        out.secondary.radius_km = out.secondary.radius_km.max(MIN_SECONDARY_RADIUS_KM);
        out.grav_const = out.grav_const.max(MIN_GRAV_CONST);
        out
    }

    /// Check the preconditions the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vectors = [
            ("primary position", self.primary.position_km),
            ("primary velocity", self.primary.velocity_km_s),
            ("secondary position", self.secondary.position_km),
            ("secondary velocity", self.secondary.velocity_km_s),
        ];
        for (name, v) in vectors {
            if !crate::types::is_finite_vec(v) {
                return Err(ConfigError::NonFinite(name));
            }
        }
        if !self.grav_const.is_finite() {
            return Err(ConfigError::NonFinite("gravitational constant"));
        }
        for (name, mass) in [("primary", self.primary.mass), ("secondary", self.secondary.mass)] {
            if !mass.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
            if mass <= 0.0 {
                return Err(ConfigError::NonPositiveMass(name, mass));
            }
        }

        let gm = self.gm();
        if gm <= 0.0 {
            return Err(ConfigError::NonPositiveGravParam(gm));
        }
        if self.relative_position().length_squared() == 0.0 {
            return Err(ConfigError::ZeroSeparation);
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        Ok(())
    }
}
