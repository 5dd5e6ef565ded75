//! Orbitsim - Two-Body Orbital Propagation
//!
//! A library crate that propagates a light secondary body around a massive
//! primary, using a closed-form Kepler solution for bound orbits and RK4
//! integration otherwise. A Bevy plugin drives it from `FixedUpdate`.

pub mod config;
pub mod engine;
pub mod orbit;
pub mod physics;
pub mod plugin;
pub mod scenarios;
pub mod types;


pub use config::{ConfigError, SimulationConfig, SimulationMethod};
pub use engine::{PropagationMode, RunState, SimulationEngine, SimulationEvent, TickOutcome};
pub use plugin::{SimulationCommand, SimulationLog, SimulationPlugin, SpeedUpdate};
