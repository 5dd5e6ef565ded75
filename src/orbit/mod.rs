//! Closed-form two-body orbits.
//!
//! [`decide`] inspects the initial relative state and either derives
//! elliptical orbital elements or reports why the orbit can't be handled
//! analytically. [`KeplerPropagator`] then evaluates the ellipse at any
//! elapsed time by solving Kepler's equation.

mod elements;
mod kepler;

#[cfg(test)]
mod proptest_orbit;

pub use elements::{
    CIRCULAR_ECCENTRICITY, DEGENERATE_ANGULAR_MOMENTUM, DEGENERATE_SINE, OrbitDecision,
    OrbitalElements, decide,
};
pub use kepler::{
    KEPLER_TOLERANCE, KeplerPropagator, KeplerSample, KeplerSeed, MAX_NEWTON_ITERATIONS,
    eccentric_to_true_anomaly, solve_eccentric_anomaly,
};
