//! Property-based tests for the RK4 integrator using proptest.
//!
//! These tests verify physical invariants across a range of orbital parameters.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{acceleration, rk4_step};
use crate::orbit::{KeplerPropagator, decide};
use crate::test_utils::{assertions, fixtures};
use crate::test_utils::fixtures::GM_EARTH;

/// Integrate with a fixed dt and return the final state.
fn integrate(mut pos: DVec3, mut vel: DVec3, dt: f64, duration: f64) -> (DVec3, DVec3) {
    let mut t = 0.0;
    while t < duration {
        let step = rk4_step(pos, vel, DVec3::ZERO, GM_EARTH, dt);
        pos = step.position;
        vel = step.velocity;
        t += dt;
    }
    (pos, vel)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Specific orbital energy drifts less than 0.1% over one analytic period.
    #[test]
    fn prop_energy_conservation_one_orbit(
        perigee_km in 6_600.0f64..20_000.0,
        eccentricity in 0.0f64..0.6,
    ) {
        let state = fixtures::elliptical_orbit(perigee_km, eccentricity);
        let initial_energy = assertions::orbital_energy(state.pos, state.vel, GM_EARTH);

        let elements = decide(state.pos, state.vel, GM_EARTH).elements().cloned().unwrap();
        let period = elements.period();
        let (pos, vel) = integrate(state.pos, state.vel, period / 2000.0, period);

        let final_energy = assertions::orbital_energy(pos, vel, GM_EARTH);
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        prop_assert!(
            drift < 1e-3,
            "Energy drift {:.4}% exceeds 0.1% tolerance (e={})",
            drift * 100.0, eccentricity
        );
    }

    /// Angular momentum is conserved for a central force.
    #[test]
    fn prop_angular_momentum_conservation(
        perigee_km in 6_600.0f64..20_000.0,
        eccentricity in 0.0f64..0.6,
    ) {
        let state = fixtures::elliptical_orbit(perigee_km, eccentricity);
        let initial_l = assertions::angular_momentum(state.pos, state.vel);

        let elements = decide(state.pos, state.vel, GM_EARTH).elements().cloned().unwrap();
        let period = elements.period();
        let (pos, vel) = integrate(state.pos, state.vel, period / 2000.0, period);

        let final_l = assertions::angular_momentum(pos, vel);
        let drift = ((final_l - initial_l) / initial_l).abs();
        prop_assert!(drift < 1e-3, "Angular momentum drift {:.4}%", drift * 100.0);
    }

    /// RK4 and the Kepler solution agree over a quarter orbit.
    #[test]
    fn prop_rk4_tracks_kepler(
        perigee_km in 6_600.0f64..20_000.0,
        eccentricity in 0.0f64..0.5,
    ) {
        let state = fixtures::elliptical_orbit(perigee_km, eccentricity);
        let elements = decide(state.pos, state.vel, GM_EARTH).elements().cloned().unwrap();

        let steps = 500;
        let dt = elements.period() / 4.0 / steps as f64;
        let (pos, _) = integrate(state.pos, state.vel, dt, dt * (steps as f64 - 0.5));

        let analytic = KeplerPropagator::default().advance(&elements, dt * steps as f64);
        let error = (pos - analytic.position).length() / analytic.radius;
        prop_assert!(error < 1e-4, "RK4 vs Kepler error {:.3e}", error);
    }

    /// Acceleration magnitude follows the inverse-square law.
    #[test]
    fn prop_inverse_square(
        distance in 1.0e3f64..1.0e9,
        x in -1.0f64..1.0,
        y in -1.0f64..1.0,
        z in -1.0f64..1.0,
    ) {
        let dir = DVec3::new(x, y, z);
        prop_assume!(dir.length() > 1e-3);
        let pos = dir.normalize() * distance;
        let acc = acceleration(pos, DVec3::ZERO, GM_EARTH);
        let expected = GM_EARTH / (distance * distance);
        prop_assert!(((acc.length() - expected) / expected).abs() < 1e-9);
        prop_assert!(acc.dot(pos) < 0.0);
    }
}

#[cfg(test)]
mod deterministic_tests {
    use super::*;

    #[test]
    fn test_fixture_orbits_are_bound() {
        let state = fixtures::circular_orbit(7_000.0);
        let energy = assertions::orbital_energy(state.pos, state.vel, GM_EARTH);
        assert!(energy < 0.0, "Bound orbit should have negative energy");
    }

    #[test]
    fn test_identical_inputs_are_bitwise_identical() {
        let state = fixtures::elliptical_orbit(7_000.0, 0.2);
        let a = integrate(state.pos, state.vel, 3.0, 600.0);
        let b = integrate(state.pos, state.vel, 3.0, 600.0);
        assert_eq!(a, b);
    }
}
