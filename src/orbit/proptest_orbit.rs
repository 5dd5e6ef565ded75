//! Property-based tests for the analytic orbit path using proptest.

use std::f64::consts::TAU;

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{KeplerPropagator, KeplerSeed, OrbitDecision, decide, solve_eccentric_anomaly};
use crate::test_utils::fixtures::{GM_EARTH, launch_state};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// At t = 0 the propagator lands back on the initial state.
    #[test]
    fn prop_epoch_round_trip(
        radius in 1.0e6f64..1.0e8,
        angle in 0.0f64..TAU,
        speed_factor in 0.6f64..1.25,
        flight_path in -0.6f64..0.6,
        clockwise in any::<bool>(),
    ) {
        let (r0, v0) = launch_state(radius, angle, speed_factor, flight_path, clockwise);
        let elements = match decide(r0, v0, GM_EARTH) {
            OrbitDecision::Elliptical(elements) => elements,
            other => return Err(TestCaseError::fail(format!("expected ellipse, got {:?}", other))),
        };

        let sample = KeplerPropagator::default().advance(&elements, 0.0);
        let pos_error = (sample.position - r0).length() / radius;
        prop_assert!(pos_error < 1e-4, "position error {:.3e} (e={})", pos_error, elements.eccentricity);

        let speed_error = (sample.speed - v0.length()).abs() / v0.length();
        prop_assert!(speed_error < 1e-4, "speed error {:.3e}", speed_error);
    }

    /// The orbital radius always stays between periapsis and apoapsis.
    #[test]
    fn prop_radius_within_apsides(
        radius in 1.0e6f64..1.0e8,
        speed_factor in 0.5f64..1.35,
        flight_path in -0.8f64..0.8,
        elapsed in 0.0f64..1.0e7,
    ) {
        let (r0, v0) = launch_state(radius, 0.3, speed_factor, flight_path, false);
        let elements = decide(r0, v0, GM_EARTH).elements().cloned().unwrap();

        let sample = KeplerPropagator::default().advance(&elements, elapsed);
        let slack = 1e-9 * elements.apoapsis();
        prop_assert!(sample.radius >= elements.periapsis() - slack);
        prop_assert!(sample.radius <= elements.apoapsis() + slack);
    }

    /// Kepler's equation residual stays small for any mean anomaly.
    #[test]
    fn prop_newton_residual(
        eccentricity in 0.0f64..0.9,
        mean_anomaly in 0.0f64..TAU,
    ) {
        let e_anom = solve_eccentric_anomaly(mean_anomaly, eccentricity, KeplerSeed::Standard);
        let residual = (e_anom - eccentricity * e_anom.sin() - mean_anomaly).abs();
        prop_assert!(residual < 1e-5, "residual {:.3e}", residual);
    }

    /// Radial launches never get an ellipse parametrization.
    #[test]
    fn prop_radial_velocity_is_degenerate(
        radius in 1.0e5f64..1.0e8,
        angle in 0.0f64..TAU,
        speed in -2.0e4f64..2.0e4,
    ) {
        let dir = DVec3::new(angle.cos(), angle.sin(), 0.0);
        let r0 = dir * radius;
        let v0 = dir * speed;
        let decision = decide(r0, v0, GM_EARTH);
        prop_assert!(matches!(decision, OrbitDecision::Degenerate { .. }), "{:?}", decision);
    }

    /// Anything at or above escape speed is reported as hyperbolic.
    #[test]
    fn prop_escape_speed_is_hyperbolic(
        radius in 1.0e6f64..1.0e8,
        excess in 1.0f64..3.0,
        flight_path in -1.2f64..1.2,
    ) {
        let v_esc_factor = std::f64::consts::SQRT_2 * excess * 1.000001;
        let (r0, v0) = launch_state(radius, 1.0, v_esc_factor, flight_path, false);
        let decision = decide(r0, v0, GM_EARTH);
        prop_assert!(
            matches!(decision, OrbitDecision::Hyperbolic { .. }),
            "expected hyperbolic, got {:?}",
            decision
        );
    }
}
