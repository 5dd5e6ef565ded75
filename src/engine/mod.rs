//! Two-body simulation engine.
//!
//! Owns the state of both bodies, picks a propagation mode when a run
//! starts and advances the secondary once per [`SimulationEngine::tick`].
//! The caller owns the clock: nothing here reads wall time, so identical
//! `dt` sequences give bit-identical trajectories.
//!
//! # Lifecycle
//!
//! ```text
//! Stopped --start--> Running --stop--> Paused --resume--> Running
//!    ^                                                      |
//!    +---------------------------reset----------------------+
//! ```
//!
//! `start` is accepted in any state and discards the previous run.

mod events;

use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;

pub use events::{EventBus, MAX_PENDING_EVENTS, SimulationEvent, Subscriber};

use crate::config::{SimulationConfig, SimulationMethod};
use crate::orbit::{KEPLER_TOLERANCE, KeplerPropagator, OrbitDecision, OrbitalElements, decide};
use crate::physics::{MIN_SEPARATION_SQUARED, rk4_step};
use crate::types::{BodyState, METERS_TO_KM, is_finite_vec, polar_angle_deg};

/// Whether ticks are processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    /// Run halted by `stop()`; state kept for `resume()`.
    Paused,
}

/// Which propagator drives the secondary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationMode {
    Analytic,
    Numeric,
}

/// Propagator selected at start. Exactly one is active per run.
#[derive(Clone, Debug, PartialEq)]
pub enum Propagator {
    /// Closed-form Kepler ellipse.
    Analytic {
        elements: OrbitalElements,
        kepler: KeplerPropagator,
    },
    /// RK4 integration.
    Numeric,
}

impl Propagator {
    pub fn mode(&self) -> PropagationMode {
        match self {
            Propagator::Analytic { .. } => PropagationMode::Analytic,
            Propagator::Numeric => PropagationMode::Numeric,
        }
    }
}

/// What a call to [`SimulationEngine::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    /// Both bodies moved.
    Advanced,
    /// The secondary's update was invalid and discarded.
    Skipped,
}

#[derive(Clone, Debug, PartialEq)]
struct SimulationState {
    /// Simulated seconds since start
    elapsed: f64,
    /// μ = G·M of the primary (m³/s²)
    gm: f64,
    primary: BodyState,
    secondary: BodyState,
    propagator: Propagator,
}

/// Result of propagating the secondary for one tick.
enum Step {
    Moved {
        log: String,
        speed_km_s: f64,
    },
    Invalid {
        warning: String,
        speed_km_s: Option<f64>,
    },
}

/// The propagation engine. Inserted as a resource by the Bevy adapter, but
/// usable on its own.
#[derive(Resource, Debug, Default)]
pub struct SimulationEngine {
    run_state: RunState,
    state: Option<SimulationState>,
    events: EventBus,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run from `config`, discarding any previous state.
    ///
    /// Analytic mode is only considered when the config prefers it and the
    /// initial relative state is a bound, non-radial ellipse.
    pub fn start(&mut self, config: &SimulationConfig) -> PropagationMode {
        let gm = config.gm();
        let primary = BodyState::from_km(
            config.primary.position_km,
            config.primary.velocity_km_s,
            config.primary.mass,
        );
        let secondary = BodyState::from_km(
            config.secondary.position_km,
            config.secondary.velocity_km_s,
            config.secondary.mass,
        );

        let (propagator, description) = select_propagator(config, gm, &primary, &secondary);
        let mode = propagator.mode();
        info!(
            "Starting simulation: mode={:?}, μ={:.4e} m³/s², separation={:.2} km",
            mode,
            gm,
            (secondary.pos - primary.pos).length() * METERS_TO_KM
        );

        self.state = Some(SimulationState {
            elapsed: 0.0,
            gm,
            primary,
            secondary,
            propagator,
        });
        self.run_state = RunState::Running;
        self.publish(SimulationEvent::Log(format!(
            "--- simulation started ({description}) ---"
        )));
        mode
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// The primary coasts along its own velocity; it never feels the
    /// secondary. The secondary is then propagated relative to the moved
    /// primary. A non-finite `dt` is rejected before any state changes.
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        if self.run_state != RunState::Running {
            debug!("tick ignored in state {:?}", self.run_state);
            return TickOutcome::Idle;
        }
        if !dt.is_finite() {
            let warning = format!("Invalid dt={dt}");
            warn!("{warning}");
            self.publish(SimulationEvent::Warning(warning));
            return TickOutcome::Skipped;
        }
        let Some(state) = self.state.as_mut() else {
            debug!("tick while running without state");
            return TickOutcome::Idle;
        };

        state.elapsed += dt;
        state.primary.drift(dt);

        let step = match &mut state.propagator {
            Propagator::Analytic { elements, kepler } => advance_analytic(
                elements,
                kepler,
                state.elapsed,
                &state.primary,
                &mut state.secondary,
            ),
            Propagator::Numeric => {
                advance_numeric(state.gm, dt, &state.primary, &mut state.secondary)
            }
        };
        let (primary, secondary) = (state.primary, state.secondary);

        match step {
            Step::Moved { log, speed_km_s } => {
                debug!("{log}");
                self.publish(SimulationEvent::Log(log));
                self.publish(SimulationEvent::SpeedUpdated(speed_km_s));
                self.publish(SimulationEvent::BodiesMoved { primary, secondary });
                TickOutcome::Advanced
            }
            Step::Invalid {
                warning,
                speed_km_s,
            } => {
                warn!("{warning}");
                self.publish(SimulationEvent::Warning(warning));
                if let Some(speed) = speed_km_s {
                    self.publish(SimulationEvent::SpeedUpdated(speed));
                }
                TickOutcome::Skipped
            }
        }
    }

    /// Pause a running simulation. Returns false if it wasn't running.
    pub fn stop(&mut self) -> bool {
        if self.run_state != RunState::Running {
            debug!("stop ignored in state {:?}", self.run_state);
            return false;
        }
        self.run_state = RunState::Paused;
        info!("Simulation paused at t={:.2} s", self.elapsed());
        self.publish(SimulationEvent::Log("--- simulation stopped ---".into()));
        true
    }

    /// Continue a paused simulation with the same propagator and elements.
    pub fn resume(&mut self) -> bool {
        if self.run_state != RunState::Paused {
            debug!("resume ignored in state {:?}", self.run_state);
            return false;
        }
        self.run_state = RunState::Running;
        info!("Simulation resumed at t={:.2} s", self.elapsed());
        self.publish(SimulationEvent::Log("--- simulation resumed ---".into()));
        true
    }

    /// Drop the current run and return to `Stopped`.
    pub fn reset(&mut self) {
        self.run_state = RunState::Stopped;
        self.state = None;
        debug!("Simulation reset");
    }

    /// Register an observer, called synchronously for every event.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&SimulationEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(Box::new(subscriber));
    }

    /// Take all events published since the last drain, up to
    /// [`MAX_PENDING_EVENTS`] of the newest.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        self.events.drain()
    }

    /// Events waiting for [`SimulationEngine::drain_events`].
    pub fn pending_events(&self) -> usize {
        self.events.pending()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Active propagation mode, if a run exists.
    pub fn mode(&self) -> Option<PropagationMode> {
        self.state.as_ref().map(|s| s.propagator.mode())
    }

    /// Simulated seconds since start (0 without a run).
    pub fn elapsed(&self) -> f64 {
        self.state.as_ref().map_or(0.0, |s| s.elapsed)
    }

    pub fn primary(&self) -> Option<&BodyState> {
        self.state.as_ref().map(|s| &s.primary)
    }

    pub fn secondary(&self) -> Option<&BodyState> {
        self.state.as_ref().map(|s| &s.secondary)
    }

    /// Orbital elements on the analytic path.
    pub fn elements(&self) -> Option<&OrbitalElements> {
        match self.state.as_ref().map(|s| &s.propagator) {
            Some(Propagator::Analytic { elements, .. }) => Some(elements),
            _ => None,
        }
    }

    pub fn gm(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.gm)
    }

    fn publish(&mut self, event: SimulationEvent) {
        self.events.publish(event);
    }
}

fn select_propagator(
    config: &SimulationConfig,
    gm: f64,
    primary: &BodyState,
    secondary: &BodyState,
) -> (Propagator, &'static str) {
    if config.method == SimulationMethod::Numeric {
        return (Propagator::Numeric, "numeric");
    }

    let r0 = secondary.pos - primary.pos;
    let v0 = secondary.vel - primary.vel;
    match decide(r0, v0, gm) {
        OrbitDecision::Elliptical(elements) => {
            info!(
                "Elliptical orbit: a={:.1} m, e={:.6}, ω={:.4} rad, period={:.1} s",
                elements.semi_major_axis,
                elements.eccentricity,
                elements.argument_of_periapsis,
                elements.period()
            );
            let kepler = KeplerPropagator::new(config.kepler_seed);
            (
                Propagator::Analytic { elements, kepler },
                "analytic, elliptical orbit",
            )
        }
        OrbitDecision::Degenerate { angular_momentum } => {
            info!("Radial or oscillating orbit (|h|={angular_momentum:.3e} m²/s), using numeric");
            (Propagator::Numeric, "numeric, radial or oscillating orbit")
        }
        OrbitDecision::Hyperbolic { energy } => {
            info!("Orbit not bound (E={energy:.3e} m²/s²), using numeric");
            (Propagator::Numeric, "numeric, energy ≥ 0")
        }
    }
}

fn advance_analytic(
    elements: &mut OrbitalElements,
    kepler: &KeplerPropagator,
    elapsed: f64,
    primary: &BodyState,
    secondary: &mut BodyState,
) -> Step {
    let sample = kepler.advance(elements, elapsed);
    if sample.residual >= KEPLER_TOLERANCE {
        debug!("Kepler solve stopped at residual {:.3e}", sample.residual);
    }
    let position = primary.pos + sample.position;
    if !sample.is_finite() || !is_finite_vec(position) {
        return Step::Invalid {
            warning: format!("Analytic: Invalid position={position:?}"),
            speed_km_s: None,
        };
    }

    elements.true_anomaly = sample.true_anomaly;
    secondary.pos = position;
    secondary.vel = primary.vel + sample.velocity;

    let speed_km_s = sample.speed * METERS_TO_KM;
    Step::Moved {
        log: format!(
            "Analytic θ={:.2}°, v={:.2} km/s",
            sample.true_anomaly_deg(),
            speed_km_s
        ),
        speed_km_s,
    }
}

fn advance_numeric(gm: f64, dt: f64, primary: &BodyState, secondary: &mut BodyState) -> Step {
    // Reported values describe the state the step starts from
    let separation = primary.pos - secondary.pos;
    let dist_sq = separation.length_squared();
    let speed_km_s = secondary.speed_km_per_s();
    if dist_sq <= MIN_SEPARATION_SQUARED || !dist_sq.is_finite() {
        return Step::Invalid {
            warning: format!(
                "Numeric: Invalid dist={:.2}, v={:.2} km/s",
                dist_sq.sqrt(),
                speed_km_s
            ),
            speed_km_s: Some(speed_km_s),
        };
    }

    let step = rk4_step(secondary.pos, secondary.vel, primary.pos, gm, dt);
    if !step.is_finite() {
        return Step::Invalid {
            warning: format!("Numeric: Invalid position={:?}", step.position),
            speed_km_s: None,
        };
    }

    secondary.pos = step.position;
    secondary.vel = step.velocity;

    Step::Moved {
        log: format!(
            "Numeric θ={:.2}°, v={:.2} km/s, dist={:.2} km",
            polar_angle_deg(separation),
            speed_km_s,
            dist_sq.sqrt() * METERS_TO_KM
        ),
        speed_km_s,
    }
}

// =============================================================================
// Tests
// =============================================================================
