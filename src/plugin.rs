//! Bevy integration for the simulation engine.
//!
//! The engine itself knows nothing about Bevy schedules. This plugin owns it
//! as a resource, feeds it commands, ticks it from `FixedUpdate` and
//! republishes its events as messages.

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::engine::{SimulationEngine, SimulationEvent};
use crate::types::BodyState;

/// Scene units per meter for body transforms (one unit per kilometer).
pub const DISPLAY_SCALE: f64 = 1e-3;

/// Control requests from the host (UI buttons, scripts).
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationCommand {
    Start,
    Stop,
    Resume,
    Reset,
}

/// Log line from the engine.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct SimulationLog {
    pub text: String,
    /// True for recoverable faults.
    pub warning: bool,
}

/// Secondary speed in km/s, published once per successful tick.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpeedUpdate(pub f64);

/// Marks the entity that displays a simulated body.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulatedBody {
    Primary,
    Secondary,
}

/// System set containing the engine systems, in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationSet;

/// Plugin running the two-body engine.
///
/// Keeps an existing `SimulationEngine` or `SimulationConfig` resource if the
/// app inserted one before adding the plugin.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationEngine>()
            .init_resource::<SimulationConfig>()
            .add_message::<SimulationCommand>()
            .add_message::<SimulationLog>()
            .add_message::<SpeedUpdate>()
            .add_systems(
                FixedUpdate,
                (apply_commands, step_simulation, sync_body_transforms)
                    .chain()
                    .in_set(SimulationSet),
            );
    }
}

/// Apply queued commands to the engine.
///
/// The configuration is clamped to its input minimums and validated before
/// a start; an invalid one is reported instead of started.
fn apply_commands(
    mut requests: MessageReader<SimulationCommand>,
    mut engine: ResMut<SimulationEngine>,
    config: Res<SimulationConfig>,
    mut logs: MessageWriter<SimulationLog>,
) {
    for request in requests.read() {
        match request {
            SimulationCommand::Start => {
                let config = config.clamped();
                match config.validate() {
                    Ok(()) => {
                        engine.start(&config);
                    }
                    Err(err) => {
                        warn!("Not starting simulation: {err}");
                        logs.write(SimulationLog {
                            text: format!("invalid configuration: {err}"),
                            warning: true,
                        });
                    }
                }
            }
            SimulationCommand::Stop => {
                engine.stop();
            }
            SimulationCommand::Resume => {
                engine.resume();
            }
            SimulationCommand::Reset => engine.reset(),
        }
    }
}

/// Advance the engine by one fixed step scaled by the configured time scale,
/// then forward its events.
fn step_simulation(
    mut engine: ResMut<SimulationEngine>,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
    mut logs: MessageWriter<SimulationLog>,
    mut speeds: MessageWriter<SpeedUpdate>,
) {
    if engine.is_running() {
        let dt = time.timestep().as_secs_f64() * config.time_scale;
        engine.tick(dt);
    }

    for event in engine.drain_events() {
        match event {
            SimulationEvent::Log(text) => {
                logs.write(SimulationLog {
                    text,
                    warning: false,
                });
            }
            SimulationEvent::Warning(text) => {
                logs.write(SimulationLog {
                    text,
                    warning: true,
                });
            }
            SimulationEvent::SpeedUpdated(speed) => {
                speeds.write(SpeedUpdate(speed));
            }
            // Transforms are read straight from the engine
            SimulationEvent::BodiesMoved { .. } => {}
        }
    }
}

/// Copy body positions into their display entities.
///
/// Bodies without a tagged entity are skipped.
fn sync_body_transforms(
    engine: Res<SimulationEngine>,
    mut bodies: Query<(&SimulatedBody, &mut Transform)>,
) {
    let (Some(primary), Some(secondary)) = (engine.primary(), engine.secondary()) else {
        return;
    };

    let (mut primary_seen, mut secondary_seen) = (false, false);
    for (body, mut transform) in bodies.iter_mut() {
        match body {
            SimulatedBody::Primary => {
                primary_seen = true;
                transform.translation = display_position(primary);
            }
            SimulatedBody::Secondary => {
                secondary_seen = true;
                transform.translation = display_position(secondary);
                // Point the ship along its velocity
                let heading = secondary.vel.as_vec3();
                if heading.length_squared() > 0.0 && heading.is_finite() {
                    transform.look_to(heading, Vec3::Z);
                }
            }
        }
    }

    if !primary_seen {
        debug!("No SimulatedBody::Primary entity, primary transform not updated");
    }
    if !secondary_seen {
        debug!("No SimulatedBody::Secondary entity, secondary transform not updated");
    }
}

/// Meters to scene units, narrowed to f32 for rendering.
pub fn display_position(body: &BodyState) -> Vec3 {
    (body.pos * DISPLAY_SCALE).as_vec3()
}
