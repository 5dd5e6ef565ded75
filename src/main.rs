//! Orbitsim - headless runner
//!
//! Plays a preset scenario for a fixed number of simulation ticks and logs
//! the engine output.
//!
//! Usage: `orbitsim [scenario-id] [ticks]`

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use orbitsim::plugin::{SimulationCommand, SimulationLog, SimulationPlugin, SimulationSet};
use orbitsim::scenarios::{SCENARIOS, find_scenario};

const DEFAULT_TICKS: u32 = 640;

/// Fixed ticks left before the app exits.
#[derive(Resource)]
struct TickBudget(u32);

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));

    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(id) => find_scenario(&id).unwrap_or_else(|| {
            let known: Vec<_> = SCENARIOS.iter().map(|s| s.id).collect();
            warn!("Unknown scenario '{id}', expected one of {known:?}");
            &SCENARIOS[0]
        }),
        None => &SCENARIOS[0],
    };
    let ticks = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    info!("Running scenario '{}' for {} ticks", scenario.id, ticks);

    // One fixed step per frame, as fast as the loop runs
    let timestep = Time::<Fixed>::default().timestep();
    app.insert_resource(scenario.config())
        .insert_resource(TimeUpdateStrategy::ManualDuration(timestep))
        .insert_resource(TickBudget(ticks))
        .add_plugins(SimulationPlugin)
        .add_systems(Startup, |mut commands: MessageWriter<SimulationCommand>| {
            commands.write(SimulationCommand::Start);
        })
        .add_systems(
            FixedUpdate,
            (print_logs, count_ticks).chain().after(SimulationSet),
        );

    app.run();
}

fn print_logs(mut logs: MessageReader<SimulationLog>) {
    for log in logs.read() {
        if log.warning {
            warn!("{}", log.text);
        } else {
            info!("{}", log.text);
        }
    }
}

fn count_ticks(mut budget: ResMut<TickBudget>, mut exit: MessageWriter<AppExit>) {
    budget.0 = budget.0.saturating_sub(1);
    if budget.0 == 0 {
        exit.write(AppExit::Success);
    }
}
