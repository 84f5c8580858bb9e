//! Headless console mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator. Each
//! line of stdout is a JSON response with `"protocol_version"` and `"type"`
//! fields. See [`simulation::console_protocol`] for the full schema.

use std::io::{BufRead, Write};

use bevy::prelude::*;

use simulation::batches::BatchLedger;
use simulation::chart_data::donut_segments;
use simulation::clock::FacilityClock;
use simulation::console_protocol::{
    make_response, ConsoleCommand, ConsoleResponse, ResponsePayload, PROTOCOL_VERSION,
};
use simulation::facility_actions::{ActionQueue, ActionResult, ActionResultLog, ActionSource};
use simulation::observation_builder::CurrentObservation;
use simulation::reports::{build_report, report_file_name};
use simulation::rewards::allocate_rewards;
use simulation::TickCounter;

pub fn run_console_mode() {
    // -- Build a minimal Bevy App: simulation only, no rendering or UI ------
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(simulation::SimulationPlugin);

    // First update runs Startup (demo seeding); one tick after that fills
    // the observation snapshot before the first `observe`.
    app.update();
    step_app(&mut app, 1);

    // -- I/O setup ----------------------------------------------------------
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    // Send the "ready" message so the client knows we are live.
    let ready = make_response(ResponsePayload::Ready);
    let _ = writeln!(stdout, "{}", serde_json::to_string(&ready).unwrap());
    let _ = stdout.flush();

    // Log to stderr so it does not interfere with the JSON protocol.
    eprintln!("bintdt console v{PROTOCOL_VERSION} ready - waiting for commands on stdin");

    // -- Main command loop --------------------------------------------------
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let cmd: ConsoleCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                let resp = make_response(ResponsePayload::Error {
                    message: format!("Parse error: {e}"),
                });
                let _ = writeln!(stdout, "{}", serde_json::to_string(&resp).unwrap());
                let _ = stdout.flush();
                continue;
            }
        };

        let response = process_command(cmd, &mut app);
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);

        let _ = writeln!(stdout, "{}", serde_json::to_string(&response).unwrap());
        let _ = stdout.flush();

        if is_goodbye {
            break;
        }
    }

    eprintln!("bintdt console shutting down");
}

/// Advance virtual time by the 100 ms fixed step and update, so each call
/// drives exactly one FixedUpdate tick at 1x speed.
fn step_app(app: &mut App, ticks: u64) {
    let dt = std::time::Duration::from_millis(100);
    for _ in 0..ticks {
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .advance_by(dt);
        app.update();
    }
}

/// Queue one action, run a tick so the executor processes it, and return the
/// logged result.
fn run_action(app: &mut App, action: simulation::facility_actions::OperatorAction) -> ActionResult {
    let tick = app.world().resource::<TickCounter>().0;
    app.world_mut()
        .resource_mut::<ActionQueue>()
        .push(tick, ActionSource::Console, action);
    step_app(app, 1);
    app.world()
        .resource::<ActionResultLog>()
        .last_n(1)
        .first()
        .map(|(_, result)| result.clone())
        .unwrap_or(ActionResult::Success)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: ConsoleCommand, app: &mut App) -> ConsoleResponse {
    match cmd {
        ConsoleCommand::Observe => {
            let observation = app
                .world()
                .resource::<CurrentObservation>()
                .observation
                .clone();
            make_response(ResponsePayload::Observation { observation })
        }

        ConsoleCommand::Act { action } => {
            let result = run_action(app, action);
            make_response(ResponsePayload::ActionResult { result })
        }

        ConsoleCommand::BatchAct { actions } => {
            let results = actions
                .into_iter()
                .map(|action| run_action(app, action))
                .collect();
            make_response(ResponsePayload::BatchResult { results })
        }

        ConsoleCommand::Step { ticks } => {
            // Cap to prevent accidental very long blocking loops.
            let n = ticks.min(10_000);
            step_app(app, n);
            let tick = app.world().resource::<TickCounter>().0;
            make_response(ResponsePayload::StepComplete { tick })
        }

        ConsoleCommand::Report { batch_id } => {
            let world = app.world();
            let now = world.resource::<FacilityClock>().now();
            match world.resource::<BatchLedger>().get(&batch_id) {
                Some(batch) => make_response(ResponsePayload::Report {
                    report: build_report(batch, now),
                    file_name: report_file_name(batch, now),
                }),
                None => make_response(ResponsePayload::Error {
                    message: format!("Batch {batch_id} not found"),
                }),
            }
        }

        ConsoleCommand::Rewards { batch_id } => {
            match app.world().resource::<BatchLedger>().get(&batch_id) {
                Some(batch) => make_response(ResponsePayload::Rewards {
                    eligible: batch.status.reward_eligible(),
                    breakdown: allocate_rewards(batch),
                }),
                None => make_response(ResponsePayload::Error {
                    message: format!("Batch {batch_id} not found"),
                }),
            }
        }

        ConsoleCommand::Chart { batch_id } => {
            match app.world().resource::<BatchLedger>().get(&batch_id) {
                Some(batch) => make_response(ResponsePayload::Chart {
                    batch_id: batch.id.clone(),
                    segments: donut_segments(&batch.composition),
                }),
                None => make_response(ResponsePayload::Error {
                    message: format!("Batch {batch_id} not found"),
                }),
            }
        }

        ConsoleCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}
