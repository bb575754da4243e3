use bridge_simulator_core_rs::driver::{spawn, DriverConfig, SimulationHandle};
use bridge_simulator_core_rs::events::ScenarioEvent;
use bridge_simulator_core_rs::{Simulation, SimulationStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Run the driver until the simulation reaches `ticks`, or stdin closes
/// when no tick limit is given
pub async fn run(interval_ms: u64, ticks: Option<usize>) -> anyhow::Result<()> {
    let config = DriverConfig {
        tick_interval_ms: interval_ms,
        ..DriverConfig::default()
    };
    let (handle, task) = spawn(Simulation::default(), config);
    let mut status = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status.borrow_and_update().clone();
                println!("{}", serde_json::to_string(&snapshot)?);
                if reached_limit(&snapshot, ticks) {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => apply_command(&handle, &line).await,
                None => {
                    stdin_open = false;
                    if ticks.is_none() {
                        break;
                    }
                }
            },
        }
    }

    handle.shutdown().await?;
    let simulation = task.await?;
    info!(tick = simulation.current_tick(), cars = simulation.num_cars(), "live session ended");
    Ok(())
}

/// Status updates coalesce when stdout is slow, so the limit is checked
/// against the simulation clock rather than the number of updates seen
fn reached_limit(status: &SimulationStatus, ticks: Option<usize>) -> bool {
    ticks.is_some_and(|limit| status.tick >= limit)
}

/// Commands use the scenario event format, e.g.
/// `{"type":"add_car","car":{"bridgeTime":3,"waitingTime":1,"direction":"left-to-right"}}`
async fn apply_command(handle: &SimulationHandle, line: &str) {
    let command: ScenarioEvent = match serde_json::from_str(line) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "ignoring malformed command");
            return;
        }
    };

    match command {
        ScenarioEvent::AddCar { id: Some(id), car } => match handle.add_car(id.clone(), car).await {
            Ok(()) => info!(car_id = %id, "car added"),
            Err(e) => warn!(car_id = %id, error = %e, "add_car rejected"),
        },
        ScenarioEvent::AddCar { id: None, car } => match handle.join(car).await {
            Ok(id) => info!(car_id = %id, "car added"),
            Err(e) => warn!(error = %e, "add_car rejected"),
        },
        ScenarioEvent::RemoveCar { id } => match handle.remove_car(id.clone()).await {
            Ok(outcome) => info!(car_id = %id, ?outcome, "remove_car"),
            Err(e) => warn!(car_id = %id, error = %e, "remove_car failed"),
        },
    }
}
