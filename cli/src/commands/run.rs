use anyhow::Context;
use bridge_simulator_core_rs::events::Scenario;
use serde_json::json;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn run(path: &Path, ticks: Option<usize>, print_events: bool) -> anyhow::Result<()> {
    let mut scenario = Scenario::from_path(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    if let Some(ticks) = ticks {
        scenario.ticks = ticks;
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error = None;

    let simulation = scenario.run(|result, simulation| {
        if write_error.is_some() {
            return;
        }
        let line = json!({
            "tick": result.tick,
            "result": result,
            "status": simulation.status(),
        });
        if let Err(e) = writeln!(out, "{}", line) {
            write_error = Some(e);
        }
    })?;

    if let Some(e) = write_error {
        return Err(e).context("failed to write tick output");
    }

    if print_events {
        let line = json!({ "events": simulation.event_log().events() });
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    info!(
        ticks = simulation.current_tick(),
        active_cars = simulation.num_cars(),
        events = simulation.event_log().len(),
        "scenario finished"
    );
    Ok(())
}
