//! Scenario files
//!
//! A scenario bundles the initial configuration, the scripted events and the
//! run length:
//!
//! ```json
//! {
//!   "ticks": 20,
//!   "simulation": {
//!     "cars": [{"id": "x", "bridgeTime": 5, "waitingTime": 1, "direction": "left-to-right"}]
//!   },
//!   "events": [
//!     {"event": {"type": "remove_car", "id": "x"}, "schedule": {"tick": 3}}
//!   ]
//! }
//! ```

use crate::events::handler::ScenarioEventHandler;
use crate::events::types::{EventSchedule, ScheduledEvent};
use crate::orchestrator::{Simulation, SimulationConfig, SimulationError, TickResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A complete scripted run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Number of ticks to execute
    pub ticks: usize,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub events: Vec<ScheduledEvent>,
}

impl Scenario {
    /// Parse and validate a scenario from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let scenario: Scenario = serde_json::from_str(json)
            .map_err(|e| SimulationError::SerializationError(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read, parse and validate a scenario file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Scenario(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), SimulationError> {
        for scheduled in &self.events {
            if let EventSchedule::Repeating { interval: 0, .. } = scheduled.schedule {
                return Err(SimulationError::Scenario(
                    "repeating schedule interval must be > 0".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Run the scenario to completion
    ///
    /// Scheduled events for tick `t` are applied just before tick `t`
    /// executes. `on_tick` sees every tick result together with the
    /// simulation state after that tick.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bridge_simulator_core_rs::events::Scenario;
    ///
    /// let scenario = Scenario::from_json_str(r#"{
    ///     "ticks": 3,
    ///     "events": [{
    ///         "event": {"type": "add_car", "id": "x",
    ///                   "car": {"bridgeTime": 2, "waitingTime": 1, "direction": "left-to-right"}},
    ///         "schedule": {"tick": 1}
    ///     }]
    /// }"#).unwrap();
    ///
    /// let mut boarded = 0;
    /// let sim = scenario.run(|result, _| boarded += result.num_boarded).unwrap();
    /// assert_eq!(boarded, 1);
    /// assert_eq!(sim.current_tick(), 3);
    /// ```
    pub fn run<F>(&self, mut on_tick: F) -> Result<Simulation, SimulationError>
    where
        F: FnMut(&TickResult, &Simulation),
    {
        let mut simulation = Simulation::new(self.simulation.clone())?;
        let handler = ScenarioEventHandler::new(self.events.clone());

        info!(
            ticks = self.ticks,
            initial_cars = simulation.num_cars(),
            scheduled_events = self.events.len(),
            "running scenario"
        );

        for _ in 0..self.ticks {
            let tick = simulation.current_tick();
            handler.execute_tick_events(&mut simulation, tick)?;
            let result = simulation.tick();
            on_tick(&result, &simulation);
        }

        Ok(simulation)
    }
}
