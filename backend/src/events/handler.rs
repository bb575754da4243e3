//! Scenario event execution and scheduling
//!
//! This module handles:
//! - Scheduling events by tick
//! - Validating cars before they reach the simulation
//! - Executing events through the simulation's public operations

use crate::events::types::{ScenarioEvent, ScheduledEvent};
use crate::orchestrator::{Simulation, SimulationError};
use tracing::debug;

/// Handles scenario event scheduling and execution
#[derive(Debug, Clone, Default)]
pub struct ScenarioEventHandler {
    events: Vec<ScheduledEvent>,
}

impl ScenarioEventHandler {
    /// Create a new event handler with the given events
    pub fn new(events: Vec<ScheduledEvent>) -> Self {
        Self { events }
    }

    /// Get all events scheduled for a specific tick, in configuration order
    pub fn get_events_for_tick(&self, tick: usize) -> Vec<&ScenarioEvent> {
        self.events
            .iter()
            .filter(|scheduled| scheduled.schedule.should_execute(tick))
            .map(|scheduled| &scheduled.event)
            .collect()
    }

    /// Execute all events scheduled for the given tick
    ///
    /// Returns the number of events executed. Stops at the first event that
    /// would hand the simulation an invalid car or a duplicate id.
    pub fn execute_tick_events(
        &self,
        simulation: &mut Simulation,
        tick: usize,
    ) -> Result<usize, SimulationError> {
        let events = self.get_events_for_tick(tick);
        let count = events.len();

        for event in events {
            event.execute(simulation)?;
        }

        Ok(count)
    }
}

impl ScenarioEvent {
    /// Execute this event against the simulation
    pub fn execute(&self, simulation: &mut Simulation) -> Result<(), SimulationError> {
        match self {
            ScenarioEvent::AddCar { id, car } => {
                let id = id
                    .clone()
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

                car.validate().map_err(|source| SimulationError::InvalidCar {
                    id: id.clone(),
                    source,
                })?;
                if simulation.contains_car(&id) {
                    return Err(SimulationError::DuplicateCarId(id));
                }

                simulation.add_car(id, *car);
                Ok(())
            }

            ScenarioEvent::RemoveCar { id } => {
                let outcome = simulation.remove_car(id);
                debug!(car_id = %id, ?outcome, "scenario removal");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::EventSchedule;
    use crate::models::car::{CarSpec, Direction};

    fn add(id: Option<&str>, tick: usize) -> ScheduledEvent {
        ScheduledEvent {
            event: ScenarioEvent::AddCar {
                id: id.map(str::to_string),
                car: CarSpec::new(2, 1, Direction::LeftToRight),
            },
            schedule: EventSchedule::OneTime { tick },
        }
    }

    #[test]
    fn test_event_handler_get_events_for_tick() {
        let handler = ScenarioEventHandler::new(vec![add(Some("a"), 10), add(Some("b"), 11)]);

        assert_eq!(handler.get_events_for_tick(10).len(), 1);
        assert_eq!(handler.get_events_for_tick(11).len(), 1);
        assert!(handler.get_events_for_tick(12).is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let handler = ScenarioEventHandler::new(vec![ScheduledEvent {
            event: ScenarioEvent::AddCar {
                id: None,
                car: CarSpec::new(1, 1, Direction::RightToLeft),
            },
            schedule: EventSchedule::Repeating {
                start_tick: 0,
                interval: 1,
            },
        }]);
        let mut sim = Simulation::default();

        handler.execute_tick_events(&mut sim, 0).unwrap();
        handler.execute_tick_events(&mut sim, 1).unwrap();
        assert_eq!(sim.num_cars(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let handler = ScenarioEventHandler::new(vec![add(Some("a"), 0), add(Some("a"), 0)]);
        let mut sim = Simulation::default();

        assert_eq!(
            handler.execute_tick_events(&mut sim, 0),
            Err(SimulationError::DuplicateCarId("a".to_string()))
        );
        assert_eq!(sim.num_cars(), 1);
    }

    #[test]
    fn test_invalid_car_rejected() {
        let event = ScenarioEvent::AddCar {
            id: Some("bad".to_string()),
            car: CarSpec::new(1, 0, Direction::LeftToRight),
        };
        let mut sim = Simulation::default();

        assert!(matches!(
            event.execute(&mut sim),
            Err(SimulationError::InvalidCar { .. })
        ));
        assert_eq!(sim.num_cars(), 0);
    }
}
