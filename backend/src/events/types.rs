//! Scenario event types
//!
//! Events are configured in JSON and executed at specific ticks, before the
//! tick itself runs. All executions go through the simulation's public
//! operations, so they show up in its event log like any other change.

use crate::models::car::CarSpec;
use serde::{Deserialize, Serialize};

/// A scripted change to the set of active cars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// A car joins the waiting queue
    ///
    /// Without an `id`, a fresh UUID is assigned on each execution.
    AddCar {
        #[serde(default)]
        id: Option<String>,
        car: CarSpec,
    },

    /// A car is cancelled (immediately if waiting, on completion if crossing)
    RemoveCar { id: String },
}

/// When to execute a scenario event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventSchedule {
    /// Execute at regular intervals starting from start_tick
    Repeating { start_tick: usize, interval: usize },

    /// Execute once at a specific tick
    OneTime { tick: usize },
}

impl EventSchedule {
    /// Check if this schedule triggers at the given tick
    ///
    /// A repeating schedule with a zero interval never triggers.
    pub fn should_execute(&self, tick: usize) -> bool {
        match self {
            EventSchedule::OneTime { tick: event_tick } => tick == *event_tick,
            EventSchedule::Repeating {
                start_tick,
                interval,
            } => *interval > 0 && tick >= *start_tick && (tick - start_tick) % interval == 0,
        }
    }
}

/// A scenario event paired with its schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub event: ScenarioEvent,
    pub schedule: EventSchedule,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::car::Direction;

    #[test]
    fn test_one_time_schedule() {
        let schedule = EventSchedule::OneTime { tick: 10 };

        assert!(!schedule.should_execute(9));
        assert!(schedule.should_execute(10));
        assert!(!schedule.should_execute(11));
    }

    #[test]
    fn test_repeating_schedule() {
        let schedule = EventSchedule::Repeating {
            start_tick: 10,
            interval: 5,
        };

        assert!(!schedule.should_execute(9));
        assert!(schedule.should_execute(10));
        assert!(!schedule.should_execute(11));
        assert!(schedule.should_execute(15));
        assert!(schedule.should_execute(20));
        assert!(!schedule.should_execute(22));
    }

    #[test]
    fn test_zero_interval_never_fires() {
        let schedule = EventSchedule::Repeating {
            start_tick: 0,
            interval: 0,
        };
        assert!(!schedule.should_execute(0));
        assert!(!schedule.should_execute(7));
    }

    #[test]
    fn test_deserialize_add_car() {
        let json = r#"{
            "event": {
                "type": "add_car",
                "car": {"bridgeTime": 3, "waitingTime": 1, "direction": "left-to-right"}
            },
            "schedule": {"tick": 2}
        }"#;
        let scheduled: ScheduledEvent = serde_json::from_str(json).unwrap();

        assert_eq!(scheduled.schedule, EventSchedule::OneTime { tick: 2 });
        assert_eq!(
            scheduled.event,
            ScenarioEvent::AddCar {
                id: None,
                car: CarSpec::new(3, 1, Direction::LeftToRight),
            }
        );
    }

    #[test]
    fn test_deserialize_repeating_schedule() {
        let json = r#"{"start_tick": 1, "interval": 4}"#;
        let schedule: EventSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(
            schedule,
            EventSchedule::Repeating {
                start_tick: 1,
                interval: 4
            }
        );
    }
}
