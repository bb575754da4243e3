//! Event logging for simulation replay and auditing.
//!
//! Every car state change the simulation performs is captured as an [`Event`]:
//! - **Arrival**: a car joins the waiting queue
//! - **Removal**: a waiting car is cancelled, or a crossing car is marked
//! - **Boarding**: a ready car is admitted to the bridge
//! - **Crossing**: a car leaves the bridge and waits on the other side
//! - **Discard**: a marked car leaves the bridge and the simulation
//!
//! # Example
//!
//! ```rust
//! use bridge_simulator_core_rs::{Direction, Event};
//!
//! let event = Event::CarBoarded {
//!     tick: 4,
//!     car_id: "car-7".to_string(),
//!     direction: Direction::LeftToRight,
//!     effective_bridge_time: 5,
//! };
//!
//! assert_eq!(event.tick(), 4);
//! assert_eq!(event.car_id(), "car-7");
//! ```

use crate::models::car::Direction;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Car entered the waiting queue for the first time
    CarArrived {
        tick: usize,
        car_id: String,
        direction: Direction,
        bridge_time: u32,
        waiting_time: u32,
    },

    /// Waiting car removed immediately
    CarRemoved { tick: usize, car_id: String },

    /// Crossing car marked; it leaves once its crossing completes
    RemovalDeferred { tick: usize, car_id: String },

    /// Ready car admitted to the bridge
    CarBoarded {
        tick: usize,
        car_id: String,
        direction: Direction,
        effective_bridge_time: u32,
    },

    /// Car completed its crossing and now waits on the other side
    CarCrossed {
        tick: usize,
        car_id: String,
        new_direction: Direction,
    },

    /// Marked car completed its crossing and was dropped
    CarDiscarded { tick: usize, car_id: String },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::CarArrived { tick, .. }
            | Event::CarRemoved { tick, .. }
            | Event::RemovalDeferred { tick, .. }
            | Event::CarBoarded { tick, .. }
            | Event::CarCrossed { tick, .. }
            | Event::CarDiscarded { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CarArrived { .. } => "CarArrived",
            Event::CarRemoved { .. } => "CarRemoved",
            Event::RemovalDeferred { .. } => "RemovalDeferred",
            Event::CarBoarded { .. } => "CarBoarded",
            Event::CarCrossed { .. } => "CarCrossed",
            Event::CarDiscarded { .. } => "CarDiscarded",
        }
    }

    /// Get the car this event relates to
    pub fn car_id(&self) -> &str {
        match self {
            Event::CarArrived { car_id, .. }
            | Event::CarRemoved { car_id, .. }
            | Event::RemovalDeferred { car_id, .. }
            | Event::CarBoarded { car_id, .. }
            | Event::CarCrossed { car_id, .. }
            | Event::CarDiscarded { car_id, .. } => car_id,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific car
    pub fn events_for_car(&self, car_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.car_id() == car_id)
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
