//! Scenario events: scripted car arrivals and cancellations
//!
//! A scenario replaces the interactive front-end with a deterministic script:
//! cars join and leave at fixed ticks, and the simulation runs for a fixed
//! number of ticks.

pub mod handler;
pub mod scenario;
pub mod types;

pub use handler::ScenarioEventHandler;
pub use scenario::Scenario;
pub use types::{EventSchedule, ScenarioEvent, ScheduledEvent};
