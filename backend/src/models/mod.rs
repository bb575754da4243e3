//! Domain models for the bridge simulator

pub mod car;
pub mod event;

// Re-exports
pub use car::{Car, CarError, CarId, CarSpec, Direction};
pub use event::{Event, EventLog};
