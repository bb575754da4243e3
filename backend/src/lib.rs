//! Bridge Simulator Core - Rust Engine
//!
//! Single-lane, bidirectional bridge simulation with deterministic,
//! caller-triggered ticks.
//!
//! # Architecture
//!
//! - **core**: Time management
//! - **models**: Domain types (Car, Direction, Event)
//! - **queues**: Waiting queue and bridge queue
//! - **orchestrator**: Per-tick transition logic
//! - **events**: Scripted scenarios
//! - **driver**: Periodic tokio driver that serializes external commands
//!
//! # Critical Invariants
//!
//! 1. A car is in exactly one queue (waiting XOR bridge)
//! 2. Every car on the bridge travels the same direction
//! 3. No car leaves the bridge before a car admitted ahead of it
//! 4. Timers are integer countdowns that never go below zero

// Module declarations
pub mod core;
pub mod driver;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod queues;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use models::{
    car::{Car, CarError, CarId, CarSpec, Direction},
    event::{Event, EventLog},
};
pub use orchestrator::{
    CarConfig, RemovalOutcome, Simulation, SimulationConfig, SimulationError, SimulationStatus,
    TickResult, WaitingByDirection,
};
pub use queues::{BridgeQueue, CarQueue, WaitingQueue};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn bridge_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulation::PyBridgeSimulation>()?;
    Ok(())
}
