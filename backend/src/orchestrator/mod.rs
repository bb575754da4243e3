//! Orchestrator - main simulation loop
//!
//! Owns both queues and moves cars between them once per tick.
//!
//! See `engine.rs` for full implementation.

pub mod engine;


// Re-export main types for convenience
pub use engine::{
    CarConfig, RemovalOutcome, Simulation, SimulationConfig, SimulationError, SimulationStatus,
    TickResult, WaitingByDirection,
};
