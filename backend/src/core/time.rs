//! Time management for the simulation
//!
//! The simulation operates in discrete, caller-triggered ticks. There is no
//! wall clock inside the core: every wait is an integer countdown.

use serde::{Deserialize, Serialize};

/// Counts simulation ticks since start
///
/// # Example
/// ```
/// use bridge_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_tick(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Ticks on which both queues were empty
    idle_ticks: usize,
}

impl TimeManager {
    /// Create a new TimeManager at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Advance time by one tick on which nothing moved
    ///
    /// # Example
    /// ```
    /// use bridge_simulator_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new();
    /// time.advance_idle_tick();
    /// time.advance_tick();
    /// assert_eq!(time.current_tick(), 2);
    /// assert_eq!(time.idle_ticks(), 1);
    /// ```
    pub fn advance_idle_tick(&mut self) {
        self.idle_ticks += 1;
        self.advance_tick();
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Number of idle ticks since start
    pub fn idle_ticks(&self) -> usize {
        self.idle_ticks
    }

    /// Number of ticks on which the queues were advanced
    pub fn active_ticks(&self) -> usize {
        self.current_tick - self.idle_ticks
    }
}
