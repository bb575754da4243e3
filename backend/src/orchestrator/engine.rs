//! Orchestrator Engine
//!
//! Drives one bridge through discrete ticks:
//! - Waiting and bridge timers
//! - Draining completed crossings to the opposite bank
//! - Admitting the next same-direction batch onto an empty bridge
//! - Cancellation (immediate while waiting, deferred while crossing)
//! - Event logging
//!
//! # Architecture
//!
//! ```text
//! For each tick t:
//! 1. If both queues are empty, only advance the clock
//! 2. Tick waiting timers and bridge timers
//! 3. Drain completed bridge cars → waiting queue, opposite direction
//!    (cars flagged as removed are dropped instead)
//! 4. If the bridge is empty, admit every ready car that shares the
//!    direction of the earliest ready car
//! 5. Advance time
//! ```
//!
//! Admission only ever happens onto an empty bridge, so at most one direction
//! occupies the lane at any time. The exclusion is structural; there is no lock.
//!
//! # Example
//!
//! ```rust
//! use bridge_simulator_core_rs::{CarSpec, Direction, Simulation};
//!
//! let mut sim = Simulation::default();
//! sim.add_car("x", CarSpec::new(3, 1, Direction::LeftToRight));
//!
//! sim.tick(); // x becomes ready and boards in the same step
//! assert_eq!(sim.status().bridge[0].current_bridge_time(), 3);
//!
//! for _ in 0..3 {
//!     sim.tick();
//! }
//! let status = sim.status();
//! assert!(status.bridge.is_empty());
//! assert_eq!(status.waiting_by_direction.right_to_left[0].id(), "x");
//! ```

use crate::core::time::TimeManager;
use crate::models::car::{Car, CarError, CarSpec, Direction};
use crate::models::event::{Event, EventLog};
use crate::queues::{BridgeQueue, CarQueue, WaitingQueue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, trace};

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// All fields have defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Cars present in the waiting queue at tick 0, in insertion order
    #[serde(default)]
    pub cars: Vec<CarConfig>,

    /// Keep an in-memory log of every car event
    #[serde(default = "default_record_events")]
    pub record_events: bool,
}

fn default_record_events() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cars: Vec::new(),
            record_events: default_record_events(),
        }
    }
}

/// A car present when the simulation starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarConfig {
    pub id: String,
    #[serde(flatten)]
    pub spec: CarSpec,
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid car {id}: {source}")]
    InvalidCar {
        id: String,
        #[source]
        source: CarError,
    },

    #[error("Duplicate car ID: {0}")]
    DuplicateCarId(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Results
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Tick number that was executed
    pub tick: usize,

    /// Both queues were empty; nothing moved
    pub idle: bool,

    /// Cars admitted onto the bridge this tick
    pub num_boarded: usize,

    /// Cars that completed a crossing and re-entered the waiting queue
    pub num_crossed: usize,

    /// Cars flagged as removed that completed a crossing and were dropped
    pub num_discarded: usize,

    /// Waiting queue size after the tick
    pub waiting_size: usize,

    /// Bridge queue size after the tick
    pub bridge_size: usize,
}

/// What `remove_car` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// Car was waiting and is gone
    Removed,
    /// Car is crossing; it leaves when the crossing completes
    Deferred,
    /// No active car with that id
    NotFound,
}

/// Waiting cars split by bank
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingByDirection {
    pub left_to_right: Vec<Car>,
    pub right_to_left: Vec<Car>,
}

impl WaitingByDirection {
    pub fn get(&self, direction: Direction) -> &[Car] {
        match direction {
            Direction::LeftToRight => &self.left_to_right,
            Direction::RightToLeft => &self.right_to_left,
        }
    }
}

/// Read-only snapshot for external reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStatus {
    /// Tick count when the snapshot was taken
    pub tick: usize,
    pub waiting_by_direction: WaitingByDirection,
    /// Bridge contents in admission order
    pub bridge: Vec<Car>,
}

impl SimulationStatus {
    /// Every car in the snapshot, waiting cars first
    pub fn all_cars(&self) -> impl Iterator<Item = &Car> {
        self.waiting_by_direction
            .left_to_right
            .iter()
            .chain(self.waiting_by_direction.right_to_left.iter())
            .chain(self.bridge.iter())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.all_cars().any(|car| car.id() == id)
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Single-bridge simulation state and tick loop
///
/// The simulation is a plain value with no global state: create as many
/// independent instances as needed. It assumes its input is valid (unique
/// ids, times ≥ 1); see [`CarSpec::validate`] for the caller-side check.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Cars on either bank
    waiting_queue: WaitingQueue,

    /// Cars on the lane
    bridge_queue: BridgeQueue,

    /// Time management
    time_manager: TimeManager,

    /// Event log (all car events)
    event_log: EventLog,

    record_events: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            waiting_queue: WaitingQueue::new(),
            bridge_queue: BridgeQueue::new(),
            time_manager: TimeManager::new(),
            event_log: EventLog::new(),
            record_events: true,
        }
    }
}

impl Simulation {
    /// Create a simulation from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Simulation)` - Initial cars are in the waiting queue
    /// * `Err(SimulationError)` - A car is invalid or an id is repeated
    ///
    /// # Example
    ///
    /// ```rust
    /// use bridge_simulator_core_rs::{CarConfig, CarSpec, Direction, Simulation, SimulationConfig};
    ///
    /// let config = SimulationConfig {
    ///     cars: vec![CarConfig {
    ///         id: "a".to_string(),
    ///         spec: CarSpec::new(2, 1, Direction::LeftToRight),
    ///     }],
    ///     record_events: true,
    /// };
    ///
    /// let sim = Simulation::new(config).unwrap();
    /// assert_eq!(sim.num_cars(), 1);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let mut simulation = Self {
            record_events: config.record_events,
            ..Self::default()
        };
        for car in config.cars {
            simulation.add_car(car.id, car.spec);
        }

        Ok(simulation)
    }

    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        let mut ids = HashSet::new();
        for car in &config.cars {
            if car.id.is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "car id must not be empty".to_string(),
                ));
            }
            car.spec
                .validate()
                .map_err(|source| SimulationError::InvalidCar {
                    id: car.id.clone(),
                    source,
                })?;
            if !ids.insert(car.id.as_str()) {
                return Err(SimulationError::DuplicateCarId(car.id.clone()));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current tick number
    pub fn current_tick(&self) -> usize {
        self.time_manager.current_tick()
    }

    pub fn time_manager(&self) -> &TimeManager {
        &self.time_manager
    }

    pub fn waiting_queue(&self) -> &WaitingQueue {
        &self.waiting_queue
    }

    pub fn bridge_queue(&self) -> &BridgeQueue {
        &self.bridge_queue
    }

    /// Get reference to event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Both queues are empty
    pub fn is_idle(&self) -> bool {
        self.waiting_queue.is_empty() && self.bridge_queue.is_empty()
    }

    /// Active cars across both queues
    pub fn num_cars(&self) -> usize {
        self.waiting_queue.len() + self.bridge_queue.len()
    }

    /// Whether an active car uses this id
    pub fn contains_car(&self, id: &str) -> bool {
        self.waiting_queue.contains(id) || self.bridge_queue.contains(id)
    }

    /// Find an active car in either queue
    pub fn get_car(&self, id: &str) -> Option<&Car> {
        self.waiting_queue
            .get(id)
            .or_else(|| self.bridge_queue.get(id))
    }

    fn log_event(&mut self, event: Event) {
        if self.record_events {
            self.event_log.log(event);
        }
    }

    // ========================================================================
    // External operations
    // ========================================================================

    /// Enqueue a new car in the waiting queue
    ///
    /// No validation is performed: the caller guarantees `id` is unique among
    /// active cars and that both `CarSpec` times are at least 1.
    pub fn add_car(&mut self, id: impl Into<String>, spec: CarSpec) {
        let car = Car::new(id, spec);
        debug!(car_id = car.id(), direction = %spec.direction, "car added");

        self.log_event(Event::CarArrived {
            tick: self.current_tick(),
            car_id: car.id().to_string(),
            direction: spec.direction,
            bridge_time: spec.bridge_time,
            waiting_time: spec.waiting_time,
        });
        self.waiting_queue.add(car);
    }

    /// Cancel a car
    ///
    /// A waiting car is removed at once. A crossing car is only flagged and
    /// is dropped when its crossing completes. Unknown ids are ignored.
    pub fn remove_car(&mut self, id: &str) -> RemovalOutcome {
        let tick = self.current_tick();

        if self.waiting_queue.remove_by_id(id) {
            info!(car_id = id, "waiting car removed");
            self.log_event(Event::CarRemoved {
                tick,
                car_id: id.to_string(),
            });
            return RemovalOutcome::Removed;
        }

        let already_marked = self.bridge_queue.get(id).map(|car| car.is_removed());
        match already_marked {
            Some(true) => RemovalOutcome::Deferred,
            Some(false) => {
                self.bridge_queue.mark_car_as_removed(id);
                info!(car_id = id, "crossing car marked for removal");
                self.log_event(Event::RemovalDeferred {
                    tick,
                    car_id: id.to_string(),
                });
                RemovalOutcome::Deferred
            }
            None => {
                debug!(car_id = id, "remove requested for unknown car");
                RemovalOutcome::NotFound
            }
        }
    }

    /// Snapshot of every active car
    ///
    /// Never mutates state.
    pub fn status(&self) -> SimulationStatus {
        SimulationStatus {
            tick: self.current_tick(),
            waiting_by_direction: WaitingByDirection {
                left_to_right: self.waiting_queue.cars_by_direction(Direction::LeftToRight),
                right_to_left: self.waiting_queue.cars_by_direction(Direction::RightToLeft),
            },
            bridge: self.bridge_queue.cars().to_vec(),
        }
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// The step runs to completion before returning; callers that share a
    /// simulation across tasks must serialize `add_car`/`remove_car` against
    /// it (see [`crate::driver`]).
    pub fn tick(&mut self) -> TickResult {
        let tick = self.current_tick();

        // STEP 1: IDLE CHECK
        if self.is_idle() {
            trace!(tick, "idle tick");
            self.time_manager.advance_idle_tick();
            return TickResult {
                tick,
                idle: true,
                ..TickResult::default()
            };
        }

        // STEP 2: TIMERS
        self.waiting_queue.tick();
        self.bridge_queue.tick();

        // STEP 3: DRAIN BRIDGE → WAITING
        let (num_crossed, num_discarded) = self.move_bridge_cars(tick);

        // STEP 4: ADMIT WAITING → BRIDGE
        let num_boarded = self.move_cars_to_bridge(tick);

        // STEP 5: ADVANCE TIME
        self.time_manager.advance_tick();

        debug_assert!(
            self.validate_state().is_ok(),
            "tick {tick} broke an invariant: {:?}",
            self.validate_state()
        );

        let result = TickResult {
            tick,
            idle: false,
            num_boarded,
            num_crossed,
            num_discarded,
            waiting_size: self.waiting_queue.len(),
            bridge_size: self.bridge_queue.len(),
        };
        debug!(
            tick,
            boarded = num_boarded,
            crossed = num_crossed,
            discarded = num_discarded,
            waiting = result.waiting_size,
            bridge = result.bridge_size,
            "tick complete"
        );
        result
    }

    /// Move completed crossings back to the waiting queue, reversed
    ///
    /// Returns (crossed, discarded).
    fn move_bridge_cars(&mut self, tick: usize) -> (usize, usize) {
        let completed = self.bridge_queue.completed_cars();
        let Some(first) = completed.first() else {
            return (0, 0);
        };
        let new_direction = first.direction().opposite();

        self.bridge_queue.remove_many(&completed);

        let mut crossed = 0;
        let mut discarded = 0;
        for mut car in completed {
            if car.is_removed() {
                info!(tick, car_id = car.id(), "removed car left the bridge");
                self.log_event(Event::CarDiscarded {
                    tick,
                    car_id: car.id().to_string(),
                });
                discarded += 1;
                continue;
            }

            car.set_direction(new_direction);
            info!(tick, car_id = car.id(), direction = %new_direction, "car crossed");
            self.log_event(Event::CarCrossed {
                tick,
                car_id: car.id().to_string(),
                new_direction,
            });
            self.waiting_queue.add(car);
            crossed += 1;
        }

        (crossed, discarded)
    }

    /// Admit the next batch of ready cars onto an empty bridge
    ///
    /// Returns the number of cars admitted.
    fn move_cars_to_bridge(&mut self, tick: usize) -> usize {
        if !self.bridge_queue.is_empty() {
            return 0;
        }

        let Some(direction) = self
            .waiting_queue
            .next_car_to_cross()
            .map(|car| car.direction())
        else {
            return 0;
        };

        let batch = self.waiting_queue.cars_to_cross(Some(direction));
        self.waiting_queue.remove_many(&batch);
        let num_boarded = batch.len();
        self.bridge_queue.add_many(batch);

        let boarded: Vec<Event> = self
            .bridge_queue
            .cars()
            .iter()
            .map(|car| {
                info!(
                    tick,
                    car_id = car.id(),
                    direction = %direction,
                    bridge_time = car.current_bridge_time(),
                    "car boarded"
                );
                Event::CarBoarded {
                    tick,
                    car_id: car.id().to_string(),
                    direction,
                    effective_bridge_time: car.current_bridge_time(),
                }
            })
            .collect();
        for event in boarded {
            self.log_event(event);
        }

        num_boarded
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check the structural invariants of both queues
    ///
    /// A failure here is a bug in the engine, not a caller error.
    pub fn validate_state(&self) -> Result<(), SimulationError> {
        let violation = |msg: String| Err(SimulationError::InvariantViolation(msg));

        let mut ids = HashSet::new();
        for car in self
            .waiting_queue
            .cars()
            .iter()
            .chain(self.bridge_queue.cars())
        {
            if !ids.insert(car.id()) {
                return violation(format!("car {} is queued twice", car.id()));
            }
        }

        for pair in self.waiting_queue.cars().windows(2) {
            if pair[0].current_waiting_time() > pair[1].current_waiting_time() {
                return violation(format!(
                    "waiting queue out of order: {} before {}",
                    pair[0].id(),
                    pair[1].id()
                ));
            }
        }
        for car in self.waiting_queue.cars() {
            if car.is_crossing() || car.is_removed() {
                return violation(format!("waiting car {} has bridge flags set", car.id()));
            }
        }

        if let Some(direction) = self.bridge_queue.direction() {
            if let Some(car) = self
                .bridge_queue
                .cars()
                .iter()
                .find(|car| car.direction() != direction)
            {
                return violation(format!(
                    "car {} travels {} while the bridge is {}",
                    car.id(),
                    car.direction(),
                    direction
                ));
            }
        }
        for pair in self.bridge_queue.cars().windows(2) {
            if pair[0].current_bridge_time() > pair[1].current_bridge_time() {
                return violation(format!(
                    "car {} would overtake {}",
                    pair[1].id(),
                    pair[0].id()
                ));
            }
        }
        if let Some(car) = self.bridge_queue.cars().iter().find(|car| !car.is_crossing()) {
            return violation(format!("bridge car {} is not marked crossing", car.id()));
        }

        Ok(())
    }
}
