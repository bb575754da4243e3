//! Car model
//!
//! A car carries two kinds of fields:
//! - Intent, fixed at creation: id, bridge time, waiting time
//! - Simulation state, mutated by the queues: direction, remaining timers,
//!   crossing and removal flags
//!
//! Timers are plain tick countdowns and never go below zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier assigned by the caller when a car joins the simulation
pub type CarId = String;

/// Direction of travel across the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// The direction a car travels after it has crossed
    ///
    /// # Example
    /// ```
    /// use bridge_simulator_core_rs::Direction;
    ///
    /// assert_eq!(Direction::LeftToRight.opposite(), Direction::RightToLeft);
    /// assert_eq!(Direction::RightToLeft.opposite(), Direction::LeftToRight);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
        }
    }

    /// Both directions, left-to-right first
    pub fn all() -> [Direction; 2] {
        [Direction::LeftToRight, Direction::RightToLeft]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::LeftToRight => write!(f, "left-to-right"),
            Direction::RightToLeft => write!(f, "right-to-left"),
        }
    }
}

impl FromStr for Direction {
    type Err = CarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left-to-right" => Ok(Direction::LeftToRight),
            "right-to-left" => Ok(Direction::RightToLeft),
            other => Err(CarError::InvalidDirection(other.to_string())),
        }
    }
}

/// Errors raised when validating a car specification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarError {
    #[error("bridge_time must be at least 1 (got {0})")]
    InvalidBridgeTime(u32),

    #[error("waiting_time must be at least 1 (got {0})")]
    InvalidWaitingTime(u32),

    #[error("unknown direction '{0}' (expected left-to-right or right-to-left)")]
    InvalidDirection(String),
}

/// What a caller supplies when adding a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSpec {
    /// Ticks needed to cross the bridge
    pub bridge_time: u32,

    /// Ticks to wait on either side before becoming eligible to cross
    pub waiting_time: u32,

    /// Initial direction of travel
    pub direction: Direction,
}

impl CarSpec {
    pub fn new(bridge_time: u32, waiting_time: u32, direction: Direction) -> Self {
        Self {
            bridge_time,
            waiting_time,
            direction,
        }
    }

    /// Check the numeric minimums
    ///
    /// The simulation itself trusts its input; callers that accept cars from
    /// outside (driver, scenario files, bindings) run this first.
    ///
    /// # Example
    /// ```
    /// use bridge_simulator_core_rs::{CarError, CarSpec, Direction};
    ///
    /// assert!(CarSpec::new(3, 1, Direction::LeftToRight).validate().is_ok());
    /// assert_eq!(
    ///     CarSpec::new(0, 1, Direction::LeftToRight).validate(),
    ///     Err(CarError::InvalidBridgeTime(0))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), CarError> {
        if self.bridge_time < 1 {
            return Err(CarError::InvalidBridgeTime(self.bridge_time));
        }
        if self.waiting_time < 1 {
            return Err(CarError::InvalidWaitingTime(self.waiting_time));
        }
        Ok(())
    }
}

/// A car taking part in the simulation
///
/// # Example
/// ```
/// use bridge_simulator_core_rs::{Car, CarSpec, Direction};
///
/// let car = Car::new("car-1", CarSpec::new(3, 2, Direction::LeftToRight));
/// assert_eq!(car.current_waiting_time(), 2);
/// assert_eq!(car.current_bridge_time(), 0);
/// assert!(!car.is_crossing());
/// assert!(!car.is_removed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    id: CarId,

    /// Fixed crossing duration
    bridge_time: u32,

    /// Fixed base wait before eligibility
    waiting_time: u32,

    direction: Direction,

    /// Remaining ticks until this car leaves the bridge
    current_bridge_time: u32,

    /// Remaining ticks until this car may cross
    current_waiting_time: u32,

    /// True while the car is in the bridge queue
    is_crossing: bool,

    /// Cancellation requested while the car was on the bridge
    is_removed: bool,
}

impl Car {
    /// Create a car in its initial waiting state
    pub fn new(id: impl Into<CarId>, spec: CarSpec) -> Self {
        Self {
            id: id.into(),
            bridge_time: spec.bridge_time,
            waiting_time: spec.waiting_time,
            direction: spec.direction,
            current_bridge_time: 0,
            current_waiting_time: spec.waiting_time,
            is_crossing: false,
            is_removed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bridge_time(&self) -> u32 {
        self.bridge_time
    }

    pub fn waiting_time(&self) -> u32 {
        self.waiting_time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_bridge_time(&self) -> u32 {
        self.current_bridge_time
    }

    pub fn current_waiting_time(&self) -> u32 {
        self.current_waiting_time
    }

    pub fn is_crossing(&self) -> bool {
        self.is_crossing
    }

    pub fn is_removed(&self) -> bool {
        self.is_removed
    }

    /// Ready cars may be admitted to the bridge
    pub fn is_ready(&self) -> bool {
        self.current_waiting_time == 0
    }

    /// The specification this car was created from, with its current direction
    pub fn spec(&self) -> CarSpec {
        CarSpec::new(self.bridge_time, self.waiting_time, self.direction)
    }

    // ========================================================================
    // Queue-side mutation
    // ========================================================================

    pub(crate) fn enter_waiting(&mut self) {
        self.current_waiting_time = self.waiting_time;
        self.is_crossing = false;
    }

    pub(crate) fn enter_bridge(&mut self, effective_bridge_time: u32) {
        self.current_bridge_time = effective_bridge_time;
        self.is_crossing = true;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn mark_removed(&mut self) {
        self.is_removed = true;
    }

    pub(crate) fn tick_waiting(&mut self) {
        self.current_waiting_time = self.current_waiting_time.saturating_sub(1);
    }

    pub(crate) fn tick_bridge(&mut self) {
        self.current_bridge_time = self.current_bridge_time.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_floor_at_zero() {
        let mut car = Car::new("a", CarSpec::new(1, 1, Direction::LeftToRight));
        for _ in 0..5 {
            car.tick_waiting();
            car.tick_bridge();
        }
        assert_eq!(car.current_waiting_time(), 0);
        assert_eq!(car.current_bridge_time(), 0);
    }

    #[test]
    fn test_enter_waiting_resets_timer() {
        let mut car = Car::new("a", CarSpec::new(2, 4, Direction::LeftToRight));
        car.tick_waiting();
        car.tick_waiting();
        car.enter_bridge(2);
        assert!(car.is_crossing());

        car.enter_waiting();
        assert_eq!(car.current_waiting_time(), 4);
        assert!(!car.is_crossing());
    }

    #[test]
    fn test_invalid_waiting_time_rejected() {
        let spec = CarSpec::new(1, 0, Direction::RightToLeft);
        assert_eq!(spec.validate(), Err(CarError::InvalidWaitingTime(0)));
    }

    #[test]
    fn test_wire_format() {
        let car = Car::new("x", CarSpec::new(3, 1, Direction::LeftToRight));
        let json = serde_json::to_value(&car).unwrap();

        assert_eq!(json["direction"], "left-to-right");
        assert_eq!(json["bridgeTime"], 3);
        assert_eq!(json["currentWaitingTime"], 1);
        assert_eq!(json["isCrossing"], false);
        assert_eq!(json["isRemoved"], false);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("right-to-left".parse(), Ok(Direction::RightToLeft));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(CarError::InvalidDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_malformed_direction_rejected() {
        let json = r#"{"bridgeTime": 1, "waitingTime": 1, "direction": "up"}"#;
        assert!(serde_json::from_str::<CarSpec>(json).is_err());
    }
}
