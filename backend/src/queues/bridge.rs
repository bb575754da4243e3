//! Bridge queue
//!
//! Holds the cars physically on the single lane, in admission order. The
//! queue is never re-sorted.
//!
//! # No-overtake discipline
//!
//! A car cannot leave the bridge before the car ahead of it. On admission its
//! remaining crossing time is therefore the larger of its own bridge time and
//! the remaining time of the last car already queued:
//!
//! ```text
//! admitted:   X(bridge=5)  Y(bridge=2)  Z(bridge=7)
//! effective:  5            5            7
//! ```
//!
//! # Deferred removal
//!
//! Cancelling a car that is already crossing only flags it. The car keeps its
//! slot and keeps ticking; the orchestrator drops it instead of sending it
//! back to the waiting queue once it completes.

use super::CarQueue;
use crate::models::car::{Car, Direction};

/// Cars currently crossing
#[derive(Debug, Clone, Default)]
pub struct BridgeQueue {
    cars: Vec<Car>,
}

impl BridgeQueue {
    pub fn new() -> Self {
        Self { cars: Vec::new() }
    }

    /// Crossing time a car would get if admitted now
    ///
    /// # Example
    ///
    /// ```rust
    /// use bridge_simulator_core_rs::queues::{BridgeQueue, CarQueue};
    /// use bridge_simulator_core_rs::{Car, CarSpec, Direction};
    ///
    /// let mut bridge = BridgeQueue::new();
    /// let slow = Car::new("x", CarSpec::new(5, 1, Direction::LeftToRight));
    /// let fast = Car::new("y", CarSpec::new(2, 1, Direction::LeftToRight));
    ///
    /// assert_eq!(bridge.estimated_bridge_time(&slow), 5);
    /// bridge.add(slow);
    /// assert_eq!(bridge.estimated_bridge_time(&fast), 5);
    /// ```
    pub fn estimated_bridge_time(&self, car: &Car) -> u32 {
        match self.cars.last() {
            Some(last) => car.bridge_time().max(last.current_bridge_time()),
            None => car.bridge_time(),
        }
    }

    /// Cars whose crossing has completed
    pub fn completed_cars(&self) -> Vec<Car> {
        self.cars
            .iter()
            .filter(|car| car.current_bridge_time() == 0)
            .cloned()
            .collect()
    }

    /// Remove every listed car; absent cars are ignored
    pub fn remove_many(&mut self, cars: &[Car]) {
        if cars.is_empty() {
            return;
        }
        self.cars
            .retain(|queued| !cars.iter().any(|car| car.id() == queued.id()));
    }

    /// Flag a crossing car for removal without freeing its slot
    ///
    /// Returns `false` if no such car is on the bridge.
    pub fn mark_car_as_removed(&mut self, id: &str) -> bool {
        match self.cars.iter_mut().find(|car| car.id() == id) {
            Some(car) => {
                car.mark_removed();
                true
            }
            None => false,
        }
    }

    /// Direction of the cars on the bridge, if any
    pub fn direction(&self) -> Option<Direction> {
        self.cars.first().map(|car| car.direction())
    }
}

impl CarQueue for BridgeQueue {
    fn add(&mut self, mut car: Car) {
        let effective = self.estimated_bridge_time(&car);
        car.enter_bridge(effective);
        self.cars.push(car);
    }

    fn tick(&mut self) {
        for car in &mut self.cars {
            car.tick_bridge();
        }
    }

    fn cars(&self) -> &[Car] {
        &self.cars
    }
}
