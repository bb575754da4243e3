//! Car queues
//!
//! Two queues hold every active car:
//! - [`WaitingQueue`]: cars on either bank, ordered by remaining wait
//! - [`BridgeQueue`]: cars on the single lane, in admission order
//!
//! A car lives in exactly one of them at a time. Both implement the
//! [`CarQueue`] contract the orchestrator drives each tick; queue-specific
//! operations (readiness lookup, completion, deferred removal) stay on the
//! concrete types.

pub mod bridge;
pub mod waiting;

pub use bridge::BridgeQueue;
pub use waiting::WaitingQueue;

use crate::models::car::Car;

/// Capabilities shared by both queues
///
/// # Example
///
/// ```rust
/// use bridge_simulator_core_rs::queues::{CarQueue, WaitingQueue};
/// use bridge_simulator_core_rs::{Car, CarSpec, Direction};
///
/// let mut queue = WaitingQueue::new();
/// queue.add_many(vec![
///     Car::new("a", CarSpec::new(1, 2, Direction::LeftToRight)),
///     Car::new("b", CarSpec::new(1, 1, Direction::RightToLeft)),
/// ]);
///
/// queue.tick();
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.cars()[0].id(), "b");
/// ```
pub trait CarQueue {
    /// Insert a car, resetting whatever timer this queue owns
    fn add(&mut self, car: Car);

    /// Insert cars one by one, in the given order
    ///
    /// Order matters for the bridge: each car's crossing time depends on
    /// the car admitted before it.
    fn add_many(&mut self, cars: Vec<Car>) {
        for car in cars {
            self.add(car);
        }
    }

    /// Advance this queue's timer on every car by one tick (floor 0)
    fn tick(&mut self);

    /// Read-only view of the queued cars, in queue order
    fn cars(&self) -> &[Car];

    fn is_empty(&self) -> bool {
        self.cars().is_empty()
    }

    fn len(&self) -> usize {
        self.cars().len()
    }

    /// Look up a queued car by id
    fn get(&self, id: &str) -> Option<&Car> {
        self.cars().iter().find(|car| car.id() == id)
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
