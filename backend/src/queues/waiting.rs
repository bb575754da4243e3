//! Waiting queue
//!
//! Holds cars that are not on the bridge, sorted ascending by remaining
//! wait. The sort is stable, so cars that become ready on the same tick keep
//! their insertion order and are admitted first-come first-served.
//!
//! Ticking decrements every timer by one with a floor of zero, which never
//! reorders the queue; only `add` needs to re-sort.

use super::CarQueue;
use crate::models::car::{Car, Direction};

/// Cars waiting on either bank
#[derive(Debug, Clone, Default)]
pub struct WaitingQueue {
    cars: Vec<Car>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self { cars: Vec::new() }
    }

    /// First ready car in queue order
    ///
    /// Its direction decides which side crosses next.
    pub fn next_car_to_cross(&self) -> Option<&Car> {
        self.cars.iter().find(|car| car.is_ready())
    }

    /// Every ready car, optionally restricted to one direction
    ///
    /// # Example
    ///
    /// ```rust
    /// use bridge_simulator_core_rs::queues::{CarQueue, WaitingQueue};
    /// use bridge_simulator_core_rs::{Car, CarSpec, Direction};
    ///
    /// let mut queue = WaitingQueue::new();
    /// queue.add(Car::new("a", CarSpec::new(1, 1, Direction::LeftToRight)));
    /// queue.add(Car::new("b", CarSpec::new(1, 1, Direction::RightToLeft)));
    /// queue.tick();
    ///
    /// assert_eq!(queue.cars_to_cross(None).len(), 2);
    /// assert_eq!(queue.cars_to_cross(Some(Direction::RightToLeft)).len(), 1);
    /// ```
    pub fn cars_to_cross(&self, direction: Option<Direction>) -> Vec<Car> {
        self.cars
            .iter()
            .filter(|car| car.is_ready())
            .filter(|car| direction.map_or(true, |d| car.direction() == d))
            .cloned()
            .collect()
    }

    /// Cars on one bank, in queue order
    pub fn cars_by_direction(&self, direction: Direction) -> Vec<Car> {
        self.cars
            .iter()
            .filter(|car| car.direction() == direction)
            .cloned()
            .collect()
    }

    /// Remove a car by id
    ///
    /// Returns `false` if no such car is waiting.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        match self.cars.iter().position(|car| car.id() == id) {
            Some(index) => {
                self.cars.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every listed car; absent cars are ignored
    pub fn remove_many(&mut self, cars: &[Car]) {
        if cars.is_empty() {
            return;
        }
        self.cars
            .retain(|queued| !cars.iter().any(|car| car.id() == queued.id()));
    }

    fn sort(&mut self) {
        self.cars.sort_by_key(|car| car.current_waiting_time());
    }
}

impl CarQueue for WaitingQueue {
    fn add(&mut self, mut car: Car) {
        car.enter_waiting();
        self.cars.push(car);
        self.sort();
    }

    fn tick(&mut self) {
        for car in &mut self.cars {
            car.tick_waiting();
        }
    }

    fn cars(&self) -> &[Car] {
        &self.cars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::car::CarSpec;

    fn car(id: &str, waiting_time: u32, direction: Direction) -> Car {
        Car::new(id, CarSpec::new(2, waiting_time, direction))
    }

    fn ids(queue: &WaitingQueue) -> Vec<&str> {
        queue.cars().iter().map(|c| c.id()).collect()
    }

    #[test]
    fn test_add_sorts_by_remaining_wait() {
        let mut queue = WaitingQueue::new();
        queue.add(car("slow", 5, Direction::LeftToRight));
        queue.add(car("fast", 1, Direction::LeftToRight));
        queue.add(car("mid", 3, Direction::RightToLeft));

        assert_eq!(ids(&queue), vec!["fast", "mid", "slow"]);
    }

    #[test]
    fn test_equal_waits_keep_insertion_order() {
        let mut queue = WaitingQueue::new();
        queue.add(car("first", 2, Direction::LeftToRight));
        queue.add(car("second", 2, Direction::RightToLeft));
        queue.add(car("third", 2, Direction::LeftToRight));

        assert_eq!(ids(&queue), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_add_resets_waiting_timer() {
        let mut queue = WaitingQueue::new();
        let mut returning = car("r", 3, Direction::LeftToRight);
        returning.tick_waiting();
        returning.enter_bridge(2);

        queue.add(returning);
        let stored = queue.get("r").unwrap();
        assert_eq!(stored.current_waiting_time(), 3);
        assert!(!stored.is_crossing());
    }

    #[test]
    fn test_next_car_to_cross_is_first_ready() {
        let mut queue = WaitingQueue::new();
        queue.add(car("a", 2, Direction::LeftToRight));
        queue.add(car("b", 1, Direction::RightToLeft));
        assert!(queue.next_car_to_cross().is_none());

        queue.tick();
        assert_eq!(queue.next_car_to_cross().unwrap().id(), "b");

        queue.tick();
        assert_eq!(queue.next_car_to_cross().unwrap().id(), "b");
        assert_eq!(queue.cars_to_cross(None).len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut queue = WaitingQueue::new();
        queue.add(car("a", 1, Direction::LeftToRight));
        queue.add(car("b", 1, Direction::LeftToRight));

        assert!(queue.remove_by_id("a"));
        assert!(!queue.remove_by_id("a"));
        assert_eq!(ids(&queue), vec!["b"]);
    }

    #[test]
    fn test_remove_many_ignores_absent() {
        let mut queue = WaitingQueue::new();
        queue.add(car("a", 1, Direction::LeftToRight));
        queue.add(car("b", 2, Direction::LeftToRight));
        queue.add(car("c", 3, Direction::LeftToRight));

        let ghost = car("ghost", 1, Direction::LeftToRight);
        let a = queue.get("a").unwrap().clone();
        let c = queue.get("c").unwrap().clone();
        queue.remove_many(&[a, ghost, c]);

        assert_eq!(ids(&queue), vec!["b"]);
    }

    #[test]
    fn test_cars_by_direction() {
        let mut queue = WaitingQueue::new();
        queue.add(car("l1", 1, Direction::LeftToRight));
        queue.add(car("r1", 2, Direction::RightToLeft));
        queue.add(car("l2", 3, Direction::LeftToRight));

        let left: Vec<_> = queue
            .cars_by_direction(Direction::LeftToRight)
            .into_iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(left, vec!["l1", "l2"]);
    }
}
