//! Tests for WaitingQueue
//!
//! Ordering, readiness lookup and removal through the public API.

use bridge_simulator_core_rs::queues::{CarQueue, WaitingQueue};
use bridge_simulator_core_rs::{Car, CarSpec, Direction};

fn car(id: &str, waiting_time: u32, direction: Direction) -> Car {
    Car::new(id, CarSpec::new(2, waiting_time, direction))
}

fn ids(queue: &WaitingQueue) -> Vec<String> {
    queue.cars().iter().map(|c| c.id().to_string()).collect()
}

#[test]
fn test_new_queue_is_empty() {
    let queue = WaitingQueue::new();
    assert!(queue.is_empty());
    assert!(queue.next_car_to_cross().is_none());
    assert!(queue.cars_to_cross(None).is_empty());
}

#[test]
fn test_add_many_is_ordered_and_stable() {
    let mut queue = WaitingQueue::new();
    queue.add_many(vec![
        car("a", 3, Direction::LeftToRight),
        car("b", 1, Direction::RightToLeft),
        car("c", 3, Direction::RightToLeft),
        car("d", 1, Direction::LeftToRight),
    ]);

    assert_eq!(ids(&queue), vec!["b", "d", "a", "c"]);
}

#[test]
fn test_late_arrival_sorts_ahead_of_older_cars() {
    let mut queue = WaitingQueue::new();
    queue.add(car("old", 4, Direction::LeftToRight));
    queue.tick();

    // old now has 3 remaining, the newcomer only 2
    queue.add(car("new", 2, Direction::RightToLeft));
    assert_eq!(ids(&queue), vec!["new", "old"]);
}

#[test]
fn test_tick_floors_at_zero() {
    let mut queue = WaitingQueue::new();
    queue.add(car("a", 1, Direction::LeftToRight));

    for _ in 0..10 {
        queue.tick();
    }
    assert_eq!(queue.get("a").unwrap().current_waiting_time(), 0);
    assert!(queue.get("a").unwrap().is_ready());
}

#[test]
fn test_earliest_ready_car_picks_direction() {
    let mut queue = WaitingQueue::new();
    queue.add(car("r1", 1, Direction::RightToLeft));
    queue.add(car("l1", 1, Direction::LeftToRight));
    queue.add(car("r2", 1, Direction::RightToLeft));
    queue.tick();

    let next = queue.next_car_to_cross().unwrap();
    assert_eq!(next.id(), "r1");

    let batch: Vec<_> = queue
        .cars_to_cross(Some(next.direction()))
        .iter()
        .map(|c| c.id().to_string())
        .collect();
    assert_eq!(batch, vec!["r1", "r2"]);
}

#[test]
fn test_not_ready_cars_excluded_from_batch() {
    let mut queue = WaitingQueue::new();
    queue.add(car("ready", 1, Direction::LeftToRight));
    queue.add(car("later", 3, Direction::LeftToRight));
    queue.tick();

    let batch = queue.cars_to_cross(Some(Direction::LeftToRight));
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].id(), "ready");
}

#[test]
fn test_removal_of_absent_car_is_noop() {
    let mut queue = WaitingQueue::new();
    queue.add(car("a", 1, Direction::LeftToRight));

    assert!(!queue.remove_by_id("missing"));
    queue.remove_many(&[car("ghost", 1, Direction::LeftToRight)]);
    queue.remove_many(&[]);
    assert_eq!(ids(&queue), vec!["a"]);
}

#[test]
fn test_contains_and_len() {
    let mut queue = WaitingQueue::new();
    queue.add(car("a", 1, Direction::LeftToRight));
    queue.add(car("b", 2, Direction::RightToLeft));

    assert_eq!(queue.len(), 2);
    assert!(queue.contains("b"));
    assert!(!queue.contains("c"));
    assert_eq!(queue.cars_by_direction(Direction::RightToLeft).len(), 1);
}
