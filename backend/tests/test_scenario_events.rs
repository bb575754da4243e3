//! Integration tests for scenario events
//!
//! Scripted arrivals and cancellations driven through `Scenario::run`.

use bridge_simulator_core_rs::events::{EventSchedule, Scenario, ScenarioEvent, ScheduledEvent};
use bridge_simulator_core_rs::{CarQueue, CarSpec, Direction, SimulationConfig, SimulationError};

fn add_car(id: Option<&str>, spec: CarSpec, schedule: EventSchedule) -> ScheduledEvent {
    ScheduledEvent {
        event: ScenarioEvent::AddCar {
            id: id.map(str::to_string),
            car: spec,
        },
        schedule,
    }
}

fn remove_car(id: &str, tick: usize) -> ScheduledEvent {
    ScheduledEvent {
        event: ScenarioEvent::RemoveCar { id: id.to_string() },
        schedule: EventSchedule::OneTime { tick },
    }
}

#[test]
fn test_scenario_from_json() {
    let json = r#"{
        "ticks": 10,
        "simulation": {
            "cars": [
                {"id": "x", "bridgeTime": 5, "waitingTime": 1, "direction": "left-to-right"},
                {"id": "y", "bridgeTime": 2, "waitingTime": 1, "direction": "left-to-right"}
            ]
        },
        "events": [
            {"event": {"type": "remove_car", "id": "y"}, "schedule": {"tick": 2}},
            {
                "event": {"type": "add_car", "car": {"bridgeTime": 1, "waitingTime": 2, "direction": "right-to-left"}},
                "schedule": {"start_tick": 0, "interval": 5}
            }
        ]
    }"#;

    let scenario = Scenario::from_json_str(json).unwrap();
    assert_eq!(scenario.ticks, 10);
    assert_eq!(scenario.simulation.cars.len(), 2);
    assert_eq!(
        scenario.events[1].schedule,
        EventSchedule::Repeating {
            start_tick: 0,
            interval: 5
        }
    );
}

#[test]
fn test_events_apply_before_their_tick() {
    let scenario = Scenario {
        ticks: 3,
        simulation: SimulationConfig::default(),
        events: vec![add_car(
            Some("late"),
            CarSpec::new(2, 1, Direction::LeftToRight),
            EventSchedule::OneTime { tick: 2 },
        )],
    };

    let mut seen = Vec::new();
    scenario
        .run(|result, sim| seen.push((result.tick, sim.contains_car("late"), result.num_boarded)))
        .unwrap();

    assert_eq!(seen, vec![(0, false, 0), (1, false, 0), (2, true, 1)]);
}

#[test]
fn test_removal_of_crossing_car_is_deferred() {
    let scenario = Scenario {
        ticks: 6,
        simulation: SimulationConfig::default(),
        events: vec![
            add_car(Some("x"), CarSpec::new(4, 1, Direction::LeftToRight), EventSchedule::OneTime { tick: 0 }),
            remove_car("x", 1),
        ],
    };

    let mut on_bridge = Vec::new();
    let sim = scenario
        .run(|_, sim| on_bridge.push(sim.bridge_queue().len()))
        .unwrap();

    // boards at 0, completes at 4 and is discarded instead of returning
    assert_eq!(on_bridge, vec![1, 1, 1, 1, 0, 0]);
    assert!(!sim.contains_car("x"));
    assert_eq!(sim.event_log().events_of_type("CarDiscarded").len(), 1);
    assert!(sim.event_log().events_of_type("CarCrossed").is_empty());
}

#[test]
fn test_repeating_arrivals_get_unique_ids() {
    let scenario = Scenario {
        ticks: 10,
        simulation: SimulationConfig::default(),
        events: vec![add_car(
            None,
            CarSpec::new(1, 3, Direction::RightToLeft),
            EventSchedule::Repeating {
                start_tick: 1,
                interval: 3,
            },
        )],
    };

    let sim = scenario.run(|_, _| {}).unwrap();

    // ticks 1, 4 and 7
    assert_eq!(sim.num_cars(), 3);
    assert_eq!(sim.event_log().events_of_type("CarArrived").len(), 3);
}

#[test]
fn test_duplicate_id_stops_run() {
    let spec = CarSpec::new(1, 1, Direction::LeftToRight);
    let scenario = Scenario {
        ticks: 5,
        simulation: SimulationConfig::default(),
        events: vec![
            add_car(Some("dup"), spec, EventSchedule::OneTime { tick: 0 }),
            add_car(Some("dup"), spec, EventSchedule::OneTime { tick: 2 }),
        ],
    };

    assert_eq!(
        scenario.run(|_, _| {}).unwrap_err(),
        SimulationError::DuplicateCarId("dup".to_string())
    );
}

#[test]
fn test_invalid_car_stops_run() {
    let scenario = Scenario {
        ticks: 5,
        simulation: SimulationConfig::default(),
        events: vec![add_car(
            Some("bad"),
            CarSpec::new(1, 0, Direction::LeftToRight),
            EventSchedule::OneTime { tick: 1 },
        )],
    };

    assert!(matches!(
        scenario.run(|_, _| {}),
        Err(SimulationError::InvalidCar { id, .. }) if id == "bad"
    ));
}

#[test]
fn test_removing_unknown_car_is_harmless() {
    let scenario = Scenario {
        ticks: 2,
        simulation: SimulationConfig::default(),
        events: vec![remove_car("ghost", 0)],
    };

    let sim = scenario.run(|_, _| {}).unwrap();
    assert!(sim.is_idle());
    assert_eq!(sim.current_tick(), 2);
}

#[test]
fn test_malformed_direction_rejected() {
    let json = r#"{
        "ticks": 1,
        "events": [{
            "event": {"type": "add_car", "car": {"bridgeTime": 1, "waitingTime": 1, "direction": "north"}},
            "schedule": {"tick": 0}
        }]
    }"#;

    assert!(matches!(
        Scenario::from_json_str(json),
        Err(SimulationError::SerializationError(_))
    ));
}
