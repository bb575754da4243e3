//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).
//! Python-facing keys are snake_case; direction values use the same
//! kebab-case strings as the JSON wire format.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::car::{Car, CarSpec, Direction};
use crate::orchestrator::{CarConfig, SimulationConfig, SimulationStatus, TickResult};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field, raising ValueError if it is missing
fn extract_required<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field, falling back to `default` when it is missing
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

fn parse_direction(value: &str) -> PyResult<Direction> {
    value
        .parse()
        .map_err(|e| PyValueError::new_err(format!("{}", e)))
}

// ========================================================================
// Python → Rust
// ========================================================================

/// Parse a car dict
///
/// Expected keys: `bridge_time`, `waiting_time`, `direction`. The numeric
/// minimums are checked here so invalid cars never reach the simulation.
pub fn parse_car_spec(dict: &Bound<'_, PyDict>) -> PyResult<CarSpec> {
    let direction: String = extract_required(dict, "direction")?;
    let spec = CarSpec::new(
        extract_required(dict, "bridge_time")?,
        extract_required(dict, "waiting_time")?,
        parse_direction(&direction)?,
    );
    spec.validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(spec)
}

/// Parse the optional constructor dict
///
/// ```python
/// {
///     "record_events": True,
///     "cars": [
///         {"id": "x", "bridge_time": 3, "waiting_time": 1, "direction": "left-to-right"},
///     ],
/// }
/// ```
pub fn parse_simulation_config(dict: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let mut config = SimulationConfig {
        record_events: extract_with_default(dict, "record_events", true)?,
        ..SimulationConfig::default()
    };

    if let Some(cars) = dict.get_item("cars")? {
        let cars = cars.downcast::<PyList>()?;
        for item in cars.iter() {
            let car = item.downcast::<PyDict>()?;
            config.cars.push(CarConfig {
                id: extract_required(car, "id")?,
                spec: parse_car_spec(car)?,
            });
        }
    }

    Ok(config)
}

// ========================================================================
// Rust → Python
// ========================================================================

/// Convert a car to a Python dict
pub fn car_to_py<'py>(py: Python<'py>, car: &Car) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("id", car.id())?;
    dict.set_item("bridge_time", car.bridge_time())?;
    dict.set_item("waiting_time", car.waiting_time())?;
    dict.set_item("direction", car.direction().to_string())?;
    dict.set_item("current_bridge_time", car.current_bridge_time())?;
    dict.set_item("current_waiting_time", car.current_waiting_time())?;
    dict.set_item("is_crossing", car.is_crossing())?;
    dict.set_item("is_removed", car.is_removed())?;

    Ok(dict)
}

fn cars_to_py<'py>(py: Python<'py>, cars: &[Car]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for car in cars {
        list.append(car_to_py(py, car)?)?;
    }
    Ok(list)
}

/// Convert TickResult to Python dict
pub fn tick_result_to_py(py: Python, result: &TickResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("tick", result.tick)?;
    dict.set_item("idle", result.idle)?;
    dict.set_item("num_boarded", result.num_boarded)?;
    dict.set_item("num_crossed", result.num_crossed)?;
    dict.set_item("num_discarded", result.num_discarded)?;
    dict.set_item("waiting_size", result.waiting_size)?;
    dict.set_item("bridge_size", result.bridge_size)?;

    Ok(dict.unbind())
}

/// Convert a status snapshot to Python dict
///
/// ```python
/// {
///     "tick": 4,
///     "waiting_by_direction": {"left-to-right": [...], "right-to-left": [...]},
///     "bridge": [...],
/// }
/// ```
pub fn status_to_py(py: Python, status: &SimulationStatus) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("tick", status.tick)?;

    let waiting = PyDict::new(py);
    for direction in Direction::all() {
        waiting.set_item(
            direction.to_string(),
            cars_to_py(py, status.waiting_by_direction.get(direction))?,
        )?;
    }
    dict.set_item("waiting_by_direction", waiting)?;
    dict.set_item("bridge", cars_to_py(py, &status.bridge)?)?;

    Ok(dict.unbind())
}
