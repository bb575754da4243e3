//! PyO3 wrapper for Simulation
//!
//! This module provides the Python interface to the bridge simulation.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{car_to_py, parse_car_spec, parse_simulation_config, status_to_py, tick_result_to_py};
use crate::orchestrator::{RemovalOutcome, Simulation};

/// Python wrapper for the Rust simulation
///
/// Ticks are driven by the caller; there is no background timer on this side.
///
/// # Example (from Python)
///
/// ```python
/// from bridge_simulator_core_rs import BridgeSimulation
///
/// sim = BridgeSimulation()
/// sim.add_car("x", {"bridge_time": 3, "waiting_time": 1, "direction": "left-to-right"})
/// result = sim.tick()
/// print(f"Tick {result['tick']}: {result['num_boarded']} boarded")
/// ```
#[pyclass(name = "BridgeSimulation")]
pub struct PyBridgeSimulation {
    inner: Simulation,
}

#[pymethods]
impl PyBridgeSimulation {
    /// Create a simulation, optionally seeded with initial cars
    ///
    /// # Errors
    ///
    /// Raises ValueError if a car is malformed or an id repeats.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let inner = match config {
            Some(dict) => {
                let rust_config = parse_simulation_config(dict)?;
                Simulation::new(rust_config).map_err(|e| {
                    PyValueError::new_err(format!("Failed to create simulation: {}", e))
                })?
            }
            None => Simulation::default(),
        };
        Ok(Self { inner })
    }

    /// Add a car to the waiting queue
    ///
    /// Raises ValueError if the id is already active or the car is malformed.
    fn add_car(&mut self, id: &str, car: &Bound<'_, PyDict>) -> PyResult<()> {
        if id.is_empty() {
            return Err(PyValueError::new_err("car id must not be empty"));
        }
        if self.inner.contains_car(id) {
            return Err(PyValueError::new_err(format!("Duplicate car ID: {}", id)));
        }
        let spec = parse_car_spec(car)?;
        self.inner.add_car(id, spec);
        Ok(())
    }

    /// Cancel a car
    ///
    /// Returns `"removed"`, `"deferred"` or `"not_found"`.
    fn remove_car(&mut self, id: &str) -> &'static str {
        match self.inner.remove_car(id) {
            RemovalOutcome::Removed => "removed",
            RemovalOutcome::Deferred => "deferred",
            RemovalOutcome::NotFound => "not_found",
        }
    }

    /// Execute one simulation tick
    ///
    /// Returns a dict with `tick`, `idle`, `num_boarded`, `num_crossed`,
    /// `num_discarded`, `waiting_size` and `bridge_size`.
    fn tick(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let result = self.inner.tick();
        tick_result_to_py(py, &result)
    }

    /// Snapshot of waiting cars by direction and the bridge contents
    fn get_status(&self, py: Python) -> PyResult<Py<PyDict>> {
        status_to_py(py, &self.inner.status())
    }

    /// Look up one active car
    fn get_car(&self, py: Python, id: &str) -> PyResult<Option<Py<PyDict>>> {
        self.inner
            .get_car(id)
            .map(|car| car_to_py(py, car).map(Bound::unbind))
            .transpose()
    }

    /// Re-check the structural invariants
    ///
    /// Raises RuntimeError describing the first violation found.
    fn validate_state(&self) -> PyResult<()> {
        self.inner
            .validate_state()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Get current simulation tick
    fn current_tick(&self) -> usize {
        self.inner.current_tick()
    }

    /// Number of active cars
    fn num_cars(&self) -> usize {
        self.inner.num_cars()
    }
}
