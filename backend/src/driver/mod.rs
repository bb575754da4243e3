//! Periodic driver
//!
//! Runs a [`Simulation`] on a fixed tick period inside a single tokio task.
//! That task is the only owner of the simulation: external callers talk to it
//! through a [`SimulationHandle`], and their commands are applied between
//! ticks, never in the middle of one.
//!
//! ```text
//!  callers ──mpsc──▶ ┌──────────────┐ ──watch──▶ subscribers
//!                    │  actor task  │
//!  interval ───────▶ │  Simulation  │
//!                    └──────────────┘
//! ```
//!
//! After every tick the new [`SimulationStatus`] is published on a watch
//! channel, so subscribers always see the state as of the last completed tick.

use crate::models::car::{CarError, CarId, CarSpec};
use crate::orchestrator::{RemovalOutcome, Simulation, SimulationStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Milliseconds between ticks
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Commands that may be queued before callers wait
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_command_buffer() -> usize {
    64
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            command_buffer: default_command_buffer(),
        }
    }
}

impl DriverConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Errors returned to driver callers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("simulation driver has stopped")]
    Closed,

    #[error("car rejected: {0}")]
    InvalidCar(#[from] CarError),

    #[error("car id already active: {0}")]
    DuplicateCarId(String),

    #[error("car id must not be empty")]
    EmptyCarId,
}

enum Command {
    AddCar {
        id: CarId,
        spec: CarSpec,
        reply: oneshot::Sender<Result<(), DriverError>>,
    },
    RemoveCar {
        id: CarId,
        reply: oneshot::Sender<RemovalOutcome>,
    },
    Status {
        reply: oneshot::Sender<SimulationStatus>,
    },
    Shutdown,
}

/// Cloneable handle to a running driver
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    commands: mpsc::Sender<Command>,
    status: watch::Receiver<SimulationStatus>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::AddCar { id, .. } => write!(f, "AddCar({id})"),
            Command::RemoveCar { id, .. } => write!(f, "RemoveCar({id})"),
            Command::Status { .. } => write!(f, "Status"),
            Command::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Start the driver task
///
/// The task runs until [`SimulationHandle::shutdown`] is called or every
/// handle is dropped, then returns the simulation.
///
/// # Example
///
/// ```rust
/// use bridge_simulator_core_rs::driver::{spawn, DriverConfig};
/// use bridge_simulator_core_rs::{CarSpec, Direction, Simulation};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let config = DriverConfig { tick_interval_ms: 5, ..Default::default() };
/// let (handle, task) = spawn(Simulation::default(), config);
///
/// let id = handle.join(CarSpec::new(1, 1, Direction::LeftToRight)).await.unwrap();
/// assert!(handle.status().await.unwrap().contains(&id));
///
/// handle.shutdown().await.unwrap();
/// let simulation = task.await.unwrap();
/// assert!(simulation.contains_car(&id));
/// # });
/// ```
pub fn spawn(simulation: Simulation, config: DriverConfig) -> (SimulationHandle, JoinHandle<Simulation>) {
    let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
    let (status_tx, status_rx) = watch::channel(simulation.status());

    let task = tokio::spawn(run(simulation, config, command_rx, status_tx));

    let handle = SimulationHandle {
        commands: command_tx,
        status: status_rx,
    };
    (handle, task)
}

#[instrument(name = "simulation_driver", skip_all, fields(interval_ms = config.tick_interval_ms))]
async fn run(
    mut simulation: Simulation,
    config: DriverConfig,
    mut commands: mpsc::Receiver<Command>,
    status: watch::Sender<SimulationStatus>,
) -> Simulation {
    let mut ticker = interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("driver started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = simulation.tick();
                if !result.idle {
                    debug!(tick = result.tick, waiting = result.waiting_size, bridge = result.bridge_size, "tick");
                }
                status.send_replace(simulation.status());
            }
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => apply(&mut simulation, command),
            },
        }
    }

    info!(tick = simulation.current_tick(), "driver stopped");
    simulation
}

fn apply(simulation: &mut Simulation, command: Command) {
    debug!(?command, "command");
    match command {
        Command::AddCar { id, spec, reply } => {
            let outcome = if simulation.contains_car(&id) {
                Err(DriverError::DuplicateCarId(id))
            } else {
                simulation.add_car(id, spec);
                Ok(())
            };
            let _ = reply.send(outcome);
        }
        Command::RemoveCar { id, reply } => {
            let _ = reply.send(simulation.remove_car(&id));
        }
        Command::Status { reply } => {
            let _ = reply.send(simulation.status());
        }
        Command::Shutdown => {}
    }
}

impl SimulationHandle {
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, DriverError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(build(reply_tx))
            .await
            .map_err(|_| DriverError::Closed)?;
        reply_rx.await.map_err(|_| DriverError::Closed)
    }

    /// Add a car under a freshly generated id
    ///
    /// The spec is validated before it reaches the simulation.
    pub async fn join(&self, spec: CarSpec) -> Result<CarId, DriverError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.add_car(id.clone(), spec).await?;
        Ok(id)
    }

    /// Add a car under a caller-chosen id
    pub async fn add_car(&self, id: impl Into<CarId>, spec: CarSpec) -> Result<(), DriverError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DriverError::EmptyCarId);
        }
        spec.validate()?;
        self.request(|reply| Command::AddCar { id, spec, reply }).await?
    }

    /// Cancel a car; unknown ids report [`RemovalOutcome::NotFound`]
    pub async fn remove_car(&self, id: impl Into<CarId>) -> Result<RemovalOutcome, DriverError> {
        let id = id.into();
        self.request(|reply| Command::RemoveCar { id, reply }).await
    }

    /// Current state, including changes made since the last tick
    pub async fn status(&self) -> Result<SimulationStatus, DriverError> {
        self.request(|reply| Command::Status { reply }).await
    }

    /// Receiver of the status published after each tick
    pub fn subscribe(&self) -> watch::Receiver<SimulationStatus> {
        self.status.clone()
    }

    /// Last published status
    pub fn latest_status(&self) -> SimulationStatus {
        self.status.borrow().clone()
    }

    /// Stop the driver; the task then yields its simulation
    pub async fn shutdown(&self) -> Result<(), DriverError> {
        self.commands.send(Command::Shutdown).await.map_err(|_| {
            warn!("shutdown requested on stopped driver");
            DriverError::Closed
        })
    }
}
