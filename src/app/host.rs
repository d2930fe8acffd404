//! Simulation task that runs independently from any front end.
//!
//! The task owns the [`Simulation`]. Front ends talk to it through a
//! [`HostHandle`]: commands go in over an mpsc channel, the latest render
//! snapshot and status come out over `watch` channels.

use super::command::{Command, HostState, HostStatus};
use biogrid_core::metrics::Metrics;
use biogrid_core::simulation::Simulation;
use biogrid_core::snapshot::RenderSnapshot;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("simulation host has stopped")]
    Closed,
    #[error("simulation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Handle for controlling the simulation task.
pub struct HostHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Arc<RenderSnapshot>>,
    status: watch::Receiver<HostStatus>,
    metrics: Arc<Metrics>,
    task: JoinHandle<Simulation>,
}

impl HostHandle {
    pub fn send(&self, command: Command) -> Result<(), HostError> {
        self.commands.send(command).map_err(|_| HostError::Closed)
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Arc<RenderSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn status(&self) -> HostStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<RenderSnapshot>> {
        self.snapshots.clone()
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Waits until the status satisfies `pred`.
    pub async fn wait_for(
        &self,
        pred: impl FnMut(&HostStatus) -> bool,
    ) -> Result<HostStatus, HostError> {
        let mut rx = self.status.clone();
        let status = rx.wait_for(pred).await.map_err(|_| HostError::Closed)?;
        Ok(*status)
    }

    /// Stops the task and hands the simulation back.
    pub async fn shutdown(self) -> Result<Simulation, HostError> {
        // The task may already be gone; joining reports that.
        let _ = self.commands.send(Command::Shutdown);
        Ok(self.task.await?)
    }
}

enum Flow {
    Continue,
    Retime(u64),
    Stop,
}

pub struct Host {
    sim: Simulation,
    state: HostState,
    tick_rate: u64,
    metrics: Arc<Metrics>,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Arc<RenderSnapshot>>,
    status: watch::Sender<HostStatus>,
}

impl Host {
    /// Spawns the simulation task in the variant's initial state.
    pub fn spawn(sim: Simulation, tick_rate: u64) -> HostHandle {
        let state = HostState::initial_for(sim.variant());
        Self::spawn_with_state(sim, tick_rate, state)
    }

    pub fn spawn_with_state(sim: Simulation, tick_rate: u64, state: HostState) -> HostHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(sim.snapshot()));
        let tick_rate = tick_rate.max(1);
        let (status_tx, status_rx) = watch::channel(HostStatus {
            state,
            tick: sim.tick(),
            tick_rate,
        });
        let metrics = Arc::new(Metrics::new());

        let host = Host {
            sim,
            state,
            tick_rate,
            metrics: Arc::clone(&metrics),
            commands: command_rx,
            snapshots: snapshot_tx,
            status: status_tx,
        };
        let task = tokio::spawn(host.run());

        HostHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            status: status_rx,
            metrics,
            task,
        }
    }

    async fn run(mut self) -> Simulation {
        let mut interval = ticker(self.tick_rate);
        tracing::info!(state = ?self.state, tick_rate = self.tick_rate, "host started");

        loop {
            tokio::select! {
                biased;
                command = self.commands.recv() => {
                    let flow = match command {
                        Some(command) => self.apply(command),
                        None => Flow::Stop,
                    };
                    match flow {
                        Flow::Continue => {}
                        Flow::Retime(rate) => interval = ticker(rate),
                        Flow::Stop => break,
                    }
                    self.publish_status();
                }
                _ = interval.tick(), if self.state == HostState::Running => {
                    self.advance();
                }
            }
        }

        self.state = HostState::Stopped;
        self.publish_status();
        tracing::info!(tick = self.sim.tick(), "host stopped");
        self.sim
    }

    fn apply(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, "host command");
        self.metrics.increment_counter("commands");
        match command {
            Command::Pause => self.state = HostState::Paused,
            Command::Resume => self.state = HostState::Running,
            Command::TogglePause => {
                self.state = match self.state {
                    HostState::Running => HostState::Paused,
                    _ => HostState::Running,
                }
            }
            Command::Step => self.advance(),
            Command::Reset => {
                match self.sim.reset() {
                    Ok(()) => self.publish_snapshot(),
                    Err(e) => tracing::error!(error = %e, "reset failed"),
                }
            }
            Command::SetTickRate(rate) => {
                self.tick_rate = rate.max(1);
                return Flow::Retime(self.tick_rate);
            }
            Command::Inject { row, col, kind } => {
                if self.sim.inject(row, col, kind) {
                    self.publish_snapshot();
                }
            }
            Command::Perturb { row, col } => {
                if self.sim.perturb(row, col) {
                    self.publish_snapshot();
                }
            }
            Command::PerturbRandom => {
                self.sim.perturb_random();
                self.publish_snapshot();
            }
            Command::Shutdown => return Flow::Stop,
        }
        Flow::Continue
    }

    fn advance(&mut self) {
        let start = Instant::now();
        let report = self.sim.step();
        let living = self.sim.population().living();
        self.metrics.record_tick(start.elapsed(), &report, living);
        self.publish_snapshot();
        self.publish_status();
    }

    fn publish_snapshot(&self) {
        self.snapshots.send_replace(Arc::new(self.sim.snapshot()));
    }

    fn publish_status(&self) {
        self.status.send_replace(HostStatus {
            state: self.state,
            tick: self.sim.tick(),
            tick_rate: self.tick_rate,
        });
    }
}

fn ticker(rate: u64) -> Interval {
    let period = Duration::from_secs_f64(1.0 / rate.max(1) as f64);
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
