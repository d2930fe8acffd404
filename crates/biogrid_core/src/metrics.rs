//! Run metrics and logging setup.
//!
//! Keeps cheap running totals of what the kernel did and reports them
//! through `tracing` at a fixed tick interval.

use crate::interaction::TickReport;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Ticks between two summary lines at `info` level.
pub const SUMMARY_INTERVAL: u64 = 100;

/// Running totals for one simulation run.
pub struct Metrics {
    tick_count: AtomicU64,
    living: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    busy_micros: AtomicU64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            living: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            busy_micros: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration and resulting population.
    pub fn record_tick(&self, duration: Duration, report: &TickReport, living: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.living.store(living as u64, Ordering::Relaxed);
        self.births.fetch_add(report.births as u64, Ordering::Relaxed);
        self.deaths.fetch_add(report.deaths as u64, Ordering::Relaxed);
        self.busy_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if tick.is_multiple_of(SUMMARY_INTERVAL) {
            tracing::info!(
                tick = report.tick,
                living,
                births = self.births(),
                deaths = self.deaths(),
                mean_tick_us = self.mean_tick().as_micros() as u64,
                "simulation progress"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    /// Agents alive after the most recent tick.
    #[must_use]
    pub fn living(&self) -> u64 {
        self.living.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    /// Mean wall time spent inside `step`.
    #[must_use]
    pub fn mean_tick(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.busy_micros.load(Ordering::Relaxed) / ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global `tracing` subscriber.
///
/// Honours `RUST_LOG`; defaults to `info`. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.mean_tick(), Duration::ZERO);
    }

    #[test]
    fn test_record_tick_accumulates() {
        let metrics = Metrics::new();
        let report = TickReport {
            tick: 1,
            births: 3,
            deaths: 2,
            ..TickReport::default()
        };
        metrics.record_tick(Duration::from_micros(400), &report, 41);
        metrics.record_tick(Duration::from_micros(600), &report, 42);
        assert_eq!(metrics.tick_count(), 2);
        assert_eq!(metrics.living(), 42);
        assert_eq!(metrics.births(), 6);
        assert_eq!(metrics.deaths(), 4);
        assert_eq!(metrics.mean_tick(), Duration::from_micros(500));
    }

    #[test]
    fn test_increment_counter() {
        let metrics = Metrics::new();
        metrics.increment_counter("inject");
        metrics.increment_counter("inject");
        assert_eq!(metrics.counter("inject"), 2);
        assert_eq!(metrics.counter("reset"), 0);
    }
}
