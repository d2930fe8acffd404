//! # Biogrid Core
//!
//! The grid simulation kernel behind Biogrid: a fixed two-dimensional grid
//! of cells evolving under local Moore-neighbourhood rules, one tick at a
//! time.
//!
//! This crate contains:
//! - Grid storage and the clipped 8-cell neighbourhood sampler
//! - Three interchangeable rule sets (territorial, trophic, diffusive)
//! - Energy/age lifecycle and gated reproduction with bounded mutation
//! - The tick scheduler with snapshot/commit updates
//! - Render snapshots, population statistics, metrics and logging
//!
//! ## Architecture
//!
//! - **Snapshot/commit ticks**: decisions read the grid as of the start of
//!   the tick; a single-threaded commit builds the successor
//! - **Per-cell random streams**: keyed by seed, tick, cell and phase, so
//!   the outcome does not depend on evaluation order
//! - **Parallel decisions**: Rayon-powered behind the `parallel` feature
//!
//! ## Example
//!
//! ```
//! use biogrid_core::config::{AppConfig, Variant};
//! use biogrid_core::simulation::Simulation;
//!
//! let mut config = AppConfig::default();
//! config.world.variant = Variant::Trophic;
//! config.world.seed = Some(42);
//!
//! let mut sim = Simulation::from_config(&config).unwrap();
//! let report = sim.step();
//! assert_eq!(report.tick, 1);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types for kernel operations
pub mod error;
/// Genome generation and mutation
pub mod genetics;
/// Dense row-major grid storage
pub mod grid;
/// Commit-phase claims and tick reports
pub mod interaction;
/// Agent lifecycle management (creation, ageing, death)
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Moore neighbourhood sampling with edge clipping
pub mod neighborhood;
/// Energy/age-gated reproduction and offspring placement
pub mod reproduction;
/// Per-cell deterministic random streams
pub mod rng;
/// Territorial, trophic and diffusive rule sets
pub mod rules;
/// Variant-erased entry point for hosts
pub mod simulation;
/// Render snapshots and population statistics
pub mod snapshot;
/// Tick scheduler
pub mod world;

pub use error::{Result, SimError};
pub use simulation::{InjectKind, Simulation};
