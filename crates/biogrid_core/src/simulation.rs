//! Variant-erased façade over the three worlds, as seen by a host.

use crate::config::{AppConfig, Variant};
use crate::error::Result;
use crate::interaction::TickReport;
use crate::rules::diffusive::MAX_LEVEL;
use crate::rules::{DiffusiveRules, TerritorialRules, TrophicRules};
use crate::snapshot::{PopulationStats, RenderSnapshot};
use crate::world::World;
use biogrid_data::{Guild, Species};
use serde::{Deserialize, Serialize};

/// What a host asks to paint into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectKind {
    Prey,
    Predator,
    Producer,
    Consumer,
    Decomposer,
    /// Any kind of the running variant, drawn at random.
    Random,
}

pub enum Simulation {
    Territorial(World<TerritorialRules>),
    Trophic(World<TrophicRules>),
    Diffusive(World<DiffusiveRules>),
}

macro_rules! each_world {
    ($sim:expr, $world:ident => $body:expr) => {
        match $sim {
            Simulation::Territorial($world) => $body,
            Simulation::Trophic($world) => $body,
            Simulation::Diffusive($world) => $body,
        }
    };
}

impl Simulation {
    /// Validates `config` and builds the selected variant.
    ///
    /// Without a configured seed, one is drawn from the thread RNG and
    /// logged so the run can be replayed.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let rows = config.world.rows as usize;
        let cols = config.world.cols as usize;
        let parallel = config.world.parallel;
        tracing::info!(variant = ?config.world.variant, seed, "building simulation");

        Ok(match config.world.variant {
            Variant::Territorial => Simulation::Territorial(World::new(
                TerritorialRules::new(config.territorial.clone()),
                rows,
                cols,
                seed,
                parallel,
            )?),
            Variant::Trophic => Simulation::Trophic(World::new(
                TrophicRules::new(config.trophic.clone()),
                rows,
                cols,
                seed,
                parallel,
            )?),
            Variant::Diffusive => Simulation::Diffusive(World::new(
                DiffusiveRules::new(config.diffusion.clone()),
                rows,
                cols,
                seed,
                parallel,
            )?),
        })
    }

    pub fn variant(&self) -> Variant {
        match self {
            Simulation::Territorial(_) => Variant::Territorial,
            Simulation::Trophic(_) => Variant::Trophic,
            Simulation::Diffusive(_) => Variant::Diffusive,
        }
    }

    pub fn step(&mut self) -> TickReport {
        each_world!(self, w => w.step())
    }

    pub fn tick(&self) -> u64 {
        each_world!(self, w => w.tick())
    }

    pub fn seed(&self) -> u64 {
        each_world!(self, w => w.seed())
    }

    pub fn dimensions(&self) -> (usize, usize) {
        each_world!(self, w => w.dimensions())
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        each_world!(self, w => w.snapshot())
    }

    pub fn population(&self) -> PopulationStats {
        each_world!(self, w => w.population())
    }

    pub fn reset(&mut self) -> Result<()> {
        each_world!(self, w => w.reset())
    }

    /// Paints a fresh agent at `(row, col)`.
    ///
    /// Returns `false` when the coordinates are out of bounds or `kind` has
    /// no meaning for the running variant; the grid is then left untouched.
    /// On the pattern variant every kind maximises the cell level.
    pub fn inject(&mut self, row: usize, col: usize, kind: InjectKind) -> bool {
        match (self, kind) {
            (Simulation::Territorial(w), InjectKind::Prey) => w.inject(row, col, Species::Prey),
            (Simulation::Territorial(w), InjectKind::Predator) => {
                w.inject(row, col, Species::Predator)
            }
            (Simulation::Trophic(w), InjectKind::Producer) => w.inject(row, col, Guild::Producer),
            (Simulation::Trophic(w), InjectKind::Consumer) => w.inject(row, col, Guild::Consumer),
            (Simulation::Trophic(w), InjectKind::Decomposer) => {
                w.inject(row, col, Guild::Decomposer)
            }
            (Simulation::Diffusive(w), _) => w.inject(row, col, MAX_LEVEL),
            (sim, InjectKind::Random) => each_world!(sim, w => w.inject_random(row, col)),
            (_, kind) => {
                tracing::debug!(?kind, "injection kind not used by this variant");
                false
            }
        }
    }

    /// Forces the cell to its maximum level (pattern variant) or paints a
    /// random agent (organism variants).
    pub fn perturb(&mut self, row: usize, col: usize) -> bool {
        self.inject(row, col, InjectKind::Random)
    }

    /// Perturbs a uniformly chosen cell and returns its position.
    pub fn perturb_random(&mut self) -> (usize, usize) {
        each_world!(self, w => w.perturb_random())
    }
}
