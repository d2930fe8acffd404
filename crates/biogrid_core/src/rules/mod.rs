//! Rule engines.
//!
//! A rule set turns one cell of an immutable snapshot into a plan
//! (`decide`), then folds every plan of the tick into a fresh successor grid
//! (`commit`). `decide` must not depend on anything but the snapshot, the
//! position and the random stream it is handed; that is what lets the
//! decision phase run in any order and on any number of threads.

use crate::error::Result;
use crate::grid::{Grid, GridPos};
use crate::interaction::TickReport;
use crate::rng::{cell_rng, Phase};
use crate::snapshot::CellAppearance;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

pub mod diffusive;
pub mod territorial;
pub mod trophic;

pub use diffusive::DiffusiveRules;
pub use territorial::TerritorialRules;
pub use trophic::TrophicRules;

pub trait RuleSet: Send + Sync {
    type Cell: Clone + Debug + PartialEq + Send + Sync + CellAppearance;
    type Plan: Debug + Send;
    /// What the host may inject into a cell.
    type Kind: Copy + Debug;

    /// Initial scatter for a `rows × cols` grid.
    fn populate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Grid<Self::Cell>>;

    /// Whether the cell takes part in the decision phase.
    fn is_active(&self, cell: &Self::Cell) -> bool;

    fn decide(
        &self,
        snapshot: &Grid<Self::Cell>,
        pos: GridPos,
        rng: &mut ChaCha8Rng,
    ) -> Option<Self::Plan>;

    /// Builds the successor grid. `plans` is sorted by position, row-major.
    fn commit(
        &self,
        snapshot: &Grid<Self::Cell>,
        plans: Vec<(GridPos, Self::Plan)>,
        ctx: &mut CommitContext,
    ) -> Grid<Self::Cell>;

    /// Overwrites `cell` with a freshly initialized occupant of `kind`.
    fn imprint<R: Rng>(&self, cell: &mut Self::Cell, kind: Self::Kind, rng: &mut R);

    fn random_kind<R: Rng>(&self, rng: &mut R) -> Self::Kind;
}

/// State available to `commit`.
#[derive(Debug)]
pub struct CommitContext {
    pub world_seed: u64,
    pub tick: u64,
    pub report: TickReport,
}

impl CommitContext {
    pub fn new(world_seed: u64, tick: u64) -> Self {
        Self {
            world_seed,
            tick,
            report: TickReport {
                tick,
                ..Default::default()
            },
        }
    }

    /// Random stream owned by the cell at `index` for this tick and phase.
    #[inline]
    pub fn rng(&self, index: usize, phase: Phase) -> ChaCha8Rng {
        cell_rng(self.world_seed, self.tick, index, phase)
    }
}
