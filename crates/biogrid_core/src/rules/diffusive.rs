//! Continuous pattern generator.
//!
//! Each cell relaxes toward the mean of its neighbours' previous states,
//! pushed by a persistent per-cell drift and bounded noise.

use super::{CommitContext, RuleSet};
use crate::config::DiffusionConfig;
use crate::error::Result;
use crate::grid::{Grid, GridPos};
use crate::rng::jitter;
use biogrid_data::PatternCell;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Level written by an external perturbation.
pub const MAX_LEVEL: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct DiffusiveRules {
    config: DiffusionConfig,
}

impl DiffusiveRules {
    pub fn new(config: DiffusionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffusionConfig {
        &self.config
    }

    fn neighbor_mean(snapshot: &Grid<PatternCell>, pos: GridPos) -> f64 {
        let (sum, count) = snapshot
            .neighbors(pos)
            .fold((0.0, 0usize), |(sum, n), (_, c)| (sum + c.previous_state, n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

impl RuleSet for DiffusiveRules {
    type Cell = PatternCell;
    type Plan = PatternCell;
    /// Target level of an injection.
    type Kind = f64;

    fn populate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Grid<PatternCell>> {
        Grid::from_fn(rows, cols, |_| {
            let drift_bias = jitter(rng, self.config.drift_range);
            let state = if rng.gen::<f64>() < self.config.seed_density {
                rng.gen::<f64>()
            } else {
                0.0
            };
            PatternCell {
                state,
                previous_state: 0.0,
                drift_bias,
            }
        })
    }

    fn is_active(&self, _cell: &PatternCell) -> bool {
        true
    }

    fn decide(
        &self,
        snapshot: &Grid<PatternCell>,
        pos: GridPos,
        rng: &mut ChaCha8Rng,
    ) -> Option<PatternCell> {
        let cell = snapshot.at(pos);
        let mean = Self::neighbor_mean(snapshot, pos);
        let delta = (mean - cell.state) * self.config.relaxation + cell.drift_bias;
        let state = (cell.state + delta + jitter(rng, self.config.noise)).clamp(0.0, 1.0);
        let drift_bias = if rng.gen::<f64>() < self.config.drift_resample_chance {
            jitter(rng, self.config.drift_range)
        } else {
            cell.drift_bias
        };
        Some(PatternCell {
            state,
            previous_state: cell.state,
            drift_bias,
        })
    }

    fn commit(
        &self,
        snapshot: &Grid<PatternCell>,
        plans: Vec<(GridPos, PatternCell)>,
        _ctx: &mut CommitContext,
    ) -> Grid<PatternCell> {
        let mut next = snapshot.clone();
        for (pos, cell) in plans {
            *next.at_mut(pos) = cell;
        }
        next
    }

    fn imprint<R: Rng>(&self, cell: &mut PatternCell, level: f64, _rng: &mut R) {
        cell.state = level.clamp(0.0, 1.0);
    }

    fn random_kind<R: Rng>(&self, _rng: &mut R) -> f64 {
        MAX_LEVEL
    }
}
