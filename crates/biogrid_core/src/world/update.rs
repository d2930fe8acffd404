use crate::grid::{Grid, GridPos};
use crate::interaction::TickReport;
use crate::rng::{cell_rng, Phase};
use crate::rules::{CommitContext, RuleSet};
use crate::world::World;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Indices of the cells that take part in the decision phase.
pub fn active_cells<R: RuleSet>(rules: &R, snapshot: &Grid<R::Cell>) -> Vec<usize> {
    snapshot
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| rules.is_active(cell))
        .map(|(idx, _)| idx)
        .collect()
}

/// Runs the decision phase for the cells in `order`, in that order (or in
/// parallel), and returns the plans sorted row-major.
///
/// Every cell draws from its own stream, so the result does not depend on
/// `order` or on thread scheduling.
pub fn decide_in_order<R: RuleSet>(
    rules: &R,
    snapshot: &Grid<R::Cell>,
    order: &[usize],
    world_seed: u64,
    tick: u64,
    parallel: bool,
) -> Vec<(GridPos, R::Plan)> {
    let decide_one = |&idx: &usize| {
        let pos = snapshot.pos_of(idx);
        let mut rng = cell_rng(world_seed, tick, idx, Phase::Decide);
        rules.decide(snapshot, pos, &mut rng).map(|plan| (pos, plan))
    };

    #[cfg(feature = "parallel")]
    let mut plans: Vec<_> = if parallel {
        order.par_iter().filter_map(decide_one).collect()
    } else {
        order.iter().filter_map(decide_one).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let mut plans: Vec<_> = {
        let _ = parallel;
        order.iter().filter_map(decide_one).collect()
    };

    plans.sort_by_key(|(pos, _)| *pos);
    plans
}

/// Computes the committed successor of `snapshot` for `tick`.
pub fn advance<R: RuleSet>(
    rules: &R,
    snapshot: &Grid<R::Cell>,
    world_seed: u64,
    tick: u64,
    parallel: bool,
) -> (Grid<R::Cell>, TickReport) {
    let order = active_cells(rules, snapshot);
    let plans = decide_in_order(rules, snapshot, &order, world_seed, tick, parallel);
    let mut ctx = CommitContext::new(world_seed, tick);
    ctx.report.active = plans.len();
    let next = rules.commit(snapshot, plans, &mut ctx);
    (next, ctx.report)
}

impl<R: RuleSet> World<R> {
    /// Advances the simulation by exactly one tick.
    ///
    /// Decisions read the grid as it was at the start of the tick; the
    /// successor becomes current only once the whole commit is done.
    pub fn step(&mut self) -> TickReport {
        let tick = self.tick + 1;
        let (next, report) = advance(&self.rules, &self.grid, self.seed, tick, self.parallel);
        self.grid = next;
        self.tick = tick;
        tracing::debug!(
            tick,
            active = report.active,
            births = report.births,
            deaths = report.deaths,
            consumed = report.consumed,
            feedings = report.feedings,
            recycled = report.recycled,
            "tick committed"
        );
        report
    }

    pub fn step_many(&mut self, ticks: u64) -> TickReport {
        let mut last = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };
        for _ in 0..ticks {
            last = self.step();
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffusionConfig;
    use crate::rules::DiffusiveRules;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reversed_order_gives_same_plans() {
        let rules = DiffusiveRules::new(DiffusionConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let grid = rules.populate(8, 9, &mut rng).unwrap();
        let forward = active_cells(&rules, &grid);
        let mut backward = forward.clone();
        backward.reverse();

        let a = decide_in_order(&rules, &grid, &forward, 21, 1, false);
        let b = decide_in_order(&rules, &grid, &backward, 21, 1, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_counts_ticks() {
        let rules = DiffusiveRules::new(DiffusionConfig::default());
        let mut world = World::new(rules, 4, 4, 5, false).unwrap();
        let report = world.step_many(3);
        assert_eq!(world.tick(), 3);
        assert_eq!(report.tick, 3);
        assert_eq!(report.active, 16);
    }
}
