//! Three-guild microbial ecosystem.

use super::{CommitContext, RuleSet};
use crate::config::TrophicConfig;
use crate::error::Result;
use crate::genetics::MicrobeDeltas;
use crate::grid::{Grid, GridPos};
use crate::interaction::Claims;
use crate::lifecycle::{age_and_charge, create_agent, is_spent};
use crate::reproduction::{attempt_reproduce, place_offspring, ReproductionGate};
use crate::rng::Phase;
use biogrid_data::{Cell, Guild, Microbe};
use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const GUILDS: [Guild; 3] = [Guild::Producer, Guild::Consumer, Guild::Decomposer];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Takes `amount` from the producer at `victim` and credits it to the
    /// consumer. Each producer feeds at most one consumer per tick.
    Feed { victim: GridPos, amount: f64 },
    /// Turns the empty cell at `target` into a fresh producer.
    Recycle { target: GridPos },
}

#[derive(Debug, Clone)]
pub struct TrophicPlan {
    pub microbe: Microbe,
    pub effect: Effect,
}

#[derive(Debug, Clone)]
pub struct TrophicRules {
    config: TrophicConfig,
    gate: ReproductionGate,
    deltas: MicrobeDeltas,
}

impl TrophicRules {
    pub fn new(config: TrophicConfig) -> Self {
        // Ageing happens before the gate is checked, so every agent is past
        // age zero by then.
        let gate = ReproductionGate {
            min_energy: config.reproduction_energy,
            min_age: 0,
            offspring_energy: config.offspring_energy,
        };
        let deltas = MicrobeDeltas::from(&config);
        Self {
            config,
            gate,
            deltas,
        }
    }

    pub fn config(&self) -> &TrophicConfig {
        &self.config
    }

    /// Scans the neighbours in row-major order, drawing one trial per
    /// qualifying candidate, and returns the first success.
    fn first_trial<R: Rng>(
        snapshot: &Grid<Cell<Microbe>>,
        pos: GridPos,
        chance: f64,
        qualifies: impl Fn(&Cell<Microbe>) -> bool,
        rng: &mut R,
    ) -> Option<GridPos> {
        snapshot
            .neighbors(pos)
            .filter(|(_, cell)| qualifies(cell))
            .find(|_| rng.gen::<f64>() < chance)
            .map(|(p, _)| p)
    }
}

impl RuleSet for TrophicRules {
    type Cell = Cell<Microbe>;
    type Plan = TrophicPlan;
    type Kind = Guild;

    fn populate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Grid<Self::Cell>> {
        let mut grid = Grid::filled(rows, cols, Cell::Empty)?;
        let amount = self.config.initial_agents.min(grid.len());
        for idx in index::sample(rng, grid.len(), amount).into_iter() {
            let guild = self.random_kind(rng);
            let pos = grid.pos_of(idx);
            *grid.at_mut(pos) =
                Cell::Occupied(create_agent(guild, self.config.initial_energy, rng));
        }
        Ok(grid)
    }

    fn is_active(&self, cell: &Self::Cell) -> bool {
        !cell.is_empty()
    }

    fn decide(
        &self,
        snapshot: &Grid<Self::Cell>,
        pos: GridPos,
        rng: &mut ChaCha8Rng,
    ) -> Option<TrophicPlan> {
        let mut microbe = snapshot.at(pos).agent()?.clone();
        let cost = self.config.metabolic_cost * microbe.genome.metabolism;
        age_and_charge(&mut microbe, cost);

        let effect = match microbe.kind {
            Guild::Producer => {
                microbe.energy += self.config.photosynthesis_gain * microbe.genome.resistance;
                Effect::None
            }
            Guild::Consumer => Self::first_trial(
                snapshot,
                pos,
                self.config.feed_chance,
                |c| c.holds(Guild::Producer),
                rng,
            )
            .map_or(Effect::None, |victim| Effect::Feed {
                victim,
                amount: snapshot
                    .at(victim)
                    .agent()
                    .map_or(0.0, |v| v.energy * self.config.feed_fraction),
            }),
            Guild::Decomposer => Self::first_trial(
                snapshot,
                pos,
                self.config.recycle_chance,
                Cell::is_empty,
                rng,
            )
            .map_or(Effect::None, |target| Effect::Recycle { target }),
        };

        Some(TrophicPlan { microbe, effect })
    }

    fn commit(
        &self,
        snapshot: &Grid<Self::Cell>,
        mut plans: Vec<(GridPos, TrophicPlan)>,
        ctx: &mut CommitContext,
    ) -> Grid<Self::Cell> {
        let mut next: Grid<Self::Cell> = snapshot.blank_like();
        let mut claims = Claims::new(snapshot.len());
        let mut losses = vec![0.0; snapshot.len()];
        let mut recycled = Vec::new();

        for (pos, plan) in plans.iter_mut() {
            match plan.effect {
                Effect::Feed { victim, amount } => {
                    let v = snapshot.index(victim);
                    if claims.claim(v) {
                        plan.microbe.energy += amount;
                        losses[v] += amount;
                        ctx.report.feedings += 1;
                    } else {
                        tracing::trace!(consumer = ?pos, victim = ?victim, "feeding lost to an earlier claimant");
                        ctx.report.contested += 1;
                    }
                }
                Effect::Recycle { target } => {
                    if claims.claim(snapshot.index(target)) {
                        plan.microbe.energy += self.config.recycle_reward;
                        recycled.push(target);
                    } else {
                        tracing::trace!(decomposer = ?pos, target = ?target, "recycling lost to an earlier claimant");
                        ctx.report.contested += 1;
                    }
                }
                Effect::None => {}
            }
        }

        let mut survivors = Vec::with_capacity(plans.len());
        for (origin, mut plan) in plans {
            plan.microbe.energy -= losses[snapshot.index(origin)];
            if is_spent(&plan.microbe, self.config.max_age) {
                ctx.report.deaths += 1;
                continue;
            }
            *next.at_mut(origin) = Cell::Occupied(plan.microbe);
            survivors.push(origin);
        }

        for target in recycled {
            let mut rng = ctx.rng(snapshot.index(target), Phase::Spawn);
            *next.at_mut(target) = Cell::Occupied(create_agent(
                Guild::Producer,
                self.config.recycled_energy,
                &mut rng,
            ));
            ctx.report.recycled += 1;
        }

        for origin in survivors {
            let mut rng = ctx.rng(snapshot.index(origin), Phase::Commit);
            if rng.gen::<f64>() >= self.config.reproduction_chance {
                continue;
            }
            let Some(parent) = next.at_mut(origin).agent_mut() else {
                continue;
            };
            let Some(child) = attempt_reproduce(parent, &self.gate, &self.deltas, &mut rng) else {
                continue;
            };
            if place_offspring(&mut next, origin, child, &mut rng) {
                ctx.report.births += 1;
            } else {
                tracing::trace!(parent = ?origin, "offspring discarded");
                ctx.report.discarded_offspring += 1;
            }
        }

        next
    }

    fn imprint<R: Rng>(&self, cell: &mut Self::Cell, kind: Guild, rng: &mut R) {
        *cell = Cell::Occupied(create_agent(kind, self.config.initial_energy, rng));
    }

    fn random_kind<R: Rng>(&self, rng: &mut R) -> Guild {
        GUILDS[rng.gen_range(0..GUILDS.len())]
    }
}
