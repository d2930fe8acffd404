//! Territorial predator/prey rules.
//!
//! Prey flee from adjacent predators and graze otherwise. Predators hunt
//! the first prey found in row-major scan order and wander otherwise.
//! Movement always targets an orthogonal cell that is empty in the
//! snapshot, picked by a random permutation of the four directions.

use super::{CommitContext, RuleSet};
use crate::config::TerritorialConfig;
use crate::error::Result;
use crate::genetics::TerritorialDeltas;
use crate::grid::{Grid, GridPos};
use crate::interaction::Claims;
use crate::lifecycle::{age_and_charge, create_agent, is_spent};
use crate::neighborhood::random_orthogonal_order;
use crate::reproduction::{attempt_reproduce, place_offspring, ReproductionGate};
use crate::rng::Phase;
use biogrid_data::{Cell, Organism, Species};
use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Flee,
    Graze,
    Hunt(GridPos),
    Wander,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Stay,
    MoveTo(GridPos),
    /// Removes the prey at `prey` and credits `gain` to the hunter if the
    /// prey has not been claimed by a lower-indexed hunter.
    Consume { prey: GridPos, gain: f64 },
}

#[derive(Debug, Clone)]
pub struct TerritorialPlan {
    /// The acting organism after this tick's ageing, decay and grazing.
    pub organism: Organism,
    pub behavior: Behavior,
    pub effect: Effect,
}

#[derive(Debug, Clone)]
pub struct TerritorialRules {
    config: TerritorialConfig,
    gate: ReproductionGate,
    deltas: TerritorialDeltas,
}

impl TerritorialRules {
    pub fn new(config: TerritorialConfig) -> Self {
        let gate = ReproductionGate {
            min_energy: config.reproduction_energy,
            min_age: config.reproduction_min_age,
            offspring_energy: config.offspring_energy,
        };
        let deltas = TerritorialDeltas::from(&config);
        Self {
            config,
            gate,
            deltas,
        }
    }

    pub fn config(&self) -> &TerritorialConfig {
        &self.config
    }

    pub fn max_age(&self, species: Species) -> u32 {
        match species {
            Species::Prey => self.config.max_age_prey,
            Species::Predator => self.config.max_age_predator,
        }
    }

    fn choose_behavior(
        &self,
        snapshot: &Grid<Cell<Organism>>,
        pos: GridPos,
        species: Species,
    ) -> Behavior {
        match species {
            Species::Prey => {
                if snapshot.first_neighbor(pos, |c| c.holds(Species::Predator)).is_some() {
                    Behavior::Flee
                } else {
                    Behavior::Graze
                }
            }
            Species::Predator => match snapshot.first_neighbor(pos, |c| c.holds(Species::Prey)) {
                Some(prey) => Behavior::Hunt(prey),
                None => Behavior::Wander,
            },
        }
    }

    fn act(
        &self,
        snapshot: &Grid<Cell<Organism>>,
        pos: GridPos,
        behavior: Behavior,
        organism: &mut Organism,
        rng: &mut ChaCha8Rng,
    ) -> Effect {
        match behavior {
            Behavior::Graze => {
                organism.energy += self.config.graze_gain;
                Effect::Stay
            }
            Behavior::Hunt(prey) => {
                let prey_energy = snapshot.at(prey).agent().map_or(0.0, |p| p.energy);
                Effect::Consume {
                    prey,
                    gain: self.config.predation_efficiency * prey_energy,
                }
            }
            Behavior::Flee | Behavior::Wander => random_orthogonal_order(rng)
                .into_iter()
                .filter_map(|(dr, dc)| snapshot.offset(pos, dr, dc))
                .find(|target| snapshot.at(*target).is_empty())
                .map_or(Effect::Stay, Effect::MoveTo),
        }
    }
}

impl RuleSet for TerritorialRules {
    type Cell = Cell<Organism>;
    type Plan = TerritorialPlan;
    type Kind = Species;

    fn populate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Grid<Self::Cell>> {
        let mut grid = Grid::filled(rows, cols, Cell::Empty)?;
        let wanted = self.config.initial_prey + self.config.initial_predators;
        let amount = wanted.min(grid.len());
        for (n, idx) in index::sample(rng, grid.len(), amount).into_iter().enumerate() {
            let species = if n < self.config.initial_prey {
                Species::Prey
            } else {
                Species::Predator
            };
            let pos = grid.pos_of(idx);
            *grid.at_mut(pos) =
                Cell::Occupied(create_agent(species, self.config.initial_energy, rng));
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
    ) -> Option<TerritorialPlan> {
        let mut organism = snapshot.at(pos).agent()?.clone();
        age_and_charge(&mut organism, self.config.decay_per_tick);
        let behavior = self.choose_behavior(snapshot, pos, organism.kind);
        let effect = self.act(snapshot, pos, behavior, &mut organism, rng);
        Some(TerritorialPlan {
            organism,
            behavior,
            effect,
        })
    }

    fn commit(
        &self,
        snapshot: &Grid<Self::Cell>,
        mut plans: Vec<(GridPos, TerritorialPlan)>,
        ctx: &mut CommitContext,
    ) -> Grid<Self::Cell> {
        let mut next: Grid<Self::Cell> = snapshot.blank_like();
        let mut claims = Claims::new(snapshot.len());

        // Hunts, in index order. Granted prey are removed from play.
        for (pos, plan) in plans.iter_mut() {
            if let Effect::Consume { prey, gain } = plan.effect {
                if claims.claim(snapshot.index(prey)) {
                    plan.organism.energy += gain;
                    ctx.report.consumed += 1;
                } else {
                    tracing::trace!(hunter = ?pos, prey = ?prey, "hunt lost to an earlier claimant");
                    ctx.report.contested += 1;
                }
                plan.effect = Effect::Stay;
            }
        }

        let mut survivors = Vec::with_capacity(plans.len());
        for (origin, plan) in plans {
            if claims.is_claimed(snapshot.index(origin)) {
                continue;
            }
            if is_spent(&plan.organism, self.max_age(plan.organism.kind)) {
                ctx.report.deaths += 1;
                continue;
            }
            let target = match plan.effect {
                Effect::MoveTo(target) if next.at(target).is_empty() => {
                    ctx.report.moves += 1;
                    target
                }
                Effect::MoveTo(target) => {
                    tracing::trace!(from = ?origin, to = ?target, "move blocked");
                    ctx.report.blocked_moves += 1;
                    origin
                }
                _ => origin,
            };
            *next.at_mut(target) = Cell::Occupied(plan.organism);
            survivors.push((origin, target));
        }

        for (origin, at) in survivors {
            let mut rng = ctx.rng(snapshot.index(origin), Phase::Commit);
            let Some(parent) = next.at_mut(at).agent_mut() else {
                continue;
            };
            if rng.gen::<f64>() >= parent.genome.reproduction_rate {
                continue;
            }
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

    fn imprint<R: Rng>(&self, cell: &mut Self::Cell, kind: Species, rng: &mut R) {
        *cell = Cell::Occupied(create_agent(kind, self.config.initial_energy, rng));
    }

    fn random_kind<R: Rng>(&self, rng: &mut R) -> Species {
        if rng.gen_bool(0.5) {
            Species::Prey
        } else {
            Species::Predator
        }
    }
}
