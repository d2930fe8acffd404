//! Agent lifecycle management (creation, ageing, death).

use crate::genetics::GenomeLogic;
use biogrid_data::Agent;
use rand::Rng;

/// A fresh agent of `kind` with a random genome for that kind.
pub fn create_agent<K, G, R>(kind: K, energy: f64, rng: &mut R) -> Agent<K, G>
where
    K: Copy,
    G: GenomeLogic<Kind = K>,
    R: Rng,
{
    Agent::new(kind, energy, G::random_for(kind, rng))
}

/// Advances the agent's age by one tick and charges `cost` energy.
#[inline]
pub fn age_and_charge<K, G>(agent: &mut Agent<K, G>, cost: f64) {
    agent.age = agent.age.saturating_add(1);
    agent.energy -= cost;
}

/// An agent is spent once its energy reaches zero or its age passes the
/// ceiling. Spent agents never appear in a committed grid.
#[inline]
pub fn is_spent<K, G>(agent: &Agent<K, G>, max_age: u32) -> bool {
    agent.energy <= 0.0 || agent.age > max_age
}
