use super::genome::{MicrobeGenome, TerritorialGenome};
use serde::{Deserialize, Serialize};

/// Species of the territorial predator/prey variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
}

/// Trophic level of the microbial variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guild {
    /// Photosynthesizes every tick.
    Producer,
    /// Feeds on neighbouring producers.
    Consumer,
    /// Recycles empty neighbouring cells into fresh producers.
    Decomposer,
}

/// A living occupant of a grid cell.
///
/// `kind` never changes during the agent's life. `genome` only changes
/// through inheritance, when a mutated copy is handed to an offspring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent<K, G> {
    pub kind: K,
    pub energy: f64,
    pub age: u32,
    pub genome: G,
}

impl<K, G> Agent<K, G> {
    pub fn new(kind: K, energy: f64, genome: G) -> Self {
        Self {
            kind,
            energy,
            age: 0,
            genome,
        }
    }
}

pub type Organism = Agent<Species, TerritorialGenome>;
pub type Microbe = Agent<Guild, MicrobeGenome>;

/// Exactly one logical occupant per grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell<A> {
    Empty,
    Occupied(A),
}

impl<A> Default for Cell<A> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<A> Cell<A> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub fn agent(&self) -> Option<&A> {
        match self {
            Self::Occupied(a) => Some(a),
            Self::Empty => None,
        }
    }

    #[inline]
    pub fn agent_mut(&mut self) -> Option<&mut A> {
        match self {
            Self::Occupied(a) => Some(a),
            Self::Empty => None,
        }
    }

    /// Leaves `Empty` behind and returns the previous occupant.
    pub fn take(&mut self) -> Option<A> {
        match std::mem::take(self) {
            Self::Occupied(a) => Some(a),
            Self::Empty => None,
        }
    }
}

impl<K: PartialEq, G> Cell<Agent<K, G>> {
    /// True when the cell holds an agent of `kind`.
    #[inline]
    pub fn holds(&self, kind: K) -> bool {
        self.agent().is_some_and(|a| a.kind == kind)
    }
}

impl<A> From<A> for Cell<A> {
    fn from(agent: A) -> Self {
        Self::Occupied(agent)
    }
}
