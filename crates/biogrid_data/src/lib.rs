pub mod data;

pub use data::agent::{Agent, Cell, Guild, Microbe, Organism, Species};
pub use data::genome::{MicrobeGenome, TerritorialGenome};
pub use data::pattern::PatternCell;
