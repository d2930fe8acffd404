//! Core data structures for the biogrid simulation.

pub mod agent;
pub mod genome;
pub mod pattern;
