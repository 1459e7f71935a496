//! Simulation engine for reelfight.
//!
//! Owns the per-fight state, runs systems at a fixed 50 ms tick,
//! and reports notifications to a pluggable sink.

pub mod engine;
pub mod rng;
pub mod sink;
pub mod systems;

pub use engine::{FightConfig, FightEngine};
pub use reelfight_core as core;

#[cfg(test)]
mod tests;
