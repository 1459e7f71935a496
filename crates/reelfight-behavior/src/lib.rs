//! Fish behaviour for reelfight.
//!
//! Implements the per-tick behaviour state machine and the
//! difficulty-driven tuning presets.

pub mod fsm;
pub mod presets;

pub use reelfight_core as core;
