//! Per-tick systems that advance a fight.
//!
//! Systems are pure functions over `&mut FightState`. They do not own
//! state; the engine runs them in a fixed order once per tick.

pub mod behavior;
pub mod line;
pub mod stamina;
pub mod tension;
pub mod termination;
