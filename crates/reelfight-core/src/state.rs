//! Fight state snapshot: the complete visible state of one fight, readable
//! by the caller after every tick.

use serde::{Deserialize, Serialize};

use crate::constants::{
    clamp01, INITIAL_LINE_OUT_FACTOR, INITIAL_STAMINA_BASE, INITIAL_STAMINA_WEIGHT,
};
use crate::enums::{Difficulty, FightEvent, FightOutcome, FightPhase};
use crate::species::FightParams;

/// Mutable per-fight state. Owned by exactly one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightState {
    /// Fight time in milliseconds; grows by one tick per step.
    pub elapsed_ms: u64,
    /// Line load relative to breaking point, [0, 1].
    pub tension: f64,
    /// Fraction of line paid out, [0, 1].
    pub line_out: f64,
    /// Remaining fish stamina, [0, 1].
    pub stamina: f64,
    pub phase: FightPhase,
    /// Event fired on the most recent tick, if any.
    pub last_event: Option<FightEvent>,
    /// Consecutive time spent above the breakoff tension.
    pub over_tension_ms: u64,
    /// Current RNG state.
    pub rng_state: u64,
}

impl FightState {
    /// Hook-up state for the given normalized profile.
    pub fn initial(params: &FightParams, rng_state: u64) -> Self {
        Self {
            elapsed_ms: 0,
            tension: 0.0,
            line_out: clamp01(params.run0 * INITIAL_LINE_OUT_FACTOR),
            stamina: clamp01(INITIAL_STAMINA_BASE + params.stamina * INITIAL_STAMINA_WEIGHT),
            phase: FightPhase::Running,
            last_event: None,
            over_tension_ms: 0,
            rng_state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Outcome if the fight is over.
    pub fn outcome(&self) -> Option<FightOutcome> {
        FightOutcome::from_phase(self.phase)
    }
}

/// Record of a finished fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightSummary {
    pub species_id: String,
    pub difficulty: Difficulty,
    pub duration_ms: u64,
    pub landed: bool,
    /// Breakoffs across every attempt on this engine, this one included.
    pub breakoffs: u32,
    pub outcome: FightOutcome,
}
