//! Termination system: decides whether the fight ended this tick.
//!
//! Breakoff is checked before landing, so a fish that is both exhausted and
//! over-tensioned still breaks off. A fight that is still live on its
//! `MAX_FIGHT_TICKS`-th tick also breaks off: some profiles strip line faster
//! than tension can recover it and would otherwise never finish.

use reelfight_core::constants::{LANDED_LINE_OUT, LANDED_STAMINA, MAX_FIGHT_TICKS, TICK_MS};
use reelfight_core::enums::{FightOutcome, FightPhase};
use reelfight_core::state::FightState;

use reelfight_behavior::presets::DifficultyPreset;

/// Run the termination check for the tick in progress (`elapsed_ms` not yet
/// advanced). Sets the terminal phase and returns the outcome when the fight
/// ends.
pub fn run(state: &mut FightState, preset: &DifficultyPreset) -> Option<FightOutcome> {
    if state.over_tension_ms >= preset.breakoff_sustain_ms {
        state.phase = FightPhase::Breakoff;
        return Some(FightOutcome::Breakoff);
    }

    if state.stamina < LANDED_STAMINA
        && state.line_out < LANDED_LINE_OUT
        && state.phase != FightPhase::Breakoff
    {
        state.phase = FightPhase::Landed;
        return Some(FightOutcome::Landed);
    }

    let tick_number = state.elapsed_ms / TICK_MS + 1;
    if tick_number >= MAX_FIGHT_TICKS {
        log::debug!("fight hit the {MAX_FIGHT_TICKS}-tick limit; line gives out");
        state.phase = FightPhase::Breakoff;
        return Some(FightOutcome::Breakoff);
    }

    None
}
