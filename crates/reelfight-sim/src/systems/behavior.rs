//! Behaviour system: rolls this tick's event and applies its immediate
//! effects.
//!
//! Calls the behaviour FSM from reelfight-behavior, then writes the phase,
//! event, stamina cost and line surge back into the state.

use reelfight_core::constants::{clamp01, BASE_FORCE_FLOOR, BASE_FORCE_STAMINA_WEIGHT};
use reelfight_core::species::FightParams;
use reelfight_core::state::FightState;

use reelfight_behavior::fsm::{evaluate, BehaviorContext};
use reelfight_behavior::presets::DifficultyPreset;

/// Pull the fish would put on the line right now, before any event.
pub fn base_force(params: &FightParams, stamina: f64) -> f64 {
    params.burst * (BASE_FORCE_FLOOR + BASE_FORCE_STAMINA_WEIGHT * stamina)
}

/// Run the behaviour system. Returns the tick's target tension.
pub fn run(
    state: &mut FightState,
    params: &FightParams,
    preset: &DifficultyPreset,
    roll: f64,
) -> f64 {
    let base = base_force(params, state.stamina);

    let update = evaluate(&BehaviorContext {
        phase: state.phase,
        roll,
        params: *params,
        preset: *preset,
    });

    if update.phase_changed(state.phase) {
        log::trace!(
            "phase {:?} -> {:?} at {}ms",
            state.phase,
            update.new_phase,
            state.elapsed_ms
        );
    }

    state.phase = update.new_phase;
    state.last_event = update.event;
    state.stamina = clamp01(state.stamina - update.stamina_cost);
    state.line_out = clamp01(state.line_out + update.line_surge);

    base * update.tension_factor
}
