//! Tension system: exponential approach toward the tick's target tension.

use reelfight_core::constants::{clamp01, BREAKOFF_TENSION, TENSION_SMOOTHING, TICK_MS};
use reelfight_core::state::FightState;

/// Drift tension a fixed fraction of the way toward `target`.
pub fn run(state: &mut FightState, target: f64) {
    state.tension = clamp01(state.tension + (target - state.tension) * TENSION_SMOOTHING);
}

/// Track how long tension has stayed above the breakoff threshold.
/// Any tick at or below the threshold resets the timer.
pub fn track_over_tension(state: &mut FightState) {
    if state.tension > BREAKOFF_TENSION {
        state.over_tension_ms += TICK_MS;
    } else {
        state.over_tension_ms = 0;
    }
}
