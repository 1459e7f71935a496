//! Line system: the fish takes line in proportion to its run distance and
//! stamina, and tension wins some back.

use reelfight_core::constants::{
    clamp01, LINE_RECOVERY_PER_TENSION, RUN_PUSH_BASE, RUN_PUSH_STAMINA_WEIGHT,
};
use reelfight_core::species::FightParams;
use reelfight_core::state::FightState;

/// Run the line system.
pub fn run(state: &mut FightState, params: &FightParams) {
    let run_push = params.run0 * (RUN_PUSH_BASE + RUN_PUSH_STAMINA_WEIGHT * state.stamina);
    state.line_out =
        clamp01(state.line_out + run_push - state.tension * LINE_RECOVERY_PER_TENSION);
}
