//! Stamina system: baseline decay plus a tension-dependent share, both
//! scaled by difficulty.

use reelfight_core::constants::{clamp01, STAMINA_DECAY_BASE, STAMINA_DECAY_PER_TENSION};
use reelfight_core::state::FightState;

use reelfight_behavior::presets::DifficultyPreset;

/// Run the stamina system.
pub fn run(state: &mut FightState, preset: &DifficultyPreset) {
    let decay = preset.tension_decay_multiplier;
    let spent = STAMINA_DECAY_BASE * decay + state.tension * STAMINA_DECAY_PER_TENSION * decay;
    state.stamina = clamp01(state.stamina - spent);
}
