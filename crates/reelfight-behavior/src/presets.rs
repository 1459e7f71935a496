//! Difficulty-specific tuning presets.
//!
//! Consolidates per-difficulty constants for the engine.

use serde::{Deserialize, Serialize};

use reelfight_core::enums::Difficulty;

/// Tuning constants for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    /// Scales per-tick stamina decay.
    pub tension_decay_multiplier: f64,
    /// How long tension may stay above the breakoff threshold (ms).
    pub breakoff_sustain_ms: u64,
    /// Scales the stamina a jump costs.
    pub jump_stamina_loss_multiplier: f64,
}

/// Get the preset for a given difficulty.
pub fn get_preset(difficulty: Difficulty) -> DifficultyPreset {
    match difficulty {
        Difficulty::Easy => DifficultyPreset {
            tension_decay_multiplier: 0.7,
            breakoff_sustain_ms: 350,
            jump_stamina_loss_multiplier: 0.6,
        },
        Difficulty::Medium => DifficultyPreset {
            tension_decay_multiplier: 1.0,
            breakoff_sustain_ms: 250,
            jump_stamina_loss_multiplier: 1.0,
        },
        Difficulty::Hard => DifficultyPreset {
            tension_decay_multiplier: 1.3,
            breakoff_sustain_ms: 150,
            jump_stamina_loss_multiplier: 1.4,
        },
    }
}
