//! Caller commands sent to a running fight.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{FeedbackMode, FightOutcome};

/// All possible caller actions on a fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FightCommand {
    /// Suspend tick scheduling.
    Pause,
    /// Continue from exactly the paused state.
    Resume,
    /// Force-terminate the fight with the given outcome.
    End { outcome: FightOutcome },
    /// Reinitialize to the start state for the same species and difficulty.
    Reset,
    /// Toggle haptic feedback for subsequent notifications.
    SetHaptics { enabled: bool },
    /// Change the feedback mode passed to the sink.
    SetFeedbackMode { mode: FeedbackMode },
}
