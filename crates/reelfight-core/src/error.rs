//! Error taxonomy for fight setup and stepping.

use thiserror::Error;

use crate::enums::FightPhase;

/// Errors reported by the simulation core. All are deterministic; none are
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FightError {
    #[error("invalid species profile: {field} {reason}")]
    InvalidProfile { field: String, reason: String },
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    InvalidDifficulty(String),
    #[error("cannot advance a fight that already ended in {phase:?}")]
    TickAfterTerminal { phase: FightPhase },
}

impl FightError {
    pub(crate) fn invalid_profile(field: &str, reason: impl Into<String>) -> Self {
        FightError::InvalidProfile {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
