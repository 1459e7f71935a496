//! Notifications emitted by the simulation for haptic and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{FeedbackKind, FeedbackMode};

/// One sink call, as recorded for replay or inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: FeedbackKind,
    pub haptics_enabled: bool,
    pub mode: FeedbackMode,
    /// Line tension at the time of the call, when known.
    pub tension: Option<f64>,
}
