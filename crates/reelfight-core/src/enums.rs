//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FightError;

/// Difficulty selector. Maps to a tuning preset in `reelfight-behavior`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = FightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(FightError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fish behaviour phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightPhase {
    /// Steady run, taking line.
    #[default]
    Running,
    /// Violent head shaking.
    Headshake,
    /// Airborne; the line briefly goes slack.
    Jumping,
    /// Sounding for depth.
    Diving,
    /// Circling under the boat.
    Circling,
    /// Fish retrieved (terminal).
    Landed,
    /// Line parted (terminal).
    Breakoff,
}

impl FightPhase {
    /// Whether no further transitions can leave this phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FightPhase::Landed | FightPhase::Breakoff)
    }
}

/// Transition-triggering event recorded in `FightState::last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightEvent {
    Jump,
    Dive,
    Headshake,
    CircleTick,
}

impl FightEvent {
    /// Phase the fish enters when this event fires.
    pub fn phase(&self) -> FightPhase {
        match self {
            FightEvent::Jump => FightPhase::Jumping,
            FightEvent::Dive => FightPhase::Diving,
            FightEvent::Headshake => FightPhase::Headshake,
            FightEvent::CircleTick => FightPhase::Circling,
        }
    }
}

/// Notification kinds delivered to a `NotificationSink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    RunStart,
    RunTick,
    Headshake,
    Jump,
    Dive,
    CircleTick,
    Landed,
    Breakoff,
}

impl From<FightEvent> for FeedbackKind {
    fn from(event: FightEvent) -> Self {
        match event {
            FightEvent::Jump => FeedbackKind::Jump,
            FightEvent::Dive => FeedbackKind::Dive,
            FightEvent::Headshake => FeedbackKind::Headshake,
            FightEvent::CircleTick => FeedbackKind::CircleTick,
        }
    }
}

impl From<FightOutcome> for FeedbackKind {
    fn from(outcome: FightOutcome) -> Self {
        match outcome {
            FightOutcome::Landed => FeedbackKind::Landed,
            FightOutcome::Breakoff => FeedbackKind::Breakoff,
        }
    }
}

/// Haptic rendering style chosen by the user. Passed through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackMode {
    #[default]
    Subtle,
    Detailed,
    AndroidContinuous,
}

impl FromStr for FeedbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subtle" => Ok(FeedbackMode::Subtle),
            "detailed" => Ok(FeedbackMode::Detailed),
            "android_continuous" => Ok(FeedbackMode::AndroidContinuous),
            other => Err(format!("unknown feedback mode: {other}")),
        }
    }
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightOutcome {
    Landed,
    Breakoff,
}

impl FightOutcome {
    /// Terminal phase corresponding to this outcome.
    pub fn phase(&self) -> FightPhase {
        match self {
            FightOutcome::Landed => FightPhase::Landed,
            FightOutcome::Breakoff => FightPhase::Breakoff,
        }
    }

    /// Outcome for a terminal phase, `None` for live phases.
    pub fn from_phase(phase: FightPhase) -> Option<Self> {
        match phase {
            FightPhase::Landed => Some(FightOutcome::Landed),
            FightPhase::Breakoff => Some(FightOutcome::Breakoff),
            _ => None,
        }
    }
}
