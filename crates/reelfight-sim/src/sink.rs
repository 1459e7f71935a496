//! Notification sinks: the engine's only outward side effect.
//!
//! The engine calls its sink once per meaningful event and performs no
//! throttling itself. Each sink owns whatever timing state it needs; nothing
//! is shared between fights.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use reelfight_core::constants::HAPTIC_THROTTLE_MS;
use reelfight_core::enums::{FeedbackKind, FeedbackMode};
use reelfight_core::events::Notification;

/// Receiver of fight notifications. Must tolerate calls at the tick rate.
pub trait NotificationSink: Send {
    fn notify(
        &mut self,
        kind: FeedbackKind,
        haptics_enabled: bool,
        mode: FeedbackMode,
        tension: Option<f64>,
    );
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _: FeedbackKind, _: bool, _: FeedbackMode, _: Option<f64>) {}
}

/// Records every notification. Clones share the same log, so a test can keep
/// a handle while the engine owns the sink.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Recorded kinds, in order.
    pub fn kinds(&self) -> Vec<FeedbackKind> {
        self.notifications().iter().map(|n| n.kind).collect()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Notification> {
        self.log
            .lock()
            .map(|mut log| std::mem::take(&mut *log))
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(
        &mut self,
        kind: FeedbackKind,
        haptics_enabled: bool,
        mode: FeedbackMode,
        tension: Option<f64>,
    ) {
        if let Ok(mut log) = self.log.lock() {
            log.push(Notification {
                kind,
                haptics_enabled,
                mode,
                tension,
            });
        }
    }
}

// ---- Haptics ----

/// Abstract physical feedback. A platform layer maps these to hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticPulse {
    ImpactMedium,
    ImpactLight,
    Warning,
    Success,
    Error,
}

/// Millisecond time source for throttling.
pub trait Clock: Send {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and replays. Clones share the same time.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Turns notifications into haptic pulses.
///
/// Run and circle ticks are throttled to one pulse per 300 ms; headshake,
/// dive and jump always pulse and restart the throttle window; terminal
/// outcomes always pulse. Nothing is emitted while haptics are disabled.
pub struct HapticPlanner<C, F> {
    clock: C,
    last_pulse_ms: Option<u64>,
    on_pulse: F,
}

impl<C, F> HapticPlanner<C, F>
where
    C: Clock,
    F: FnMut(HapticPulse, FeedbackMode) + Send,
{
    pub fn new(clock: C, on_pulse: F) -> Self {
        Self {
            clock,
            last_pulse_ms: None,
            on_pulse,
        }
    }

    fn throttle_open(&self, now: u64) -> bool {
        match self.last_pulse_ms {
            Some(last) => now.saturating_sub(last) > HAPTIC_THROTTLE_MS,
            None => true,
        }
    }
}

impl<C, F> NotificationSink for HapticPlanner<C, F>
where
    C: Clock,
    F: FnMut(HapticPulse, FeedbackMode) + Send,
{
    fn notify(
        &mut self,
        kind: FeedbackKind,
        haptics_enabled: bool,
        mode: FeedbackMode,
        _tension: Option<f64>,
    ) {
        if !haptics_enabled {
            return;
        }
        let now = self.clock.now_ms();

        let pulse = match kind {
            FeedbackKind::RunStart | FeedbackKind::RunTick | FeedbackKind::CircleTick => {
                if !self.throttle_open(now) {
                    return;
                }
                self.last_pulse_ms = Some(now);
                HapticPulse::ImpactMedium
            }
            FeedbackKind::Headshake | FeedbackKind::Dive => {
                self.last_pulse_ms = Some(now);
                HapticPulse::Warning
            }
            FeedbackKind::Jump => {
                self.last_pulse_ms = Some(now);
                HapticPulse::ImpactLight
            }
            FeedbackKind::Landed => HapticPulse::Success,
            FeedbackKind::Breakoff => HapticPulse::Error,
        };

        log::trace!("haptic pulse {pulse:?} for {kind:?} at {now}ms");
        (self.on_pulse)(pulse, mode);
    }
}
