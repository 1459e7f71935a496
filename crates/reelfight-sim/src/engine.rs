//! Fight engine: the core of the simulation.
//!
//! `FightEngine` owns one fight's state, RNG and notification sink, runs the
//! per-tick systems, and exposes the synchronous controls a scheduler needs
//! (`advance`, `pause`, `resume`, `end`, `reset`). Completely headless, so
//! any clock (real, test or manual stepping) can drive it.

use std::collections::VecDeque;

use reelfight_core::commands::FightCommand;
use reelfight_core::constants::TICK_MS;
use reelfight_core::enums::{Difficulty, FeedbackKind, FeedbackMode, FightOutcome, FightPhase};
use reelfight_core::error::FightError;
use reelfight_core::species::{FightParams, Species};
use reelfight_core::state::{FightState, FightSummary};

use reelfight_behavior::presets::{get_preset, DifficultyPreset};

use crate::rng::FightRng;
use crate::sink::{NotificationSink, NullSink};
use crate::systems;

/// Configuration for starting a new fight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FightConfig {
    /// RNG seed. `None` derives one from the species id.
    pub seed: Option<u64>,
    /// Passed through to the sink on every notification.
    pub haptics_enabled: bool,
    /// Passed through to the sink on every notification.
    pub feedback_mode: FeedbackMode,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            seed: None,
            haptics_enabled: true,
            feedback_mode: FeedbackMode::default(),
        }
    }
}

impl FightConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// The fight engine. Owns the fight state and everything that mutates it.
pub struct FightEngine {
    species_id: String,
    difficulty: Difficulty,
    params: FightParams,
    preset: DifficultyPreset,
    seed: u64,
    rng: FightRng,
    state: FightState,
    paused: bool,
    haptics_enabled: bool,
    feedback_mode: FeedbackMode,
    breakoffs: u32,
    summary: Option<FightSummary>,
    command_queue: VecDeque<FightCommand>,
    sink: Box<dyn NotificationSink>,
}

impl FightEngine {
    /// Start a fight with no notification sink.
    pub fn start(
        species: &Species,
        difficulty: Difficulty,
        config: FightConfig,
    ) -> Result<Self, FightError> {
        Self::start_with_sink(species, difficulty, config, Box::new(NullSink))
    }

    /// Start a fight that reports to `sink`. Validates the profile and emits
    /// `run_start`.
    pub fn start_with_sink(
        species: &Species,
        difficulty: Difficulty,
        config: FightConfig,
        sink: Box<dyn NotificationSink>,
    ) -> Result<Self, FightError> {
        let params = FightParams::from_profile(&species.fight_profile)?;
        let preset = get_preset(difficulty);
        let seed = config.seed.unwrap_or_else(|| species.default_seed());
        let rng = FightRng::new(seed);
        let state = FightState::initial(&params, rng.state());

        let mut engine = Self {
            species_id: species.id.clone(),
            difficulty,
            params,
            preset,
            seed,
            rng,
            state,
            paused: false,
            haptics_enabled: config.haptics_enabled,
            feedback_mode: config.feedback_mode,
            breakoffs: 0,
            summary: None,
            command_queue: VecDeque::new(),
            sink,
        };

        log::info!(
            "fight started: species={} difficulty={} seed={}",
            engine.species_id,
            engine.difficulty,
            engine.seed
        );
        engine.emit(FeedbackKind::RunStart);
        Ok(engine)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: FightCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FightCommand>) {
        self.command_queue.extend(commands);
    }

    /// Scheduler entry point: process queued commands, advance one step if
    /// the fight is live and not paused, and return the resulting snapshot.
    pub fn tick(&mut self) -> FightState {
        self.process_commands();

        if !self.paused && !self.state.is_terminal() {
            // Cannot fail: the state was just checked to be live.
            let _ = self.advance();
        }

        self.state.clone()
    }

    /// Advance the fight by exactly one tick.
    ///
    /// Ignores the pause flag; pausing only stops `tick` from calling this.
    /// Rejects terminal states without touching them.
    pub fn advance(&mut self) -> Result<&FightState, FightError> {
        if self.state.is_terminal() {
            log::warn!(
                "advance() called on finished fight {} ({:?})",
                self.species_id,
                self.state.phase
            );
            return Err(FightError::TickAfterTerminal {
                phase: self.state.phase,
            });
        }

        let roll = self.rng.next_unit();
        self.state.rng_state = self.rng.state();

        self.run_systems(roll);
        self.state.elapsed_ms += TICK_MS;

        if let Some(event) = self.state.last_event {
            log::debug!(
                "{} {:?} at {}ms (tension {:.3})",
                self.species_id,
                event,
                self.state.elapsed_ms,
                self.state.tension
            );
        }

        self.notify_tick();

        if let Some(outcome) = self.state.outcome() {
            self.finish(outcome);
        }

        Ok(&self.state)
    }

    /// Advance until the fight ends or `max_ticks` steps have run. Returns
    /// the outcome, or `None` if the cap was hit first.
    pub fn run_to_completion(
        &mut self,
        max_ticks: u64,
    ) -> Result<Option<FightOutcome>, FightError> {
        let mut ticks = 0;
        while !self.state.is_terminal() && ticks < max_ticks {
            self.advance()?;
            ticks += 1;
        }
        Ok(self.state.outcome())
    }

    /// Suspend ticking. Idempotent; no state field changes.
    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("fight paused at {}ms", self.state.elapsed_ms);
        }
        self.paused = true;
    }

    /// Continue ticking from the exact paused state. Idempotent.
    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("fight resumed at {}ms", self.state.elapsed_ms);
        }
        self.paused = false;
    }

    /// Force the fight to end with `outcome`. No-op once already terminal.
    pub fn end(&mut self, outcome: FightOutcome) {
        if self.state.is_terminal() {
            return;
        }
        self.state.phase = outcome.phase();
        self.state.last_event = None;
        self.finish(outcome);
    }

    /// Restart the fight for the same species, difficulty and seed.
    pub fn reset(&mut self) {
        self.rng = FightRng::new(self.seed);
        self.state = FightState::initial(&self.params, self.rng.state());
        self.paused = false;
        self.summary = None;
        log::info!("fight reset: species={}", self.species_id);
        self.emit(FeedbackKind::RunStart);
    }

    // ---- Accessors ----

    /// Latest snapshot.
    pub fn state(&self) -> &FightState {
        &self.state
    }

    pub fn phase(&self) -> FightPhase {
        self.state.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn species_id(&self) -> &str {
        &self.species_id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn params(&self) -> &FightParams {
        &self.params
    }

    pub fn preset(&self) -> &DifficultyPreset {
        &self.preset
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Summary of the most recent finished attempt.
    pub fn summary(&self) -> Option<&FightSummary> {
        self.summary.as_ref()
    }

    pub fn haptics_enabled(&self) -> bool {
        self.haptics_enabled
    }

    pub fn set_haptics_enabled(&mut self, enabled: bool) {
        self.haptics_enabled = enabled;
    }

    pub fn feedback_mode(&self) -> FeedbackMode {
        self.feedback_mode
    }

    pub fn set_feedback_mode(&mut self, mode: FeedbackMode) {
        self.feedback_mode = mode;
    }

    // ---- Internals ----

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: FightCommand) {
        match command {
            FightCommand::Pause => self.pause(),
            FightCommand::Resume => self.resume(),
            FightCommand::End { outcome } => self.end(outcome),
            FightCommand::Reset => self.reset(),
            FightCommand::SetHaptics { enabled } => self.set_haptics_enabled(enabled),
            FightCommand::SetFeedbackMode { mode } => self.set_feedback_mode(mode),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, roll: f64) {
        // 1. Behaviour roll, event effects, target tension
        let target = systems::behavior::run(&mut self.state, &self.params, &self.preset, roll);
        // 2. Tension drift
        systems::tension::run(&mut self.state, target);
        // 3. Line paid out / recovered
        systems::line::run(&mut self.state, &self.params);
        // 4. Stamina decay
        systems::stamina::run(&mut self.state, &self.preset);
        // 5. Over-tension timer
        systems::tension::track_over_tension(&mut self.state);
        // 6. Breakoff / landed
        systems::termination::run(&mut self.state, &self.preset);
    }

    /// Report the tick: the event if one fired, otherwise the steady-state
    /// tick for running or circling, then the outcome if the fight ended.
    fn notify_tick(&mut self) {
        match (self.state.last_event, self.state.phase) {
            (Some(event), _) => self.emit(event.into()),
            (None, FightPhase::Running) => self.emit(FeedbackKind::RunTick),
            (None, FightPhase::Circling) => self.emit(FeedbackKind::CircleTick),
            _ => {}
        }
        if let Some(outcome) = self.state.outcome() {
            self.emit(outcome.into());
        }
    }

    fn emit(&mut self, kind: FeedbackKind) {
        self.sink.notify(
            kind,
            self.haptics_enabled,
            self.feedback_mode,
            Some(self.state.tension),
        );
    }

    fn finish(&mut self, outcome: FightOutcome) {
        if outcome == FightOutcome::Breakoff {
            self.breakoffs += 1;
        }
        log::info!(
            "fight over: species={} outcome={:?} after {}ms",
            self.species_id,
            outcome,
            self.state.elapsed_ms
        );
        self.summary = Some(FightSummary {
            species_id: self.species_id.clone(),
            difficulty: self.difficulty,
            duration_ms: self.state.elapsed_ms,
            landed: outcome == FightOutcome::Landed,
            breakoffs: self.breakoffs,
            outcome,
        });
    }
}
