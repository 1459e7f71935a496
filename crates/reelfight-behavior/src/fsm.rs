//! Fish behaviour finite state machine.
//!
//! Pure function that picks the fish's phase for the coming tick from a
//! single random roll. No engine dependency: operates on plain data.
//!
//! Candidate events are checked in a fixed order (jump, dive, headshake,
//! circle) and the first one whose chance exceeds the roll wins. Every check
//! uses the same roll, so at most one event can fire per tick.

use reelfight_core::constants::*;
use reelfight_core::enums::{FightEvent, FightPhase};
use reelfight_core::species::FightParams;

use crate::presets::DifficultyPreset;

/// Input to the behaviour FSM for one tick.
pub struct BehaviorContext {
    pub phase: FightPhase,
    /// Random draw in [0, 1).
    pub roll: f64,
    pub params: FightParams,
    pub preset: DifficultyPreset,
}

/// Output from the behaviour FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorUpdate {
    pub new_phase: FightPhase,
    pub event: Option<FightEvent>,
    /// Multiplier applied to the tick's target tension.
    pub tension_factor: f64,
    /// Stamina spent by the event (already scaled by difficulty).
    pub stamina_cost: f64,
    /// Line stripped by the event.
    pub line_surge: f64,
}

impl BehaviorUpdate {
    fn settle(phase: FightPhase) -> Self {
        Self {
            new_phase: phase,
            event: None,
            tension_factor: 1.0,
            stamina_cost: 0.0,
            line_surge: 0.0,
        }
    }

    fn event(event: FightEvent, tension_factor: f64) -> Self {
        Self {
            new_phase: event.phase(),
            event: Some(event),
            tension_factor,
            stamina_cost: 0.0,
            line_surge: 0.0,
        }
    }

    pub fn phase_changed(&self, from: FightPhase) -> bool {
        self.new_phase != from
    }
}

/// Evaluate the FSM for one tick.
pub fn evaluate(ctx: &BehaviorContext) -> BehaviorUpdate {
    // Terminal states: no transitions
    if ctx.phase.is_terminal() {
        return BehaviorUpdate::settle(ctx.phase);
    }

    try_jump(ctx)
        .or_else(|| try_dive(ctx))
        .or_else(|| try_headshake(ctx))
        .or_else(|| try_circle(ctx))
        .unwrap_or_else(|| BehaviorUpdate::settle(FightPhase::Running))
}

/// Whether an event with the given probability fires on this roll. A zero
/// probability never fires, and a fish never re-enters the phase it is in.
fn fires(ctx: &BehaviorContext, phase: FightPhase, probability: f64, factor: f64) -> bool {
    ctx.phase != phase && probability > 0.0 && ctx.roll < probability * factor
}

fn try_jump(ctx: &BehaviorContext) -> Option<BehaviorUpdate> {
    if !fires(ctx, FightPhase::Jumping, ctx.params.jump, JUMP_CHANCE_FACTOR) {
        return None;
    }
    Some(BehaviorUpdate {
        stamina_cost: JUMP_STAMINA_COST * ctx.preset.jump_stamina_loss_multiplier,
        ..BehaviorUpdate::event(FightEvent::Jump, JUMP_TENSION_FACTOR)
    })
}

fn try_dive(ctx: &BehaviorContext) -> Option<BehaviorUpdate> {
    if !fires(ctx, FightPhase::Diving, ctx.params.dive, DIVE_CHANCE_FACTOR) {
        return None;
    }
    Some(BehaviorUpdate {
        line_surge: DIVE_LINE_SURGE,
        ..BehaviorUpdate::event(FightEvent::Dive, DIVE_TENSION_FACTOR)
    })
}

fn try_headshake(ctx: &BehaviorContext) -> Option<BehaviorUpdate> {
    fires(
        ctx,
        FightPhase::Headshake,
        ctx.params.shake,
        HEADSHAKE_CHANCE_FACTOR,
    )
    .then(|| BehaviorUpdate::event(FightEvent::Headshake, HEADSHAKE_TENSION_FACTOR))
}

fn try_circle(ctx: &BehaviorContext) -> Option<BehaviorUpdate> {
    fires(
        ctx,
        FightPhase::Circling,
        ctx.params.circle,
        CIRCLE_CHANCE_FACTOR,
    )
    .then(|| BehaviorUpdate::event(FightEvent::CircleTick, CIRCLE_TENSION_FACTOR))
}
