//! Tests for the fight engine, its systems, and the notification contract.

use reelfight_core::commands::FightCommand;
use reelfight_core::constants::*;
use reelfight_core::enums::*;
use reelfight_core::error::FightError;
use reelfight_core::species::{seed_from_id, FightProfile, Species};
use reelfight_core::state::FightState;

use crate::engine::{FightConfig, FightEngine};
use crate::sink::RecordingSink;
use crate::systems;

fn bluefin_tuna() -> Species {
    Species::new(
        "Bluefin Tuna",
        FightProfile {
            jump_probability: Some(8.0),
            jump_frequency_per_min: Some(2.0),
            dive_probability: Some(6.0),
            headshake_intensity: Some(4.0),
            circle_under_boat_probability: Some(7.0),
            ..FightProfile::new(9.0, 9.5, 9.0)
        },
    )
}

fn largemouth_bass() -> Species {
    Species::new(
        "Largemouth Bass",
        FightProfile {
            jump_probability: Some(6.0),
            dive_probability: Some(2.0),
            headshake_intensity: Some(7.0),
            circle_under_boat_probability: Some(1.0),
            ..FightProfile::new(8.0, 2.0, 4.0)
        },
    )
}

/// No optional behaviour, no pull, no run: only baseline decay.
fn sluggish() -> Species {
    Species::new("Sluggish", FightProfile::new(0.0, 0.0, 10.0))
}

/// Maximum burst with full stamina: tension climbs past the breakoff line.
fn bulldozer() -> Species {
    Species::new("Bulldozer", FightProfile::new(10.0, 5.0, 10.0))
}

fn start(species: &Species, difficulty: Difficulty, seed: u64) -> FightEngine {
    FightEngine::start(species, difficulty, FightConfig::with_seed(seed)).unwrap()
}

fn start_recorded(species: &Species, difficulty: Difficulty) -> (FightEngine, RecordingSink) {
    let recorder = RecordingSink::new();
    let engine = FightEngine::start_with_sink(
        species,
        difficulty,
        FightConfig::default(),
        Box::new(recorder.clone()),
    )
    .unwrap();
    (engine, recorder)
}

fn assert_in_range(state: &FightState) {
    for (name, v) in [
        ("tension", state.tension),
        ("line_out", state.line_out),
        ("stamina", state.stamina),
    ] {
        assert!((0.0..=1.0).contains(&v), "{name} out of range: {v}");
    }
}

// ---- Start ----

#[test]
fn test_start_initial_state() {
    let engine = start(&bluefin_tuna(), Difficulty::Medium, 42);
    let state = engine.state();
    assert_eq!(state.elapsed_ms, 0);
    assert_eq!(state.tension, 0.0);
    assert!((state.line_out - 0.19).abs() < 1e-12);
    assert!((state.stamina - 0.96).abs() < 1e-12);
    assert_eq!(state.phase, FightPhase::Running);
    assert_eq!(state.over_tension_ms, 0);
    assert_eq!(state.rng_state, 42);
    assert!(!engine.is_paused());
    assert!(engine.summary().is_none());
}

#[test]
fn test_start_ranges_for_every_difficulty() {
    for species in [bluefin_tuna(), largemouth_bass(), sluggish(), bulldozer()] {
        for difficulty in Difficulty::ALL {
            let engine = start(&species, difficulty, 1);
            assert_in_range(engine.state());
            assert_eq!(
                engine.preset().breakoff_sustain_ms,
                reelfight_behavior::presets::get_preset(difficulty).breakoff_sustain_ms
            );
        }
    }
}

#[test]
fn test_default_seed_comes_from_species_id() {
    let tuna = bluefin_tuna();
    assert_eq!(tuna.id, "bluefin-tuna");
    let engine = FightEngine::start(&tuna, Difficulty::Easy, FightConfig::default()).unwrap();
    assert_eq!(engine.seed(), seed_from_id("bluefin-tuna"));
    assert_eq!(engine.state().rng_state, engine.seed());
}

#[test]
fn test_invalid_profile_fails_at_start() {
    let species = Species::new("Broken", FightProfile::new(12.0, 5.0, 5.0));
    let err = FightEngine::start(&species, Difficulty::Medium, FightConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, FightError::InvalidProfile { ref field, .. } if field == "burst_speed"));

    let mut profile = FightProfile::new(5.0, 5.0, 5.0);
    profile.jump_probability = Some(f64::INFINITY);
    let species = Species::new("Infinite", profile);
    assert!(FightEngine::start(&species, Difficulty::Medium, FightConfig::default()).is_err());
}

#[test]
fn test_invalid_difficulty_is_rejected() {
    let err = "extreme".parse::<Difficulty>().unwrap_err();
    assert_eq!(err, FightError::InvalidDifficulty("extreme".into()));
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let tuna = bluefin_tuna();
    let mut engine_a = start(&tuna, Difficulty::Medium, 12345);
    let mut engine_b = start(&tuna, Difficulty::Medium, 12345);

    for i in 0..2000 {
        if i == 300 {
            engine_a.queue_command(FightCommand::Pause);
            engine_b.queue_command(FightCommand::Pause);
        }
        if i == 350 {
            engine_a.queue_command(FightCommand::Resume);
            engine_b.queue_command(FightCommand::Resume);
        }
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let tuna = bluefin_tuna();
    let mut engine_a = start(&tuna, Difficulty::Medium, 111);
    let mut engine_b = start(&tuna, Difficulty::Medium, 222);

    let mut diverged = false;
    for _ in 0..500 {
        if engine_a.tick() != engine_b.tick() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

#[test]
fn test_fights_are_independent() {
    let tuna = bluefin_tuna();
    let bass = largemouth_bass();

    let mut solo = start(&tuna, Difficulty::Hard, 9);
    let solo_states: Vec<FightState> = (0..500).map(|_| solo.tick()).collect();

    let mut a = start(&tuna, Difficulty::Hard, 9);
    let mut b = start(&bass, Difficulty::Easy, 9);
    for expected in &solo_states {
        b.tick();
        assert_eq!(&a.tick(), expected);
    }
}

#[test]
fn test_engine_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<FightEngine>();
}

// ---- Tick timing ----

#[test]
fn test_elapsed_grows_by_one_tick() {
    let mut engine = start(&bluefin_tuna(), Difficulty::Medium, 5);
    let mut previous = engine.state().elapsed_ms;
    for _ in 0..200 {
        let state = engine.advance().unwrap();
        assert_eq!(state.elapsed_ms, previous + TICK_MS);
        previous = state.elapsed_ms;
    }
    assert_eq!(previous, 200 * 50);
}

#[test]
fn test_twenty_ticks_one_second() {
    let mut engine = start(&largemouth_bass(), Difficulty::Medium, 5);
    for _ in 0..TICK_RATE {
        engine.tick();
    }
    assert_eq!(engine.state().elapsed_ms, 1000);
}

#[test]
fn test_rng_state_tracks_draws() {
    let mut engine = start(&bluefin_tuna(), Difficulty::Medium, 1);
    engine.advance().unwrap();
    // One LCG step from seed 1
    assert_eq!(engine.state().rng_state, 1_103_527_590);
}

// ---- Pause/Resume ----

#[test]
fn test_pause_stops_simulation() {
    let mut engine = start(&bluefin_tuna(), Difficulty::Medium, 77);

    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.state().elapsed_ms, 500);

    engine.queue_command(FightCommand::Pause);
    let frozen = engine.tick();
    for _ in 0..10 {
        assert_eq!(engine.tick(), frozen, "State should not change while paused");
    }
    assert!(engine.is_paused());

    engine.queue_command(FightCommand::Resume);
    for _ in 0..10 {
        engine.tick();
    }
    // No ticks are caught up across the pause
    assert_eq!(engine.state().elapsed_ms, 1000);
}

#[test]
fn test_pause_and_resume_are_idempotent() {
    let mut engine = start(&largemouth_bass(), Difficulty::Hard, 3);
    for _ in 0..25 {
        engine.tick();
    }
    let before = engine.state().clone();

    engine.pause();
    engine.pause();
    assert!(engine.is_paused());
    assert_eq!(engine.state(), &before);

    engine.resume();
    engine.resume();
    assert!(!engine.is_paused());
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_paused_run_matches_uninterrupted_run() {
    let bass = largemouth_bass();
    let mut straight = start(&bass, Difficulty::Medium, 21);
    let mut interrupted = start(&bass, Difficulty::Medium, 21);

    for _ in 0..40 {
        straight.tick();
        interrupted.tick();
    }
    interrupted.pause();
    for _ in 0..100 {
        interrupted.tick();
    }
    interrupted.resume();
    for _ in 0..40 {
        straight.tick();
        interrupted.tick();
    }
    assert_eq!(straight.state(), interrupted.state());
}

// ---- Scenarios ----

#[test]
fn test_baseline_decay_lands_without_breakoff() {
    for difficulty in Difficulty::ALL {
        let mut engine = start(&sluggish(), difficulty, 1);
        let mut ticks = 0;
        while !engine.is_finished() {
            let state = engine.advance().unwrap();
            assert_eq!(state.tension, 0.0);
            assert_eq!(state.over_tension_ms, 0);
            assert_eq!(state.last_event, None);
            ticks += 1;
            assert!(ticks < 1000, "{difficulty} never landed");
        }
        assert_eq!(engine.phase(), FightPhase::Landed);
        assert!(engine.state().stamina < LANDED_STAMINA);
    }
}

#[test]
fn test_max_burst_breaks_off_quickly_on_hard() {
    let mut engine = start(&bulldozer(), Difficulty::Hard, 1);
    let mut peak_over = 0;
    let mut ticks = 0;
    while !engine.is_finished() && ticks < 40 {
        let state = engine.advance().unwrap();
        peak_over = peak_over.max(state.over_tension_ms);
        ticks += 1;
    }
    assert_eq!(engine.phase(), FightPhase::Breakoff);
    assert!(ticks <= 20, "breakoff took {ticks} ticks");
    assert!(peak_over >= 150);

    let summary = engine.summary().unwrap();
    assert_eq!(summary.outcome, FightOutcome::Breakoff);
    assert!(!summary.landed);
    assert_eq!(summary.breakoffs, 1);
    assert_eq!(summary.duration_ms, ticks * TICK_MS);
}

#[test]
fn test_easier_difficulty_sustains_longer() {
    let run = |difficulty| {
        let mut engine = start(&bulldozer(), difficulty, 1);
        engine.run_to_completion(MAX_FIGHT_TICKS).unwrap();
        engine.state().elapsed_ms
    };
    assert!(run(Difficulty::Easy) > run(Difficulty::Hard));
}

#[test]
fn test_first_jump_is_reproducible() {
    let first_jump = || {
        let mut engine = start(&bluefin_tuna(), Difficulty::Medium, 42);
        (1..=1000u64)
            .find(|_| engine.advance().unwrap().last_event == Some(FightEvent::Jump))
            .unwrap()
    };
    let tick = first_jump();
    assert_eq!(tick, 12);
    for _ in 0..5 {
        assert_eq!(first_jump(), tick);
    }
}

#[test]
fn test_advance_after_landed_is_rejected() {
    let mut engine = start(&sluggish(), Difficulty::Medium, 1);
    assert_eq!(
        engine.run_to_completion(MAX_FIGHT_TICKS).unwrap(),
        Some(FightOutcome::Landed)
    );
    let before = engine.state().clone();

    let err = engine.advance().unwrap_err();
    assert_eq!(
        err,
        FightError::TickAfterTerminal {
            phase: FightPhase::Landed
        }
    );
    assert_eq!(engine.state(), &before);

    // The scheduler-facing tick is a quiet no-op
    assert_eq!(engine.tick(), before);
}

#[test]
fn test_every_fight_ends_within_tick_limit() {
    // This profile strips line faster than tension can win it back.
    let mut engine = start(&bluefin_tuna(), Difficulty::Medium, 42);
    let outcome = engine.run_to_completion(MAX_FIGHT_TICKS).unwrap();
    assert!(outcome.is_some());
    assert!(engine.state().elapsed_ms <= MAX_FIGHT_TICKS * TICK_MS);
}

#[test]
fn test_bass_lands() {
    let mut engine = FightEngine::start(
        &largemouth_bass(),
        Difficulty::Medium,
        FightConfig::default(),
    )
    .unwrap();
    let outcome = engine.run_to_completion(MAX_FIGHT_TICKS).unwrap();
    assert_eq!(outcome, Some(FightOutcome::Landed));
    let summary = engine.summary().unwrap();
    assert!(summary.landed);
    assert_eq!(summary.breakoffs, 0);
    assert_eq!(summary.species_id, "largemouth-bass");
}

// ---- Controls ----

#[test]
fn test_end_forces_terminal_state() {
    let mut engine = start(&bluefin_tuna(), Difficulty::Medium, 8);
    for _ in 0..30 {
        engine.tick();
    }
    engine.queue_command(FightCommand::End {
        outcome: FightOutcome::Landed,
    });
    let state = engine.tick();
    assert_eq!(state.phase, FightPhase::Landed);
    assert_eq!(state.last_event, None);
    assert_eq!(state.elapsed_ms, 30 * TICK_MS);
    assert!(engine.summary().unwrap().landed);

    // Ending again changes nothing
    engine.end(FightOutcome::Breakoff);
    assert_eq!(engine.phase(), FightPhase::Landed);
    assert!(matches!(
        engine.advance(),
        Err(FightError::TickAfterTerminal { .. })
    ));
}

#[test]
fn test_reset_restores_start_state() {
    let bulldozer = bulldozer();
    let mut engine = start(&bulldozer, Difficulty::Hard, 1);
    let initial = engine.state().clone();

    engine.run_to_completion(MAX_FIGHT_TICKS).unwrap();
    let first_duration = engine.state().elapsed_ms;
    engine.pause();

    engine.queue_command(FightCommand::Reset);
    engine.queue_command(FightCommand::Pause);
    engine.tick();
    assert_eq!(engine.state(), &initial);
    assert!(engine.summary().is_none());

    engine.reset();
    assert!(!engine.is_paused());
    engine.run_to_completion(MAX_FIGHT_TICKS).unwrap();
    assert_eq!(engine.state().elapsed_ms, first_duration);
    assert_eq!(engine.summary().unwrap().breakoffs, 2);
}

// ---- Notifications ----

#[test]
fn test_run_start_is_first_notification() {
    let (mut engine, recorder) = start_recorded(&largemouth_bass(), Difficulty::Medium);
    assert_eq!(recorder.kinds(), vec![FeedbackKind::RunStart]);
    engine.tick();
    engine.reset();
    assert_eq!(recorder.kinds().last(), Some(&FeedbackKind::RunStart));
}

#[test]
fn test_notification_per_tick_matches_state() {
    let (mut engine, recorder) = start_recorded(&largemouth_bass(), Difficulty::Medium);
    recorder.take();

    while !engine.is_finished() {
        let state = engine.advance().unwrap().clone();
        let kinds: Vec<FeedbackKind> = recorder.take().iter().map(|n| n.kind).collect();

        let events = kinds
            .iter()
            .filter(|k| {
                matches!(
                    k,
                    FeedbackKind::Jump
                        | FeedbackKind::Dive
                        | FeedbackKind::Headshake
                        | FeedbackKind::CircleTick
                )
            })
            .count();
        assert!(events <= 1, "more than one event in a tick: {kinds:?}");

        match (state.last_event, state.phase) {
            (Some(event), _) => assert_eq!(kinds[0], FeedbackKind::from(event)),
            (None, FightPhase::Running) => assert_eq!(kinds, vec![FeedbackKind::RunTick]),
            (None, FightPhase::Circling) => assert_eq!(kinds, vec![FeedbackKind::CircleTick]),
            (None, FightPhase::Landed) => assert_eq!(kinds, vec![FeedbackKind::Landed]),
            (None, FightPhase::Breakoff) => assert_eq!(kinds, vec![FeedbackKind::Breakoff]),
            (None, phase) => assert!(kinds.is_empty(), "unexpected {kinds:?} in {phase:?}"),
        }
    }
}

#[test]
fn test_single_terminal_notification() {
    let (mut engine, recorder) = start_recorded(&bulldozer(), Difficulty::Hard);
    engine.run_to_completion(MAX_FIGHT_TICKS).unwrap();
    let _ = engine.advance();
    engine.tick();

    let kinds = recorder.kinds();
    let terminal: Vec<_> = kinds
        .iter()
        .filter(|k| matches!(k, FeedbackKind::Landed | FeedbackKind::Breakoff))
        .collect();
    assert_eq!(terminal, vec![&FeedbackKind::Breakoff]);
    assert_eq!(kinds.last(), Some(&FeedbackKind::Breakoff));
}

#[test]
fn test_live_flags_pass_through() {
    let (mut engine, recorder) = start_recorded(&largemouth_bass(), Difficulty::Easy);
    engine.queue_commands([
        FightCommand::SetHaptics { enabled: false },
        FightCommand::SetFeedbackMode {
            mode: FeedbackMode::AndroidContinuous,
        },
    ]);
    recorder.take();
    let state = engine.tick();

    let log = recorder.notifications();
    assert!(!log.is_empty());
    for n in &log {
        assert!(!n.haptics_enabled);
        assert_eq!(n.mode, FeedbackMode::AndroidContinuous);
        assert_eq!(n.tension, Some(state.tension));
    }
    assert!(!engine.haptics_enabled());
    assert_eq!(engine.feedback_mode(), FeedbackMode::AndroidContinuous);
}

// ---- Systems ----

#[test]
fn test_tension_drifts_quarter_of_gap() {
    let engine = start(&sluggish(), Difficulty::Medium, 1);
    let mut state = engine.state().clone();
    systems::tension::run(&mut state, 0.8);
    assert!((state.tension - 0.2).abs() < 1e-12);
    systems::tension::run(&mut state, 0.8);
    assert!((state.tension - 0.35).abs() < 1e-12);
}

#[test]
fn test_over_tension_timer_resets() {
    let engine = start(&sluggish(), Difficulty::Medium, 1);
    let mut state = engine.state().clone();
    state.tension = 0.95;
    systems::tension::track_over_tension(&mut state);
    systems::tension::track_over_tension(&mut state);
    assert_eq!(state.over_tension_ms, 100);
    state.tension = 0.92;
    systems::tension::track_over_tension(&mut state);
    assert_eq!(state.over_tension_ms, 0);
}

#[test]
fn test_breakoff_beats_landing() {
    let engine = start(&sluggish(), Difficulty::Hard, 1);
    let mut state = engine.state().clone();
    state.stamina = 0.0;
    state.line_out = 0.0;
    state.over_tension_ms = 150;
    let outcome = systems::termination::run(&mut state, engine.preset());
    assert_eq!(outcome, Some(FightOutcome::Breakoff));
    assert_eq!(state.phase, FightPhase::Breakoff);
}

#[test]
fn test_line_and_stamina_clamp() {
    let engine = start(&bulldozer(), Difficulty::Hard, 1);
    let mut state = engine.state().clone();
    state.line_out = 0.999;
    state.stamina = 1.0;
    systems::line::run(&mut state, engine.params());
    assert_eq!(state.line_out, 1.0);

    state.stamina = 0.001;
    state.tension = 1.0;
    systems::stamina::run(&mut state, engine.preset());
    assert_eq!(state.stamina, 0.0);
}

#[test]
fn test_base_force_scales_with_stamina() {
    let engine = start(&bulldozer(), Difficulty::Medium, 1);
    let params = engine.params();
    assert!((systems::behavior::base_force(params, 1.0) - 1.0).abs() < 1e-12);
    assert!((systems::behavior::base_force(params, 0.0) - 0.4).abs() < 1e-12);
}
