//! reelfight: run a fishing fight from the command line.
//!
//! Prints the final `FightSummary` as JSON on stdout. Logs go to stderr via
//! `env_logger` (`RUST_LOG=debug` shows every behaviour event).

use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use reelfight_app::cli::{self, Command, RunArgs};
use reelfight_app::game_loop::LoopConfig;
use reelfight_app::state::AppState;
use reelfight_app::AppError;
use reelfight_core::constants::{MAX_FIGHT_TICKS, TICK_MS};
use reelfight_core::enums::{Difficulty, FeedbackMode};
use reelfight_core::species::{parse_species, FightProfile, Species};
use reelfight_core::state::FightSummary;
use reelfight_sim::sink::{HapticPlanner, HapticPulse, ManualClock, SystemClock};
use reelfight_sim::{FightConfig, FightEngine};

/// How often the real-time mode logs progress.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = cli::parse_args(&args).and_then(|command| match command {
        Command::Run(run) => cmd_run(&run),
        Command::Demo => cmd_demo(),
        Command::Help => {
            eprint!("{}", cli::USAGE);
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        if matches!(e, AppError::Usage(_)) {
            eprint!("\n{}", cli::USAGE);
        }
        process::exit(1);
    }
}

fn log_pulse(pulse: HapticPulse, mode: FeedbackMode) {
    log::info!("haptic {pulse:?} ({mode:?})");
}

fn cmd_run(run: &RunArgs) -> Result<(), AppError> {
    let species = load_species(&run.species_path)?;
    let config = FightConfig {
        seed: run.seed,
        haptics_enabled: run.haptics,
        feedback_mode: run.mode,
    };

    let engine = if run.fast {
        run_fast(&species, run.difficulty, config)?
    } else {
        run_realtime(&species, run.difficulty, config)?
    };

    print_json(&engine.summary())
}

fn load_species(path: &Path) -> Result<Species, AppError> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_species(&json)?)
}

/// Step the fight back to back. Haptic throttling follows simulated time.
fn run_fast(
    species: &Species,
    difficulty: Difficulty,
    config: FightConfig,
) -> Result<FightEngine, AppError> {
    let clock = ManualClock::default();
    let planner = HapticPlanner::new(clock.clone(), log_pulse);
    let mut engine = FightEngine::start_with_sink(species, difficulty, config, Box::new(planner))?;

    while !engine.is_finished() {
        engine.advance()?;
        clock.advance(TICK_MS);
    }
    Ok(engine)
}

/// Run the fight on the 20Hz loop thread, taking commands from stdin.
fn run_realtime(
    species: &Species,
    difficulty: Difficulty,
    config: FightConfig,
) -> Result<FightEngine, AppError> {
    let planner = HapticPlanner::new(SystemClock::default(), log_pulse);
    let engine = FightEngine::start_with_sink(species, difficulty, config, Box::new(planner))?;

    let app = Arc::new(AppState::new());
    app.start_fight(engine, LoopConfig::default())?;
    spawn_input(app.clone())?;

    while app.is_running() {
        std::thread::sleep(PROGRESS_INTERVAL);
        if let Some(state) = app.snapshot()? {
            log::info!(
                "{:>6}ms  tension {:.2}  line {:.2}  stamina {:.2}  {:?}",
                state.elapsed_ms,
                state.tension,
                state.line_out,
                state.stamina,
                state.phase
            );
        }
    }
    app.wait()
}

fn spawn_input(app: Arc<AppState>) -> Result<(), AppError> {
    std::thread::Builder::new()
        .name("reelfight-input".into())
        .spawn(move || {
            for line in std::io::stdin().lines() {
                let Ok(line) = line else { break };
                let Some(command) = cli::parse_input(&line) else {
                    if !line.trim().is_empty() {
                        log::warn!("unknown input: {}", line.trim());
                    }
                    continue;
                };
                if app.send_command(command).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

fn cmd_demo() -> Result<(), AppError> {
    let mut summaries: Vec<FightSummary> = Vec::new();
    for species in demo_species() {
        for difficulty in Difficulty::ALL {
            let mut engine = FightEngine::start(&species, difficulty, FightConfig::default())?;
            engine.run_to_completion(MAX_FIGHT_TICKS)?;
            summaries.extend(engine.summary().cloned());
        }
    }
    print_json(&summaries)
}

fn demo_species() -> Vec<Species> {
    vec![
        Species::new(
            "Largemouth Bass",
            FightProfile {
                jump_probability: Some(6.0),
                dive_probability: Some(2.0),
                headshake_intensity: Some(7.0),
                circle_under_boat_probability: Some(1.0),
                ..FightProfile::new(8.0, 2.0, 4.0)
            },
        ),
        Species::new(
            "Rainbow Trout",
            FightProfile {
                jump_probability: Some(7.0),
                jump_frequency_per_min: Some(3.0),
                dive_probability: Some(1.0),
                headshake_intensity: Some(5.0),
                ..FightProfile::new(6.0, 2.5, 5.0)
            },
        ),
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
        ),
    ]
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
