//! Fight loop thread: runs one fight engine at 20Hz on a real clock.
//!
//! The engine moves into the thread and comes back out through the join
//! handle once the loop ends. Commands arrive via `mpsc` channel and are
//! applied at the next tick boundary. The latest snapshot is stored in shared
//! state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use reelfight_core::constants::TICK_MS;
use reelfight_core::state::FightState;
use reelfight_sim::FightEngine;

use crate::error::AppError;
use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_MS);

/// How the loop is paced and when it stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    pub tick_duration: Duration,
    /// Exit as soon as the fight reaches a terminal phase. Otherwise the loop
    /// idles on the finished fight until `Shutdown` (so `Reset` still works).
    pub stop_at_end: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_duration: TICK_DURATION,
            stop_at_end: true,
        }
    }
}

/// Spawns the fight loop in a new thread.
///
/// Returns the command sender and a handle that yields the engine back when
/// the loop exits.
pub fn spawn_fight_loop(
    engine: FightEngine,
    latest_snapshot: Arc<Mutex<Option<FightState>>>,
    config: LoopConfig,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<FightEngine>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name(format!("reelfight-{}", engine.species_id()))
        .spawn(move || run_fight_loop(engine, cmd_rx, &latest_snapshot, config))?;

    Ok((cmd_tx, handle))
}

/// The fight loop. Runs until Shutdown, channel disconnect, or (with
/// `stop_at_end`) the end of the fight.
fn run_fight_loop(
    mut engine: FightEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FightState>>,
    config: LoopConfig,
) -> FightEngine {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Fight(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return engine,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return engine,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        let finished = snapshot.is_terminal();

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished && config.stop_at_end {
            return engine;
        }

        // 4. Sleep until next tick. Missed ticks are dropped, never replayed.
        next_tick_time += config.tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else {
            next_tick_time = now;
        }
    }
}
