//! Application state shared between the front end and the fight loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use reelfight_core::commands::FightCommand;
use reelfight_core::state::FightState;
use reelfight_sim::FightEngine;

use crate::error::AppError;
use crate::game_loop::{self, LoopConfig};

/// Commands sent from the front end to the fight loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A fight command to forward to the engine.
    Fight(FightCommand),
    /// Shut down the fight loop thread gracefully.
    Shutdown,
}

/// Handle on the (at most one) running fight loop.
///
/// `AppState` is `Send + Sync`, so input threads can share it behind an
/// `Arc`:
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - The latest snapshot is an `Arc<Mutex<...>>` shared with the loop thread
pub struct AppState {
    /// `None` before `start_fight` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<FightState>>>,
    handle: Mutex<Option<JoinHandle<FightEngine>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the fight loop for `engine`. Fails if one is already running.
    pub fn start_fight(&self, engine: FightEngine, config: LoopConfig) -> Result<(), AppError> {
        let mut handle = self.handle.lock().map_err(|_| AppError::Poisoned)?;
        if handle.is_some() {
            return Err(AppError::AlreadyRunning);
        }

        let (cmd_tx, join) =
            game_loop::spawn_fight_loop(engine, self.latest_snapshot.clone(), config)?;

        *self.command_tx.lock().map_err(|_| AppError::Poisoned)? = Some(cmd_tx);
        *handle = Some(join);
        Ok(())
    }

    /// Forward a command to the running fight.
    pub fn send_command(&self, command: FightCommand) -> Result<(), AppError> {
        self.send(GameLoopCommand::Fight(command))
    }

    /// Ask the loop to stop after the current tick.
    pub fn shutdown(&self) -> Result<(), AppError> {
        self.send(GameLoopCommand::Shutdown)
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<FightState>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Whether a loop has been started and has not yet exited.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .map(|h| h.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Block until the loop exits and take the engine back.
    pub fn wait(&self) -> Result<FightEngine, AppError> {
        let join = self
            .handle
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take()
            .ok_or(AppError::NotRunning)?;
        let engine = join.join().map_err(|_| AppError::LoopPanicked)?;
        *self.command_tx.lock().map_err(|_| AppError::Poisoned)? = None;
        Ok(engine)
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::LoopStopped),
            None => Err(AppError::NotRunning),
        }
    }
}
