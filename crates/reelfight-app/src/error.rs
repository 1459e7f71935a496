//! Application-level errors: everything that can go wrong around a fight
//! rather than inside it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use reelfight_core::error::FightError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fight(#[from] FightError),
    #[error("{0}")]
    Usage(String),
    #[error("fight loop already running")]
    AlreadyRunning,
    #[error("fight loop not started")]
    NotRunning,
    #[error("fight loop has stopped")]
    LoopStopped,
    #[error("fight loop thread panicked")]
    LoopPanicked,
    #[error("shared state lock poisoned")]
    Poisoned,
}
