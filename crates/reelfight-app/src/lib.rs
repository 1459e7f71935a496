//! reelfight application layer.
//!
//! Drives fights on a real clock, on their own thread, and provides the
//! command-line front end.

pub mod cli;
pub mod error;
pub mod game_loop;
pub mod state;

pub use error::AppError;
pub use reelfight_core as core;
