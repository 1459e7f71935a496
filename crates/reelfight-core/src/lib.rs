//! Core types and definitions for the reelfight simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! species profiles, commands, state snapshots, notifications, errors and
//! constants. It has no dependency on any scheduler or runtime.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod species;
pub mod state;

pub use error::FightError;
