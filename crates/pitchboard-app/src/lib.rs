//! Pitchboard command line shell.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{AppError, Result};
