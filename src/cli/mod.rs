//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

/// Exit code mapping.
pub mod exit;

pub use args::{Args, Command, ConfigCommand, MergeArgs};
pub use exit::{ConfigError, exit_code};
