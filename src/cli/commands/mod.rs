//! Subcommand implementations.

/// Config file inspection and editing.
pub mod config;

/// Markdown merge command handler.
pub mod merge;

/// Translation command handler.
pub mod translate;
