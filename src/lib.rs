//! # doc - document translation and markdown merging
//!
//! `doc` translates a document piped on stdin through an LLM while keeping its
//! markup intact, and merges a directory of markdown files into one document
//! with a generated table of contents.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a README to Japanese
//! cat README.md | doc ja
//!
//! # Add an instruction for the translator
//! cat guide.md | doc en "keep product names in English"
//!
//! # Merge ./docs (recursively) into book.md
//! doc merge ./docs book.md -r
//!
//! # Preview which files would be merged
//! doc merge ./docs --dry-run
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/doc/config.toml`:
//!
//! ```toml
//! provider = "openai"
//! openai_model = "gpt-4o-mini"
//!
//! [merge]
//! order = "custom"
//! toc_depth = 2
//! ```
//!
//! Environment variables such as `LLM_PROVIDER` and `OPENAI_API_KEY` (or a
//! `.env` file in the working directory) override the file.

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Human-readable sizes, durations and masked secrets.
pub mod format;

/// File system utilities.
pub mod fs;

/// Input reading from stdin.
pub mod input;

/// Markdown directory merging.
pub mod merge;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Translation providers, prompts and supported languages.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
