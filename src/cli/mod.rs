// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for inspecting captures.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the `poses` and `images` command implementations.

// Modules
/// CLI arguments.
pub mod args;

/// Frame image grid loading.
pub mod images;

/// Console output helpers and macros.
pub mod logging;

/// Pose detection summary.
pub mod poses;
