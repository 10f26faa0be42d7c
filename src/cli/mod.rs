//! CLI module for nlb-target-sync.
//!
//! This module provides the command-line interface for running and
//! inspecting NLB target synchronization.

mod commands;
mod output;

pub use commands::{Cli, Commands, LogFormat, OutputFormat, TargetArgs};
pub use output::OutputFormatter;
