//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::SyncConfig;

/// nlb-target-sync - Keeps an NLB target group in sync with an ALB's IPs.
#[derive(Parser, Debug)]
#[command(name = "nlb-target-sync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "NLB_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Log format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one synchronization pass.
    Sync {
        /// Load balancer selection and region.
        #[command(flatten)]
        target: TargetArgs,

        /// Register and deregister targets instead of only logging the plan.
        #[arg(long, conflicts_with = "dry_run")]
        apply: bool,

        /// Force dry run even if the configuration file disables it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute and display the plan without changing anything.
    Plan {
        /// Load balancer selection and region.
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Validate the configuration.
    Validate {
        /// Load balancer selection and region.
        #[command(flatten)]
        target: TargetArgs,

        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },
}

/// Flags shared by `sync`, `plan` and `validate`.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Name of the Network Load Balancer.
    #[arg(long = "nlb")]
    pub nlb_name: Option<String>,

    /// Name of the Application Load Balancer.
    #[arg(long = "alb")]
    pub alb_name: Option<String>,

    /// AWS region.
    #[arg(long)]
    pub region: Option<String>,

    /// Port registered for every target.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Log line format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable log lines.
    #[default]
    Text,
    /// One JSON object per log line.
    Json,
}

impl TargetArgs {
    /// Turns the flags into the highest-priority configuration layer.
    #[must_use]
    pub fn into_layer(self, dry_run: Option<bool>) -> SyncConfig {
        SyncConfig {
            region: self.region,
            port: self.port,
            nlb_name: self.nlb_name,
            alb_name: self.alb_name,
            dry_run,
            ..SyncConfig::default()
        }
    }
}
