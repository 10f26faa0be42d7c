// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Mock types generated for the provider traits carry no docs
#![cfg_attr(test, allow(missing_docs))]

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # NLB Target Sync
//!
//! Keeps the IP targets of an AWS Network Load Balancer in sync with the
//! private IP addresses currently backing an Application Load Balancer.
//!
//! ## Overview
//!
//! An ALB's addresses change as AWS scales it. An NLB placed in front of it
//! with an IP target group has to follow those changes. Each sync pass:
//!
//! 1. Resolves the NLB by name, then its (first) target group
//! 2. Reads the target group's registered IPs
//! 3. Reads the private IPs of the ALB's network interfaces
//! 4. Registers missing ALB IPs, then deregisters stale targets
//!
//! Dry-run mode logs the computed plan and changes nothing. A pass is
//! idempotent: running it again on converged state issues no mutation.
//!
//! ## Modules
//!
//! - [`config`]: Configuration layering and validation
//! - [`provider`]: AWS API traits and SDK-backed clients
//! - [`planner`]: Set differences and mutation plans
//! - [`syncer`]: The sync pass
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! region: eu-west-1
//! port: 443
//! nlb_name: edge-nlb
//! alb_name: web-alb
//! dry_run: false
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod provider;
pub mod syncer;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, RunConfig, SyncConfig, SyncSettings};
pub use error::{ConfigError, ProviderError, Result, SyncError};
pub use planner::{SyncPlan, TargetSet, compute_differences};
pub use provider::{Ec2Client, ElbClient, LoadBalancingApi, NetworkingApi, Target};
pub use syncer::{SyncReport, TargetSyncer};
