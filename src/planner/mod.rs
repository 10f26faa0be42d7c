//! Planning module for target synchronization.
//!
//! This module compares the NLB's registered targets with the ALB's live
//! addresses and turns the difference into register/deregister calls.

mod diff;
mod plan;

pub use diff::{TargetSet, compute_differences};
pub use plan::{MutationKind, PlannedMutation, SyncPlan, build_targets};
