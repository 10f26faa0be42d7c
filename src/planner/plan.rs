//! Sync plans and the mutations they translate into.

use serde::Serialize;

use crate::provider::Target;

use super::diff::TargetSet;

/// The outcome of comparing NLB targets with ALB addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// ALB addresses to register with the NLB target group.
    pub to_register: TargetSet,
    /// NLB targets to deregister.
    pub to_deregister: TargetSet,
}

/// A single batched call the plan requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMutation {
    /// Register or deregister.
    pub action: MutationKind,
    /// Targets sent in the call.
    pub targets: Vec<Target>,
}

/// Kinds of target group mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    /// `RegisterTargets`.
    Register,
    /// `DeregisterTargets`.
    Deregister,
}

impl SyncPlan {
    /// Returns true if nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_register.is_empty() && self.to_deregister.is_empty()
    }

    /// Returns the calls needed to apply this plan, registrations first.
    ///
    /// Empty sides produce no call.
    #[must_use]
    pub fn mutations(&self, port: u16) -> Vec<PlannedMutation> {
        [
            (MutationKind::Register, &self.to_register),
            (MutationKind::Deregister, &self.to_deregister),
        ]
        .into_iter()
        .filter(|(_, ips)| !ips.is_empty())
        .map(|(action, ips)| PlannedMutation {
            action,
            targets: build_targets(ips, port),
        })
        .collect()
    }
}

/// Pairs every address with the configured port.
#[must_use]
pub fn build_targets(ips: &TargetSet, port: u16) -> Vec<Target> {
    ips.iter().map(|ip| Target::new(ip, port)).collect()
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Register => "register",
            Self::Deregister => "deregister",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for SyncPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No changes required");
        }
        write!(
            f,
            "register {}, deregister {}",
            self.to_register, self.to_deregister
        )
    }
}
