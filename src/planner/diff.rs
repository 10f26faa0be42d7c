//! Set difference between registered NLB targets and live ALB addresses.

use serde::Serialize;
use std::collections::BTreeSet;

use super::plan::SyncPlan;

/// A set of IP addresses.
///
/// Iteration is sorted so logs and reports are stable across runs; callers
/// must not rely on any particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetSet(BTreeSet<String>);

impl TargetSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds an address; returns false if it was already present.
    pub fn insert(&mut self, ip: impl Into<String>) -> bool {
        self.0.insert(ip.into())
    }

    /// Returns true if the address is in the set.
    #[must_use]
    pub fn contains(&self, ip: &str) -> bool {
        self.0.contains(ip)
    }

    /// Number of addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the addresses.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Addresses in `self` that are absent from `other`.
    #[must_use]
    pub fn missing_from(&self, other: &Self) -> Self {
        self.0.difference(&other.0).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for TargetSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, ip) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ip}")?;
        }
        write!(f, "]")
    }
}

/// Computes which addresses to register and which to deregister.
///
/// `to_register` holds ALB addresses the NLB does not target yet;
/// `to_deregister` holds NLB targets no longer backing the ALB. An address
/// present in both inputs appears in neither.
#[must_use]
pub fn compute_differences(nlb_targets: &TargetSet, alb_ips: &TargetSet) -> SyncPlan {
    SyncPlan {
        to_register: alb_ips.missing_from(nlb_targets),
        to_deregister: nlb_targets.missing_from(alb_ips),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ips: &[&str]) -> TargetSet {
        ips.iter().copied().collect()
    }

    #[test]
    fn test_partial_overlap() {
        let nlb = set(&["10.0.0.1", "10.0.0.2"]);
        let alb = set(&["10.0.0.2", "10.0.0.3"]);

        let plan = compute_differences(&nlb, &alb);
        assert_eq!(plan.to_register, set(&["10.0.0.3"]));
        assert_eq!(plan.to_deregister, set(&["10.0.0.1"]));
    }

    #[test]
    fn test_identical_sets_are_noop() {
        let ips = set(&["10.0.1.10", "10.0.2.10"]);
        let plan = compute_differences(&ips, &ips);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_empty_nlb_registers_everything() {
        let alb = set(&["10.0.1.10", "10.0.2.10"]);
        let plan = compute_differences(&TargetSet::new(), &alb);
        assert_eq!(plan.to_register, alb);
        assert!(plan.to_deregister.is_empty());
    }

    #[test]
    fn test_empty_alb_deregisters_everything() {
        let nlb = set(&["10.0.1.10"]);
        let plan = compute_differences(&nlb, &TargetSet::new());
        assert!(plan.to_register.is_empty());
        assert_eq!(plan.to_deregister, nlb);
    }

    #[test]
    fn test_plan_sets_stay_within_sources() {
        let nlb = set(&["10.0.0.1", "10.0.0.2", "10.0.0.4"]);
        let alb = set(&["10.0.0.2", "10.0.0.3", "10.0.0.5"]);
        let plan = compute_differences(&nlb, &alb);

        for ip in plan.to_register.iter() {
            assert!(alb.contains(ip) && !nlb.contains(ip));
        }
        for ip in plan.to_deregister.iter() {
            assert!(nlb.contains(ip) && !alb.contains(ip));
        }
        assert!(!plan.to_register.contains("10.0.0.2"));
        assert!(!plan.to_deregister.contains("10.0.0.2"));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a: TargetSet = ["10.0.0.3", "10.0.0.1", "10.0.0.2"].into_iter().collect();
        let b: TargetSet = ["10.0.0.2", "10.0.0.3", "10.0.0.1"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicates_collapse() {
        let ips = set(&["10.0.0.1", "10.0.0.1"]);
        assert_eq!(ips.len(), 1);
        assert_eq!(ips.to_string(), "[10.0.0.1]");
    }
}
