//! Narrow contracts for the two AWS APIs the synchronizer consumes.
//!
//! Implementations perform exactly one API call per method and never
//! retry, page, or cache. Authentication and transport retries stay with
//! the underlying SDK client.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{
    InterfaceFilter, LoadBalancerSummary, NetworkInterfaceSummary, Target, TargetGroupSummary,
    TargetHealthRecord,
};

/// Elastic Load Balancing v2 operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadBalancingApi: Send + Sync {
    /// Describes the load balancers with the given names.
    ///
    /// An unknown name yields an empty list rather than an error.
    async fn describe_load_balancers(&self, names: &[String]) -> Result<Vec<LoadBalancerSummary>>;

    /// Describes the target groups attached to a load balancer, one page of
    /// at most `page_size` entries.
    async fn describe_target_groups(
        &self,
        load_balancer_arn: &str,
        page_size: i32,
    ) -> Result<Vec<TargetGroupSummary>>;

    /// Describes the health of every target registered in a target group.
    async fn describe_target_health(&self, target_group_arn: &str)
    -> Result<Vec<TargetHealthRecord>>;

    /// Registers targets with a target group in a single call.
    async fn register_targets(&self, target_group_arn: &str, targets: &[Target]) -> Result<()>;

    /// Deregisters targets from a target group in a single call.
    async fn deregister_targets(&self, target_group_arn: &str, targets: &[Target]) -> Result<()>;
}

/// EC2 networking operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkingApi: Send + Sync {
    /// Describes the network interfaces matching every filter.
    async fn describe_network_interfaces(
        &self,
        filters: &[InterfaceFilter],
        dry_run: bool,
    ) -> Result<Vec<NetworkInterfaceSummary>>;
}
