//! One reconciliation pass of NLB targets against ALB addresses.
//!
//! The pass is strictly sequential: resolve the NLB, its target group and
//! registered targets, read the ALB's network interfaces, diff, then
//! register and deregister. Every step is logged. Any failure is logged
//! once and returned; nothing is retried or rolled back, and running the
//! pass again converges from whatever state the provider committed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::config::SyncSettings;
use crate::error::{ProviderError, Result, SyncError};
use crate::planner::{
    MutationKind, PlannedMutation, SyncPlan, TargetSet, build_targets, compute_differences,
};
use crate::provider::{InterfaceFilter, LoadBalancingApi, NetworkingApi, Target};

/// Page size requested from `DescribeTargetGroups`.
///
/// The NLB is expected to have exactly one target group; with several, the
/// first one in provider order is managed and the rest are ignored.
const TARGET_GROUP_PAGE_SIZE: i32 = 1;

/// Synchronizes one NLB target group with one ALB.
#[derive(Debug)]
pub struct TargetSyncer<L, N> {
    /// Immutable run settings.
    settings: SyncSettings,
    /// ELBv2 API.
    load_balancing: L,
    /// EC2 API.
    networking: N,
}

/// What a sync pass found and did.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Identifier attached to every log line of the pass.
    pub run_id: Uuid,
    /// Whether mutations were suppressed.
    pub dry_run: bool,
    /// NLB name.
    pub nlb_name: String,
    /// ALB name.
    pub alb_name: String,
    /// Resolved NLB ARN.
    pub nlb_arn: String,
    /// Resolved target group ARN.
    pub target_group_arn: String,
    /// Port used for registered targets.
    pub port: u16,
    /// Targets registered before the pass.
    pub nlb_targets: TargetSet,
    /// Addresses of the ALB's network interfaces.
    pub alb_ips: TargetSet,
    /// Computed differences.
    pub plan: SyncPlan,
    /// Calls actually issued, in order.
    pub mutations: Vec<PlannedMutation>,
    /// When the pass started.
    pub started_at: DateTime<Utc>,
    /// When the pass finished.
    pub finished_at: DateTime<Utc>,
}

impl<L: LoadBalancingApi, N: NetworkingApi> TargetSyncer<L, N> {
    /// Creates a new syncer.
    #[must_use]
    pub const fn new(settings: SyncSettings, load_balancing: L, networking: N) -> Self {
        Self {
            settings,
            load_balancing,
            networking,
        }
    }

    /// Returns the settings this syncer was built with.
    #[must_use]
    pub const fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Runs one reconciliation pass.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if the NLB or its target group
    /// does not exist, [`ProviderError::Credentials`] if AWS rejects the
    /// credentials, and other provider errors unchanged. Query failures
    /// abort before any mutation; a failed deregistration leaves a
    /// completed registration in place.
    pub async fn sync(&self, nlb_name: &str, alb_name: &str) -> Result<SyncReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("sync", %run_id, nlb = nlb_name, alb = alb_name);

        async {
            match self.run(run_id, nlb_name, alb_name).await {
                Ok(report) => Ok(report),
                Err(err) => {
                    if err.is_credentials() {
                        error!("Problem with credentials: {err}");
                    } else {
                        error!("Sync failed: {err}");
                    }
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, run_id: Uuid, nlb_name: &str, alb_name: &str) -> Result<SyncReport> {
        let started_at = Utc::now();

        if self.settings.dry_run {
            info!("Running mode: dry run");
        } else {
            info!("Running mode: apply");
        }

        let nlb_arn = self.resolve_load_balancer_arn(nlb_name).await?;
        info!("NLB arn: {nlb_arn}");

        let target_group_arn = self.resolve_target_group_arn(&nlb_arn).await?;
        info!("Target group arn: {target_group_arn}");

        let nlb_targets = self.list_registered_target_ips(&target_group_arn).await?;
        info!("NLB targets IP addresses: {nlb_targets}");

        let alb_ips = self.list_alb_backing_ips(alb_name).await?;
        info!("ALB IP addresses: {alb_ips}");

        let plan = compute_differences(&nlb_targets, &alb_ips);
        info!("IP addresses to register to NLB targets: {}", plan.to_register);
        info!("IP addresses to deregister from NLB targets: {}", plan.to_deregister);

        let mut mutations = Vec::new();

        if self.settings.dry_run {
            if !plan.is_empty() {
                info!("Dry run: target group left unchanged");
            }
        } else {
            if !plan.to_register.is_empty() {
                info!("Registering IP addresses: {}", plan.to_register);
                let targets = self
                    .register_targets(&target_group_arn, &plan.to_register)
                    .await?;
                mutations.push(PlannedMutation {
                    action: MutationKind::Register,
                    targets,
                });
            }

            if !plan.to_deregister.is_empty() {
                info!("Deregistering IP addresses: {}", plan.to_deregister);
                let targets = self
                    .deregister_targets(&target_group_arn, &plan.to_deregister)
                    .await?;
                mutations.push(PlannedMutation {
                    action: MutationKind::Deregister,
                    targets,
                });
            }
        }

        if plan.is_empty() {
            info!("No changes required - targets are in sync");
        }

        Ok(SyncReport {
            run_id,
            dry_run: self.settings.dry_run,
            nlb_name: nlb_name.to_string(),
            alb_name: alb_name.to_string(),
            nlb_arn,
            target_group_arn,
            port: self.settings.port,
            nlb_targets,
            alb_ips,
            plan,
            mutations,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Resolves a load balancer name to its ARN.
    async fn resolve_load_balancer_arn(&self, name: &str) -> Result<String> {
        let found = self
            .load_balancing
            .describe_load_balancers(&[name.to_string()])
            .await?;

        if found.len() > 1 {
            debug!("{} load balancers matched '{name}', using the first", found.len());
        }

        let lb = found
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::from(ProviderError::not_found("load balancer", name)))?;

        if let Some(lb_type) = lb.lb_type.as_deref().filter(|t| *t != "network") {
            warn!("Load balancer '{name}' is of type '{lb_type}', expected 'network'");
        }

        lb.arn
            .ok_or_else(|| SyncError::from(ProviderError::not_found("load balancer", name)))
    }

    /// Resolves the NLB's target group; the first one returned wins.
    async fn resolve_target_group_arn(&self, load_balancer_arn: &str) -> Result<String> {
        let groups = self
            .load_balancing
            .describe_target_groups(load_balancer_arn, TARGET_GROUP_PAGE_SIZE)
            .await?;

        let group = groups.into_iter().next().ok_or_else(|| {
            SyncError::from(ProviderError::not_found("target group", load_balancer_arn))
        })?;

        if let Some(target_type) = group.target_type.as_deref().filter(|t| *t != "ip") {
            warn!("Target group uses '{target_type}' targets; IP targets are expected");
        }

        group.arn.ok_or_else(|| {
            SyncError::from(ProviderError::not_found("target group", load_balancer_arn))
        })
    }

    /// Reads the addresses currently registered in the target group.
    ///
    /// Only the first page of `DescribeTargetHealth` is read.
    async fn list_registered_target_ips(&self, target_group_arn: &str) -> Result<TargetSet> {
        let records = self
            .load_balancing
            .describe_target_health(target_group_arn)
            .await?;

        for record in &records {
            debug!(
                "Target {} port={:?} state={}",
                record.id,
                record.port,
                record.state.as_deref().unwrap_or("unknown")
            );
        }

        Ok(records.into_iter().map(|r| r.id).collect())
    }

    /// Reads the private addresses of the ALB's network interfaces.
    ///
    /// Interfaces without a private address are skipped.
    async fn list_alb_backing_ips(&self, alb_name: &str) -> Result<TargetSet> {
        let filters = [InterfaceFilter::alb_description(alb_name)];
        let interfaces = self
            .networking
            .describe_network_interfaces(&filters, false)
            .await?;

        let mut ips = TargetSet::new();
        for interface in interfaces {
            match interface.private_ip {
                Some(ip) => {
                    ips.insert(ip);
                }
                None => debug!(
                    "Skipping interface {} without a private IP",
                    interface.id.as_deref().unwrap_or("<unknown>")
                ),
            }
        }

        Ok(ips)
    }

    /// Registers every address with the configured port in one call.
    async fn register_targets(
        &self,
        target_group_arn: &str,
        ips: &TargetSet,
    ) -> Result<Vec<Target>> {
        let targets = build_targets(ips, self.settings.port);
        self.load_balancing
            .register_targets(target_group_arn, &targets)
            .await?;
        Ok(targets)
    }

    /// Deregisters every address with the configured port in one call.
    async fn deregister_targets(
        &self,
        target_group_arn: &str,
        ips: &TargetSet,
    ) -> Result<Vec<Target>> {
        let targets = build_targets(ips, self.settings.port);
        self.load_balancing
            .deregister_targets(target_group_arn, &targets)
            .await?;
        Ok(targets)
    }
}

impl SyncReport {
    /// Returns true if any register or deregister call was issued.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.mutations.is_empty()
    }
}
