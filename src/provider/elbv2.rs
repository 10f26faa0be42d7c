//! Elastic Load Balancing v2 client.

use async_trait::async_trait;
use aws_sdk_elasticloadbalancingv2::Client;
use aws_sdk_elasticloadbalancingv2::operation::describe_load_balancers::DescribeLoadBalancersError;
use aws_sdk_elasticloadbalancingv2::operation::describe_target_groups::DescribeTargetGroupsError;
use aws_sdk_elasticloadbalancingv2::types::TargetDescription;
use tracing::{debug, trace};

use crate::error::{ProviderError, Result, SyncError};

use super::sdk_error::from_sdk_error;
use super::traits::LoadBalancingApi;
use super::types::{LoadBalancerSummary, Target, TargetGroupSummary, TargetHealthRecord};

/// [`LoadBalancingApi`] backed by the AWS ELBv2 SDK.
#[derive(Debug, Clone)]
pub struct ElbClient {
    /// SDK client.
    client: Client,
}

impl ElbClient {
    /// Wraps an existing SDK client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a client from shared AWS configuration.
    #[must_use]
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }

    fn target_descriptions(targets: &[Target]) -> Result<Vec<TargetDescription>> {
        targets
            .iter()
            .map(|t| {
                TargetDescription::builder()
                    .id(&t.id)
                    .port(i32::from(t.port))
                    .build()
                    .map_err(|e| {
                        SyncError::from(ProviderError::InvalidRequest {
                            message: format!("Invalid target {t}: {e}"),
                        })
                    })
            })
            .collect()
    }
}

#[async_trait]
impl LoadBalancingApi for ElbClient {
    async fn describe_load_balancers(&self, names: &[String]) -> Result<Vec<LoadBalancerSummary>> {
        const OP: &str = "DescribeLoadBalancers";
        trace!("{OP} names={names:?}");

        let output = match self
            .client
            .describe_load_balancers()
            .set_names(Some(names.to_vec()))
            .send()
            .await
        {
            Ok(output) => output,
            // `LoadBalancerNotFound`: an unknown name is an empty result.
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(DescribeLoadBalancersError::LoadBalancerNotFoundException(_))
                ) =>
            {
                debug!("{OP}: no load balancer named {names:?}");
                return Ok(vec![]);
            }
            Err(err) => return Err(from_sdk_error(OP, &err).into()),
        };

        Ok(output
            .load_balancers()
            .iter()
            .map(|lb| LoadBalancerSummary {
                arn: lb.load_balancer_arn().map(String::from),
                name: lb.load_balancer_name().map(String::from),
                lb_type: lb.r#type().map(|t| t.as_str().to_string()),
            })
            .collect())
    }

    async fn describe_target_groups(
        &self,
        load_balancer_arn: &str,
        page_size: i32,
    ) -> Result<Vec<TargetGroupSummary>> {
        const OP: &str = "DescribeTargetGroups";
        trace!("{OP} load_balancer_arn={load_balancer_arn} page_size={page_size}");

        let output = match self
            .client
            .describe_target_groups()
            .load_balancer_arn(load_balancer_arn)
            .page_size(page_size)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err)
                if matches!(
                    err.as_service_error(),
                    Some(DescribeTargetGroupsError::TargetGroupNotFoundException(_))
                ) =>
            {
                debug!("{OP}: no target group for {load_balancer_arn}");
                return Ok(vec![]);
            }
            Err(err) => return Err(from_sdk_error(OP, &err).into()),
        };

        Ok(output
            .target_groups()
            .iter()
            .map(|tg| TargetGroupSummary {
                arn: tg.target_group_arn().map(String::from),
                name: tg.target_group_name().map(String::from),
                target_type: tg.target_type().map(|t| t.as_str().to_string()),
            })
            .collect())
    }

    async fn describe_target_health(
        &self,
        target_group_arn: &str,
    ) -> Result<Vec<TargetHealthRecord>> {
        const OP: &str = "DescribeTargetHealth";
        trace!("{OP} target_group_arn={target_group_arn}");

        let output = self
            .client
            .describe_target_health()
            .target_group_arn(target_group_arn)
            .send()
            .await
            .map_err(|err| from_sdk_error(OP, &err))?;

        Ok(output
            .target_health_descriptions()
            .iter()
            .filter_map(|desc| {
                let target = desc.target()?;
                Some(TargetHealthRecord {
                    id: target.id().to_string(),
                    port: target.port(),
                    state: desc
                        .target_health()
                        .and_then(|h| h.state())
                        .map(|s| s.as_str().to_string()),
                })
            })
            .collect())
    }

    async fn register_targets(&self, target_group_arn: &str, targets: &[Target]) -> Result<()> {
        const OP: &str = "RegisterTargets";
        let descriptions = Self::target_descriptions(targets)?;

        self.client
            .register_targets()
            .target_group_arn(target_group_arn)
            .set_targets(Some(descriptions))
            .send()
            .await
            .map_err(|err| from_sdk_error(OP, &err))?;

        debug!("{OP}: {} targets sent to {target_group_arn}", targets.len());
        Ok(())
    }

    async fn deregister_targets(&self, target_group_arn: &str, targets: &[Target]) -> Result<()> {
        const OP: &str = "DeregisterTargets";
        let descriptions = Self::target_descriptions(targets)?;

        self.client
            .deregister_targets()
            .target_group_arn(target_group_arn)
            .set_targets(Some(descriptions))
            .send()
            .await
            .map_err(|err| from_sdk_error(OP, &err))?;

        debug!("{OP}: {} targets removed from {target_group_arn}", targets.len());
        Ok(())
    }
}
