//! AWS provider integration.
//!
//! The sync pipeline talks to AWS only through the [`LoadBalancingApi`] and
//! [`NetworkingApi`] traits. [`ElbClient`] and [`Ec2Client`] implement them
//! over the official SDK clients; tests substitute their own.

mod ec2;
mod elbv2;
mod sdk_error;
mod traits;
mod types;

pub use ec2::Ec2Client;
pub use elbv2::ElbClient;
pub use traits::{LoadBalancingApi, NetworkingApi};
#[cfg(test)]
pub use traits::{MockLoadBalancingApi, MockNetworkingApi};
pub use types::{
    InterfaceFilter, LoadBalancerSummary, NetworkInterfaceSummary, Target, TargetGroupSummary,
    TargetHealthRecord, DESCRIPTION_FILTER,
};

use aws_config::{Region, SdkConfig};
use tracing::debug;

use crate::config::AwsConfig;

/// Loads shared AWS configuration for the given region.
///
/// Credentials come from the standard provider chain (environment, profile,
/// instance metadata). A profile or endpoint URL from the configuration file
/// overrides the chain's defaults.
pub async fn load_sdk_config(region: &str, aws: &AwsConfig) -> SdkConfig {
    debug!("Loading AWS configuration for region {region}");

    let mut loader = aws_config::from_env().region(Region::new(region.to_string()));

    if let Some(profile) = &aws.profile {
        debug!("Using AWS profile {profile}");
        loader = loader.profile_name(profile);
    }

    if let Some(endpoint) = &aws.endpoint_url {
        debug!("Using AWS endpoint override {endpoint}");
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

/// Creates both provider clients from one shared configuration.
#[must_use]
pub fn clients(config: &SdkConfig) -> (ElbClient, Ec2Client) {
    (
        ElbClient::from_sdk_config(config),
        Ec2Client::from_sdk_config(config),
    )
}
