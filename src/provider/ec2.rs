//! EC2 networking client.

use async_trait::async_trait;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::Filter;
use tracing::{debug, trace};

use crate::error::Result;

use super::sdk_error::from_sdk_error;
use super::traits::NetworkingApi;
use super::types::{InterfaceFilter, NetworkInterfaceSummary};

/// [`NetworkingApi`] backed by the AWS EC2 SDK.
#[derive(Debug, Clone)]
pub struct Ec2Client {
    /// SDK client.
    client: Client,
}

impl Ec2Client {
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
}

#[async_trait]
impl NetworkingApi for Ec2Client {
    async fn describe_network_interfaces(
        &self,
        filters: &[InterfaceFilter],
        dry_run: bool,
    ) -> Result<Vec<NetworkInterfaceSummary>> {
        const OP: &str = "DescribeNetworkInterfaces";
        trace!("{OP} filters={filters:?} dry_run={dry_run}");

        let sdk_filters: Vec<Filter> = filters
            .iter()
            .map(|f| {
                Filter::builder()
                    .name(&f.name)
                    .set_values(Some(f.values.clone()))
                    .build()
            })
            .collect();

        // Only the first page is read.
        let output = self
            .client
            .describe_network_interfaces()
            .set_filters(Some(sdk_filters))
            .dry_run(dry_run)
            .send()
            .await
            .map_err(|err| from_sdk_error(OP, &err))?;

        let interfaces: Vec<NetworkInterfaceSummary> = output
            .network_interfaces()
            .iter()
            .map(|ni| NetworkInterfaceSummary {
                id: ni.network_interface_id().map(String::from),
                private_ip: ni.private_ip_address().map(String::from),
                description: ni.description().map(String::from),
            })
            .collect();

        debug!("{OP}: {} interfaces", interfaces.len());
        Ok(interfaces)
    }
}
