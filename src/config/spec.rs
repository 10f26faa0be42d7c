//! Configuration types for the synchronizer.
//!
//! [`SyncConfig`] maps to `nlb-sync.yaml` and to every other configuration
//! layer; all its fields are optional so layers can be merged. Once merged it
//! is resolved into a [`RunConfig`], whose [`SyncSettings`] are immutable for
//! the lifetime of a [`TargetSyncer`](crate::syncer::TargetSyncer).

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// One configuration layer (file, environment, or command line).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// AWS region of both load balancers.
    #[serde(default)]
    pub region: Option<String>,
    /// Port registered for every NLB target.
    #[serde(default)]
    pub port: Option<u16>,
    /// Name of the Network Load Balancer whose targets are managed.
    #[serde(default)]
    pub nlb_name: Option<String>,
    /// Name of the Application Load Balancer whose IPs are mirrored.
    #[serde(default)]
    pub alb_name: Option<String>,
    /// Compute and log the plan without registering or deregistering.
    #[serde(default)]
    pub dry_run: Option<bool>,
    /// AWS client options.
    #[serde(default)]
    pub aws: AwsConfig,
}

/// AWS client options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    /// Named profile from the shared AWS config files.
    #[serde(default)]
    pub profile: Option<String>,
    /// Endpoint override, e.g. a local AWS emulator.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Settings a [`TargetSyncer`](crate::syncer::TargetSyncer) is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSettings {
    /// AWS region.
    pub region: String,
    /// Target port.
    pub port: u16,
    /// Whether mutations are suppressed.
    pub dry_run: bool,
}

/// A fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Syncer settings.
    pub settings: SyncSettings,
    /// NLB name.
    pub nlb_name: String,
    /// ALB name.
    pub alb_name: String,
    /// AWS client options.
    pub aws: AwsConfig,
}

impl SyncConfig {
    /// Overlays `other` on top of `self`: every value set in `other` wins.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            region: other.region.or(self.region),
            port: other.port.or(self.port),
            nlb_name: other.nlb_name.or(self.nlb_name),
            alb_name: other.alb_name.or(self.alb_name),
            dry_run: other.dry_run.or(self.dry_run),
            aws: AwsConfig {
                profile: other.aws.profile.or(self.aws.profile),
                endpoint_url: other.aws.endpoint_url.or(self.aws.endpoint_url),
            },
        }
    }

    /// Resolves the merged layers into a run configuration.
    ///
    /// Dry-run defaults to on when no layer sets it.
    ///
    /// # Errors
    ///
    /// Returns an error if the region, port, or either load balancer name
    /// is missing.
    pub fn resolve(self) -> Result<RunConfig> {
        let region = self.region.ok_or_else(|| ConfigError::missing("region"))?;
        let port = self.port.ok_or_else(|| ConfigError::missing("port"))?;
        let nlb_name = self.nlb_name.ok_or_else(|| ConfigError::missing("nlb_name"))?;
        let alb_name = self.alb_name.ok_or_else(|| ConfigError::missing("alb_name"))?;

        Ok(RunConfig {
            settings: SyncSettings {
                region,
                port,
                dry_run: self.dry_run.unwrap_or(true),
            },
            nlb_name,
            alb_name,
            aws: self.aws,
        })
    }
}

impl SyncSettings {
    /// Creates settings for a syncer.
    #[must_use]
    pub fn new(region: impl Into<String>, port: u16, dry_run: bool) -> Self {
        Self {
            region: region.into(),
            port,
            dry_run,
        }
    }
}
