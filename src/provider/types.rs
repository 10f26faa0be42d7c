//! Provider-neutral views of the AWS resources the synchronizer reads.
//!
//! The AWS adapters convert SDK output shapes into these types so the
//! sync pipeline (and its test doubles) never touch SDK structs directly.

use serde::{Deserialize, Serialize};

/// Description filter name used by EC2 `DescribeNetworkInterfaces`.
pub const DESCRIPTION_FILTER: &str = "description";

/// A load balancer returned by `DescribeLoadBalancers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerSummary {
    /// Load balancer ARN.
    pub arn: Option<String>,
    /// Load balancer name.
    pub name: Option<String>,
    /// Load balancer type (`network`, `application`, `gateway`).
    pub lb_type: Option<String>,
}

/// A target group returned by `DescribeTargetGroups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroupSummary {
    /// Target group ARN.
    pub arn: Option<String>,
    /// Target group name.
    pub name: Option<String>,
    /// Target type (`ip`, `instance`, `lambda`, `alb`).
    pub target_type: Option<String>,
}

/// One entry of `DescribeTargetHealth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetHealthRecord {
    /// Target identifier. For IP target groups this is the IP address.
    pub id: String,
    /// Registered port, if reported.
    pub port: Option<i32>,
    /// Health state (`healthy`, `draining`, ...), if reported.
    pub state: Option<String>,
}

/// A network interface returned by `DescribeNetworkInterfaces`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceSummary {
    /// Interface identifier (`eni-...`).
    pub id: Option<String>,
    /// Primary private IPv4 address.
    pub private_ip: Option<String>,
    /// Interface description. ELB-managed interfaces carry `ELB app/<name>/<id>`.
    pub description: Option<String>,
}

/// A `(ip, port)` pair sent to `RegisterTargets` / `DeregisterTargets`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target {
    /// IP address of the target.
    pub id: String,
    /// Port traffic is forwarded to.
    pub port: u16,
}

/// A name/values filter for `DescribeNetworkInterfaces`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFilter {
    /// Filter name.
    pub name: String,
    /// Accepted values; `*` is a wildcard.
    pub values: Vec<String>,
}

impl Target {
    /// Creates a target for the given IP and port.
    #[must_use]
    pub fn new(id: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            port,
        }
    }
}

impl InterfaceFilter {
    /// Filter matching the interfaces an ALB places in its subnets.
    ///
    /// ELB names each of them `ELB app/<alb-name>/<id>`.
    #[must_use]
    pub fn alb_description(alb_name: &str) -> Self {
        Self {
            name: String::from(DESCRIPTION_FILTER),
            values: vec![format!("*app/{alb_name}/*")],
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.port)
    }
}
