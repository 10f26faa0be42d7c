//! Error types for the NLB target synchronizer.
//!
//! Errors are grouped by the layer that produces them: configuration
//! loading and validation, and the AWS provider calls made during a sync
//! run. Both fold into [`SyncError`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the synchronizer.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors returned by (or while talking to) the AWS APIs.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// A required setting was supplied by none of the configuration layers.
    #[error("Missing required setting: {name}")]
    MissingSetting {
        /// Name of the missing setting.
        name: String,
    },

    /// Invalid port value.
    #[error("Invalid target port: {value}")]
    InvalidPort {
        /// The rejected value as given.
        value: String,
    },
}

/// Errors from the load balancing and networking APIs.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The call was rejected for missing or invalid credentials.
    #[error("Problem with credentials during {operation}: {message}")]
    Credentials {
        /// API operation that failed.
        operation: String,
        /// Underlying cause.
        message: String,
    },

    /// A lookup returned no result where exactly one was expected.
    #[error("{resource} not found: {name}")]
    NotFound {
        /// Kind of resource looked up ("load balancer", "target group").
        resource: String,
        /// Name or ARN that was looked up.
        name: String,
    },

    /// Any other API failure (throttling, malformed request, network fault).
    #[error("{operation} failed{}: {message}", code_suffix(.code))]
    Api {
        /// API operation that failed.
        operation: String,
        /// Provider error code, when the service returned one.
        code: Option<String>,
        /// Underlying cause.
        message: String,
    },

    /// The request could not be built locally.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },
}

#[allow(clippy::ref_option)]
fn code_suffix(code: &Option<String>) -> String {
    code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default()
}

/// Result type alias for synchronizer operations.
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Returns true if the provider rejected the credentials.
    #[must_use]
    pub const fn is_credentials(&self) -> bool {
        matches!(self, Self::Provider(ProviderError::Credentials { .. }))
    }

    /// Returns true if a load balancer or target group lookup came back empty.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Provider(ProviderError::NotFound { .. }))
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a missing-setting error.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingSetting { name: name.into() }
    }
}

impl ProviderError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }

    /// Creates a generic API error.
    #[must_use]
    pub fn api(
        operation: impl Into<String>,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Api {
            operation: operation.into(),
            code,
            message: message.into(),
        }
    }

    /// Creates a credentials error.
    #[must_use]
    pub fn credentials(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Credentials {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_helpers() {
        let err = SyncError::from(ProviderError::not_found("load balancer", "my-nlb"));
        assert!(err.is_not_found());
        assert!(!err.is_credentials());

        let err = SyncError::from(ProviderError::credentials("DescribeLoadBalancers", "no creds"));
        assert!(err.is_credentials());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_api_error_display() {
        let with_code =
            ProviderError::api("RegisterTargets", Some("Throttling".into()), "slow down");
        assert_eq!(with_code.to_string(), "RegisterTargets failed (Throttling): slow down");

        let without_code = ProviderError::api("RegisterTargets", None, "timeout");
        assert_eq!(without_code.to_string(), "RegisterTargets failed: timeout");
    }
}
