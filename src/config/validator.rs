//! Validation of resolved run configurations.
//!
//! Checks everything that can be checked without calling AWS, so that a bad
//! name or port fails before any API call is made.

use crate::error::{ConfigError, Result};
use tracing::debug;

use super::spec::RunConfig;

/// Maximum length of an Elastic Load Balancing name.
const MAX_LB_NAME_LEN: usize = 32;

/// Prefix ELB reserves for internal load balancer DNS names.
const RESERVED_LB_PREFIX: &str = "internal-";

/// Validator for run configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Validation result containing all problems found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a run configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if any check fails.
    pub fn validate(&self, config: &RunConfig) -> Result<ValidationResult> {
        let result = Self::check(config);

        if let Some(first_error) = result.errors.first() {
            return Err(
                ConfigError::validation(&first_error.message, &first_error.field).into(),
            );
        }

        debug!("Configuration validation passed");
        Ok(result)
    }

    /// Runs every check and collects all errors and warnings.
    #[must_use]
    pub fn check(config: &RunConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        if config.settings.region.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("region"),
                message: String::from("Region cannot be empty"),
            });
        }

        if config.settings.port == 0 {
            result.errors.push(ValidationError {
                field: String::from("port"),
                message: String::from("Port must be between 1 and 65535"),
            });
        }

        Self::validate_lb_name("nlb_name", &config.nlb_name, &mut result);
        Self::validate_lb_name("alb_name", &config.alb_name, &mut result);

        if config.nlb_name == config.alb_name {
            result.warnings.push(format!(
                "nlb_name and alb_name are both '{}'; ELB names are unique per region",
                config.nlb_name
            ));
        }

        if config.aws.endpoint_url.is_some() {
            result
                .warnings
                .push(String::from("AWS endpoint override is set; calls will not reach AWS"));
        }

        result
    }

    fn validate_lb_name(field: &str, name: &str, result: &mut ValidationResult) {
        if name.is_empty() {
            result.errors.push(ValidationError {
                field: field.to_string(),
                message: format!("{field} cannot be empty"),
            });
        } else if !is_valid_lb_name(name) {
            result.errors.push(ValidationError {
                field: field.to_string(),
                message: format!(
                    "'{name}' is not a valid load balancer name. At most {MAX_LB_NAME_LEN} \
                     alphanumeric characters or hyphens, not starting or ending with a hyphen, \
                     and not starting with '{RESERVED_LB_PREFIX}'."
                ),
            });
        }
    }
}

impl ValidationResult {
    /// Returns true if no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks a name against the Elastic Load Balancing naming rules.
#[must_use]
pub fn is_valid_lb_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_LB_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.starts_with(RESERVED_LB_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AwsConfig, SyncSettings};

    fn run_config(nlb: &str, alb: &str, port: u16) -> RunConfig {
        RunConfig {
            settings: SyncSettings::new("eu-west-1", port, true),
            nlb_name: nlb.to_string(),
            alb_name: alb.to_string(),
            aws: AwsConfig::default(),
        }
    }

    #[test]
    fn test_valid_lb_name() {
        assert!(is_valid_lb_name("test-nlb-name"));
        assert!(is_valid_lb_name("Web01"));
        assert!(is_valid_lb_name("a"));
        assert!(is_valid_lb_name(&"a".repeat(32)));
    }

    #[test]
    fn test_invalid_lb_name() {
        assert!(!is_valid_lb_name(""));
        assert!(!is_valid_lb_name("-nlb"));
        assert!(!is_valid_lb_name("nlb-"));
        assert!(!is_valid_lb_name("my_nlb")); // underscore
        assert!(!is_valid_lb_name("internal-nlb"));
        assert!(!is_valid_lb_name(&"a".repeat(33)));
    }

    #[test]
    fn test_validate_ok() {
        let validator = ConfigValidator::new();
        let result = validator
            .validate(&run_config("edge-nlb", "web-alb", 80))
            .expect("config is valid");
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_zero_port() {
        let validator = ConfigValidator::new();
        let err = validator
            .validate(&run_config("edge-nlb", "web-alb", 0))
            .expect_err("port 0 is invalid");
        assert!(matches!(
            err,
            crate::error::SyncError::Config(ConfigError::ValidationError {
                field: Some(ref f),
                ..
            }) if f == "port"
        ));
    }

    #[test]
    fn test_check_collects_all_errors() {
        let result = ConfigValidator::check(&run_config("bad_name", "", 0));
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_same_names_warns() {
        let result = ConfigValidator::check(&run_config("shared", "shared", 80));
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }
}
