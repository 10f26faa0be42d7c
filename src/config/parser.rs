//! Configuration parser for loading and merging configuration layers.
//!
//! This module loads the optional YAML file and the `.env` file, and reads
//! the `NLB_SYNC_*` environment overrides.

use crate::error::{ConfigError, Result, SyncError};
use std::path::Path;
use tracing::{debug, info};

use super::spec::SyncConfig;

/// Environment variable overriding the region.
pub const ENV_REGION: &str = "NLB_SYNC_REGION";

/// Environment variable overriding the target port.
pub const ENV_PORT: &str = "NLB_SYNC_PORT";

/// Environment variable overriding the NLB name.
pub const ENV_NLB_NAME: &str = "NLB_SYNC_NLB_NAME";

/// Environment variable overriding the ALB name.
pub const ENV_ALB_NAME: &str = "NLB_SYNC_ALB_NAME";

/// Standard AWS region variables, consulted when no other layer sets a region.
const AWS_REGION_VARS: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Configuration parser for loading sync configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for locating the `.env` file.
    base_path: Option<std::path::PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for locating the `.env` file.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<SyncConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(SyncError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<SyncConfig> {
        debug!("Parsing YAML configuration");

        // An empty file is a valid, empty layer.
        if content.trim().is_empty() {
            return Ok(SyncConfig::default());
        }

        let config: SyncConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            SyncError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        Ok(config)
    }

    /// Builds the environment layer from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `NLB_SYNC_PORT` is set but is not a valid port.
    pub fn env_layer() -> Result<SyncConfig> {
        Self::env_layer_from(|name| std::env::var(name).ok())
    }

    /// Builds the environment layer using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the port variable is set but is not a valid port.
    pub fn env_layer_from(lookup: impl Fn(&str) -> Option<String>) -> Result<SyncConfig> {
        let mut layer = SyncConfig::default();

        if let Some(region) = lookup(ENV_REGION) {
            debug!("Overriding region from environment");
            layer.region = Some(region);
        }

        if let Some(port) = lookup(ENV_PORT) {
            debug!("Overriding port from environment");
            let parsed = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: port.clone() })?;
            layer.port = Some(parsed);
        }

        if let Some(name) = lookup(ENV_NLB_NAME) {
            debug!("Overriding nlb_name from environment");
            layer.nlb_name = Some(name);
        }

        if let Some(name) = lookup(ENV_ALB_NAME) {
            debug!("Overriding alb_name from environment");
            layer.alb_name = Some(name);
        }

        Ok(layer)
    }

    /// Returns the region from the standard AWS variables, if any is set.
    #[must_use]
    pub fn aws_default_region() -> Option<String> {
        Self::aws_default_region_from(|name| std::env::var(name).ok())
    }

    /// Returns the region from the standard AWS variables using `lookup`.
    #[must_use]
    pub fn aws_default_region_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        AWS_REGION_VARS
            .iter()
            .find_map(|&var| lookup(var).filter(|v| !v.trim().is_empty()))
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                SyncError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["nlb-sync.yaml", "nlb-sync.yml"];

/// Finds a configuration file in `start_dir` or one of its parents.
///
/// Returns `None` when no file exists; the file layer is optional.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<std::path::PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
region: eu-west-1
port: 80
nlb_name: test-nlb-name
alb_name: test-alb-name
dry_run: true
aws:
  profile: staging
  endpoint_url: http://localhost:4566
";
        let parser = ConfigParser::new();
        let config = parser.parse_yaml(yaml, None).expect("valid yaml");

        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.port, Some(80));
        assert_eq!(config.nlb_name.as_deref(), Some("test-nlb-name"));
        assert_eq!(config.alb_name.as_deref(), Some("test-alb-name"));
        assert_eq!(config.dry_run, Some(true));
        assert_eq!(config.aws.profile.as_deref(), Some("staging"));
    }

    #[test]
    fn test_parse_empty_config() {
        let parser = ConfigParser::new();
        let config = parser.parse_yaml("  \n", None).expect("empty is valid");
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let parser = ConfigParser::new();
        let result = parser.parse_yaml("regoin: eu-west-1\n", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_port() {
        let parser = ConfigParser::new();
        let result = parser.parse_yaml("port: 70000\n", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let parser = ConfigParser::new();
        let err = parser
            .load_file(temp.path().join("nlb-sync.yaml"))
            .expect_err("file does not exist");
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("Failed to create dirs");
        std::fs::write(temp.path().join("nlb-sync.yml"), "port: 80\n").expect("write failed");

        let found = find_config_file(&nested).expect("config should be found");
        assert_eq!(found, temp.path().join("nlb-sync.yml"));

        let parser = ConfigParser::new();
        let config = parser.load_file(&found).expect("valid file");
        assert_eq!(config.port, Some(80));
    }

    #[test]
    fn test_env_layer() {
        let layer = ConfigParser::env_layer_from(lookup(&[
            (ENV_REGION, "eu-central-1"),
            (ENV_PORT, " 8080 "),
            (ENV_NLB_NAME, "edge-nlb"),
        ]))
        .expect("valid env");

        assert_eq!(layer.region.as_deref(), Some("eu-central-1"));
        assert_eq!(layer.port, Some(8080));
        assert_eq!(layer.nlb_name.as_deref(), Some("edge-nlb"));
        assert_eq!(layer.alb_name, None);
    }

    #[test]
    fn test_env_layer_invalid_port() {
        let result = ConfigParser::env_layer_from(lookup(&[(ENV_PORT, "http")]));
        assert!(matches!(
            result,
            Err(SyncError::Config(ConfigError::InvalidPort { .. }))
        ));
    }

    #[test]
    fn test_aws_default_region_order() {
        let region = ConfigParser::aws_default_region_from(lookup(&[
            ("AWS_DEFAULT_REGION", "us-west-2"),
            ("AWS_REGION", "eu-west-1"),
        ]));
        assert_eq!(region.as_deref(), Some("eu-west-1"));

        let region = ConfigParser::aws_default_region_from(lookup(&[("AWS_REGION", " ")]));
        assert_eq!(region, None);
    }
}
