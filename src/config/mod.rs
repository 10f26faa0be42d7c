//! Configuration module for the synchronizer.
//!
//! This module handles all configuration-related functionality:
//! - Parsing the optional `nlb-sync.yaml` file
//! - Reading `.env` and `NLB_SYNC_*` environment overrides
//! - Merging layers and validating the result

mod parser;
mod spec;
mod validator;

pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, ENV_ALB_NAME, ENV_NLB_NAME, ENV_PORT, ENV_REGION,
    find_config_file,
};
pub use spec::{AwsConfig, RunConfig, SyncConfig, SyncSettings};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, is_valid_lb_name};
