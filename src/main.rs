//! nlb-target-sync CLI entrypoint.
//!
//! This is the main entrypoint for the nlb-target-sync command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nlb_target_sync::cli::{Cli, Commands, LogFormat, OutputFormatter};
use nlb_target_sync::config::{
    ConfigParser, ConfigValidator, RunConfig, SyncConfig, find_config_file,
};
use nlb_target_sync::error::Result;
use nlb_target_sync::provider::{clients, load_sdk_config};
use nlb_target_sync::syncer::TargetSyncer;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// `RUST_LOG` is honored unless `--verbose` is given. Logs go to stderr so
/// stdout only carries the report.
fn init_logging(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Sync {
            target,
            apply,
            dry_run,
        } => {
            let mode = if apply {
                Some(false)
            } else if dry_run {
                Some(true)
            } else {
                None
            };
            cmd_sync(cli.config.as_ref(), target.into_layer(mode), &formatter).await
        }
        Commands::Plan { target } => {
            cmd_sync(cli.config.as_ref(), target.into_layer(Some(true)), &formatter).await
        }
        Commands::Validate { target, warnings } => {
            cmd_validate(cli.config.as_ref(), target.into_layer(None), warnings, &formatter)
        }
    }
}

/// Runs one synchronization pass and prints its report.
async fn cmd_sync(
    config_path: Option<&PathBuf>,
    cli_layer: SyncConfig,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_run_config(config_path, cli_layer)?;

    let validation = ConfigValidator::new().validate(&config)?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    let sdk_config = load_sdk_config(&config.settings.region, &config.aws).await;
    let (load_balancing, networking) = clients(&sdk_config);
    let syncer = TargetSyncer::new(config.settings, load_balancing, networking);

    let report = syncer.sync(&config.nlb_name, &config.alb_name).await?;
    info!(
        "Sync finished: {} register, {} deregister, {} call(s) issued",
        report.plan.to_register.len(),
        report.plan.to_deregister.len(),
        report.mutations.len()
    );

    print_output(&formatter.format_report(&report))
}

/// Validates configuration and prints a summary.
fn cmd_validate(
    config_path: Option<&PathBuf>,
    cli_layer: SyncConfig,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_run_config(config_path, cli_layer)?;
    info!("Validating configuration for NLB {}", config.nlb_name);

    let result = ConfigValidator::check(&config);
    print_output(&formatter.format_validation(&config, &result, show_warnings))?;

    ConfigValidator::new().validate(&config)?;
    Ok(())
}

/// Merges every configuration layer, lowest priority first.
///
/// AWS region variables < config file < `NLB_SYNC_*` variables < CLI flags.
/// The `.env` file is loaded before environment layers are read.
fn load_run_config(config_path: Option<&PathBuf>, cli_layer: SyncConfig) -> Result<RunConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.clone()),
        None => find_config_file(std::env::current_dir()?),
    };

    let mut parser = ConfigParser::new();
    if let Some(dir) = config_file
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        parser = parser.with_base_path(dir);
    }
    parser.load_dotenv()?;

    let file_layer = match &config_file {
        Some(path) => parser.load_file(path)?,
        None => {
            debug!("No configuration file, using environment and flags only");
            SyncConfig::default()
        }
    };

    let aws_layer = SyncConfig {
        region: ConfigParser::aws_default_region(),
        ..SyncConfig::default()
    };

    aws_layer
        .merge(file_layer)
        .merge(ConfigParser::env_layer()?)
        .merge(cli_layer)
        .resolve()
}

/// Writes command output to stdout.
fn print_output(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
