//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::{RunConfig, ValidationResult};
use crate::planner::MutationKind;
use crate::syncer::SyncReport;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Mutation row for table display.
#[derive(Tabled)]
struct MutationRow {
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "Status")]
    status: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the report of a sync pass.
    #[must_use]
    pub fn format_report(&self, report: &SyncReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Text => Self::format_report_text(report),
        }
    }

    fn format_report_text(report: &SyncReport) -> String {
        let mut output = String::new();

        let mode = if report.dry_run {
            "dry run".yellow().to_string()
        } else {
            "apply".green().to_string()
        };

        let _ = writeln!(output, "\nSync {} ({mode})\n", report.run_id);
        let _ = writeln!(output, "   NLB: {} ({})", report.nlb_name, report.nlb_arn);
        let _ = writeln!(output, "   Target group: {}", report.target_group_arn);
        let _ = writeln!(output, "   ALB: {}", report.alb_name);
        let _ = writeln!(output, "   NLB targets: {}", report.nlb_targets);
        let _ = writeln!(output, "   ALB IPs: {}\n", report.alb_ips);

        if report.plan.is_empty() {
            let _ = writeln!(
                output,
                "{} No changes required - targets are in sync.",
                "✓".green()
            );
        } else {
            let rows: Vec<MutationRow> = report
                .plan
                .mutations(report.port)
                .into_iter()
                .flat_map(|mutation| {
                    let status = Self::format_status(report, mutation.action);
                    let action = Self::format_action(mutation.action);
                    mutation.targets.into_iter().map(move |target| MutationRow {
                        action: action.clone(),
                        ip: target.id,
                        port: target.port,
                        status: status.clone(),
                    })
                })
                .collect();

            output.push_str(&Table::new(rows).to_string());
            output.push('\n');

            let _ = writeln!(
                output,
                "\nPlan: {} to register, {} to deregister",
                report.plan.to_register.len().to_string().green(),
                report.plan.to_deregister.len().to_string().red()
            );
        }

        let elapsed = report.finished_at - report.started_at;
        let _ = writeln!(
            output,
            "Finished at {} ({} ms)",
            report.finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
            elapsed.num_milliseconds()
        );

        output
    }

    /// Formats a configuration validation result.
    #[must_use]
    pub fn format_validation(
        &self,
        config: &RunConfig,
        result: &ValidationResult,
        show_warnings: bool,
    ) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": result.is_valid(),
                    "settings": &config.settings,
                    "nlb_name": &config.nlb_name,
                    "alb_name": &config.alb_name,
                    "errors": result
                        .errors
                        .iter()
                        .map(|e| serde_json::json!({ "field": &e.field, "message": &e.message }))
                        .collect::<Vec<_>>(),
                    "warnings": &result.warnings,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = if result.is_valid() {
                    format!("{} Configuration is valid!\n", "✓".green())
                } else {
                    let mut output = format!("{} Configuration is invalid:\n", "✗".red());
                    for error in &result.errors {
                        let _ = writeln!(output, "   - {}: {}", error.field, error.message);
                    }
                    output
                };

                if show_warnings && !result.warnings.is_empty() {
                    let _ = write!(output, "\n{} Warnings:\n", "⚠".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }

                let mode = if config.settings.dry_run { "dry run" } else { "apply" };
                output.push_str("\nConfiguration summary:\n");
                let _ = writeln!(output, "   Region: {}", config.settings.region);
                let _ = writeln!(output, "   Port: {}", config.settings.port);
                let _ = writeln!(output, "   NLB: {}", config.nlb_name);
                let _ = writeln!(output, "   ALB: {}", config.alb_name);
                let _ = writeln!(output, "   Mode: {mode}");

                output
            }
        }
    }

    /// Formats a mutation kind with color.
    fn format_action(kind: MutationKind) -> String {
        match kind {
            MutationKind::Register => "+register".green().to_string(),
            MutationKind::Deregister => "-deregister".red().to_string(),
        }
    }

    /// Describes whether a planned mutation was issued.
    fn format_status(report: &SyncReport, kind: MutationKind) -> String {
        if report.mutations.iter().any(|m| m.action == kind) {
            "applied".green().to_string()
        } else if report.dry_run {
            "skipped (dry run)".dimmed().to_string()
        } else {
            "not applied".red().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AwsConfig, SyncSettings};
    use crate::planner::{PlannedMutation, TargetSet, compute_differences};
    use crate::provider::Target;
    use chrono::Utc;
    use uuid::Uuid;

    fn report(dry_run: bool) -> SyncReport {
        let nlb_targets: TargetSet = ["10.0.0.1", "10.0.0.2"].into_iter().collect();
        let alb_ips: TargetSet = ["10.0.0.2", "10.0.0.3"].into_iter().collect();
        let plan = compute_differences(&nlb_targets, &alb_ips);
        let mutations = if dry_run {
            vec![]
        } else {
            vec![PlannedMutation {
                action: MutationKind::Register,
                targets: vec![Target::new("10.0.0.3", 80)],
            }]
        };
        let now = Utc::now();

        SyncReport {
            run_id: Uuid::new_v4(),
            dry_run,
            nlb_name: String::from("edge-nlb"),
            alb_name: String::from("web-alb"),
            nlb_arn: String::from("arn:nlb"),
            target_group_arn: String::from("arn:tg"),
            port: 80,
            nlb_targets,
            alb_ips,
            plan,
            mutations,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_text_report_lists_every_target() {
        colored::control::set_override(false);
        let text = OutputFormatter::new(OutputFormat::Text).format_report(&report(true));

        assert!(text.contains("10.0.0.3"));
        assert!(text.contains("10.0.0.1"));
        assert!(text.contains("+register"));
        assert!(text.contains("-deregister"));
        assert!(text.contains("skipped (dry run)"));
    }

    #[test]
    fn test_text_report_marks_partial_apply() {
        colored::control::set_override(false);
        let text = OutputFormatter::new(OutputFormat::Text).format_report(&report(false));

        assert!(text.contains("applied"));
        assert!(text.contains("not applied"));
    }

    #[test]
    fn test_json_report() {
        let json = OutputFormatter::new(OutputFormat::Json).format_report(&report(false));
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["dry_run"], false);
        assert_eq!(value["plan"]["to_register"][0], "10.0.0.3");
        assert_eq!(value["plan"]["to_deregister"][0], "10.0.0.1");
        assert_eq!(value["mutations"][0]["action"], "register");
        assert_eq!(value["mutations"][0]["targets"][0]["port"], 80);
    }

    #[test]
    fn test_validation_json() {
        let config = RunConfig {
            settings: SyncSettings::new("eu-west-1", 443, true),
            nlb_name: String::from("edge-nlb"),
            alb_name: String::from("web-alb"),
            aws: AwsConfig::default(),
        };
        let result = ValidationResult::default();

        let json =
            OutputFormatter::new(OutputFormat::Json).format_validation(&config, &result, true);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["valid"], true);
        assert_eq!(value["settings"]["port"], 443);
        assert_eq!(value["nlb_name"], "edge-nlb");
    }
}
