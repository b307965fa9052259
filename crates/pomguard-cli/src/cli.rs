//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pomguard_core::config::ExpectEntry;

/// pomguard - dependency version audit and fleet telemetry binding.
#[derive(Parser, Debug)]
#[command(name = "pomguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (replaces ./pomguard.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). POMGUARD_LOG wins when set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check declared dependency versions against the expected ones.
    Audit(AuditArgs),
    /// Add the telemetry binding to deployment configs across a GitLab group.
    Bind(BindArgs),
    /// Configuration operations.
    Config(ConfigArgs),
}

/// Audit options.
#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Build descriptor to audit. Default: `pom.xml`.
    #[arg(long)]
    pub pom: Option<PathBuf>,

    /// Expected dependency as `group:artifact[=version]`; repeatable.
    /// Without a version only presence is required.
    #[arg(long = "expect", value_name = "GROUP:ARTIFACT[=VERSION]", value_parser = ExpectEntry::parse)]
    pub expect: Vec<ExpectEntry>,

    /// Enforcement cutover date (YYYY-MM-DD).
    #[arg(long)]
    pub cutover: Option<String>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today (UTC).
    #[arg(long)]
    pub today: Option<String>,

    /// Namespace URI of descriptor elements.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Output format (console, json).
    #[arg(long)]
    pub format: Option<String>,

    /// List every declared dependency instead of auditing.
    #[arg(long)]
    pub list: bool,
}

/// Fleet binding options. Token comes from `GITLAB_TOKEN`.
#[derive(Args, Debug, Default)]
pub struct BindArgs {
    /// GitLab group id (or `GROUP_ID`).
    #[arg(long)]
    pub group_id: Option<String>,

    /// GitLab base URL (or `CI_API_V4_URL`).
    #[arg(long)]
    pub gitlab_url: Option<String>,

    /// Branch read and written.
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// CSV report path.
    #[arg(long)]
    pub report: Option<String>,

    /// Commit changes. Without it the run only reports.
    #[arg(long, conflicts_with = "dry_run")]
    pub apply: bool,

    /// Force a dry run even when `DRY_RUN=false`.
    #[arg(long)]
    pub dry_run: bool,
}

/// Configuration operations.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration as TOML.
    Show,
    /// Resolve and validate the configuration.
    Validate,
}
