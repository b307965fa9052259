//! Top-level pomguard configuration with layered resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::audit_config::parse_date;
use super::fleet_config::base_url_from_api_url;
use super::{AuditConfig, ExpectEntry, FleetConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`POMGUARD_*`, plus the GitLab CI variables
///    `GITLAB_TOKEN`, `CI_API_V4_URL`, `GROUP_ID`, `DRY_RUN`)
/// 3. Project config (`pomguard.toml` in the project root, or `--config`)
/// 4. User config (`~/.pomguard/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PomguardConfig {
    pub audit: AuditConfig,
    pub fleet: FleetConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file; replaces the project-config lookup and must exist.
    pub config_path: Option<PathBuf>,
    pub descriptor: Option<String>,
    pub namespace: Option<String>,
    pub cutover: Option<String>,
    pub format: Option<String>,
    /// Appended after the configured expectations.
    pub expect: Vec<ExpectEntry>,
    pub gitlab_url: Option<String>,
    pub group_id: Option<String>,
    pub dry_run: Option<bool>,
    pub git_ref: Option<String>,
    pub report_path: Option<String>,
}

impl PomguardConfig {
    /// Load configuration with layered resolution, rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match cli_overrides.and_then(|cli| cli.config_path.as_deref()) {
            Some(explicit) => Self::merge_toml_file(&mut config, explicit)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(
            expectations = config.audit.expect.len(),
            descriptor = config.audit.effective_descriptor(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PomguardConfig) -> Result<(), ConfigError> {
        if let Some(ref cutover) = config.audit.cutover {
            parse_date("audit.cutover", cutover)?;
        }
        if let Some(ref format) = config.audit.format {
            if !matches!(format.as_str(), "console" | "json") {
                return Err(ConfigError::ValidationFailed {
                    field: "audit.format".to_string(),
                    message: format!("unknown format `{format}` (expected console or json)"),
                });
            }
        }
        if config.audit.effective_descriptor().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "audit.descriptor".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &config.audit.expect {
            if entry.group.trim().is_empty() || entry.artifact.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "audit.expect".to_string(),
                    message: "group and artifact must not be empty".to_string(),
                });
            }
            if entry.version.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: "audit.expect".to_string(),
                    message: format!(
                        "{}:{} has an empty version (omit it to require presence only)",
                        entry.group, entry.artifact
                    ),
                });
            }
            if !seen.insert((entry.group.as_str(), entry.artifact.as_str())) {
                return Err(ConfigError::ValidationFailed {
                    field: "audit.expect".to_string(),
                    message: format!("duplicate expectation for {}:{}", entry.group, entry.artifact),
                });
            }
        }

        let url = config.fleet.effective_gitlab_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                field: "fleet.gitlab_url".to_string(),
                message: format!("`{url}` must be an http(s) URL"),
            });
        }
        if let Some(page_size) = config.fleet.page_size {
            if !(1..=100).contains(&page_size) {
                return Err(ConfigError::ValidationFailed {
                    field: "fleet.page_size".to_string(),
                    message: "must be between 1 and 100".to_string(),
                });
            }
        }
        if config.fleet.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "fleet.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (field, value) in [
            ("fleet.binding", config.fleet.effective_binding()),
            ("fleet.bindings_key", config.fleet.effective_bindings_key()),
            ("fleet.deploy_config_path", config.fleet.effective_deploy_config_path()),
            ("fleet.library_marker", config.fleet.effective_library_marker()),
            ("fleet.report_path", config.fleet.effective_report_path()),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pomguard/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PomguardConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PomguardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut PomguardConfig, other: PomguardConfig) {
        let (audit, fleet) = (other.audit, other.fleet);

        // Audit
        if audit.descriptor.is_some() {
            base.audit.descriptor = audit.descriptor;
        }
        if audit.namespace.is_some() {
            base.audit.namespace = audit.namespace;
        }
        if audit.cutover.is_some() {
            base.audit.cutover = audit.cutover;
        }
        if audit.format.is_some() {
            base.audit.format = audit.format;
        }
        if !audit.expect.is_empty() {
            base.audit.expect = audit.expect;
        }

        // Fleet
        macro_rules! take {
            ($($field:ident),*) => {
                $(if fleet.$field.is_some() { base.fleet.$field = fleet.$field; })*
            };
        }
        take!(
            gitlab_url,
            token,
            group_id,
            dry_run,
            git_ref,
            descriptor_path,
            library_marker,
            deploy_config_path,
            bindings_key,
            binding,
            commit_message,
            report_path,
            page_size,
            timeout_secs
        );
    }

    /// Apply environment variable overrides.
    ///
    /// The GitLab CI variables are applied first so the explicit
    /// `POMGUARD_*` forms win when both are set.
    fn apply_env_overrides(config: &mut PomguardConfig) {
        if let Some(val) = env_var("GITLAB_TOKEN") {
            config.fleet.token = Some(val);
        }
        if let Some(val) = env_var("CI_API_V4_URL") {
            config.fleet.gitlab_url = Some(base_url_from_api_url(&val));
        }
        if let Some(val) = env_var("GROUP_ID") {
            config.fleet.group_id = Some(val);
        }
        if let Some(val) = env_var("DRY_RUN") {
            config.fleet.dry_run = Some(!val.eq_ignore_ascii_case("false"));
        }

        if let Some(val) = env_var("POMGUARD_AUDIT_DESCRIPTOR") {
            config.audit.descriptor = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_AUDIT_NAMESPACE") {
            config.audit.namespace = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_AUDIT_CUTOVER") {
            config.audit.cutover = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_AUDIT_FORMAT") {
            config.audit.format = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_FLEET_GITLAB_URL") {
            config.fleet.gitlab_url = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_FLEET_GROUP_ID") {
            config.fleet.group_id = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_FLEET_DRY_RUN") {
            if let Ok(v) = val.parse::<bool>() {
                config.fleet.dry_run = Some(v);
            }
        }
        if let Some(val) = env_var("POMGUARD_FLEET_REF") {
            config.fleet.git_ref = Some(val);
        }
        if let Some(val) = env_var("POMGUARD_FLEET_REPORT_PATH") {
            config.fleet.report_path = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PomguardConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.descriptor {
            config.audit.descriptor = Some(v.clone());
        }
        if let Some(ref v) = cli.namespace {
            config.audit.namespace = Some(v.clone());
        }
        if let Some(ref v) = cli.cutover {
            config.audit.cutover = Some(v.clone());
        }
        if let Some(ref v) = cli.format {
            config.audit.format = Some(v.clone());
        }
        config.audit.expect.extend(cli.expect.iter().cloned());
        if let Some(ref v) = cli.gitlab_url {
            config.fleet.gitlab_url = Some(v.clone());
        }
        if let Some(ref v) = cli.group_id {
            config.fleet.group_id = Some(v.clone());
        }
        if let Some(v) = cli.dry_run {
            config.fleet.dry_run = Some(v);
        }
        if let Some(ref v) = cli.git_ref {
            config.fleet.git_ref = Some(v.clone());
        }
        if let Some(ref v) = cli.report_path {
            config.fleet.report_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML. The access token is never written.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Non-empty environment variable value.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
