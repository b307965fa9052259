//! Fleet binding tool configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::ConfigError;

/// Configuration for the fleet-wide binding tool.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FleetConfig {
    /// GitLab base URL, without `/api/v4`. Default: `https://gitlab.com`.
    pub gitlab_url: Option<String>,
    /// Personal access token. Never written back by `to_toml`.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Group whose projects (including subgroups) are scanned.
    pub group_id: Option<String>,
    /// Report what would change without committing. Default: true.
    pub dry_run: Option<bool>,
    /// Branch read and written. Default: `main`.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Build descriptor inspected for the library marker. Default: `pom.xml`.
    pub descriptor_path: Option<String>,
    /// Substring marking use of the telemetry library.
    pub library_marker: Option<String>,
    /// Deployment config file to patch.
    pub deploy_config_path: Option<String>,
    /// YAML key holding the binding list.
    pub bindings_key: Option<String>,
    /// Binding to add.
    pub binding: Option<String>,
    /// Commit message used for the patch.
    pub commit_message: Option<String>,
    /// CSV report path. Default: `report.csv`.
    pub report_path: Option<String>,
    /// Projects per listing page (1-100). Default: 100.
    pub page_size: Option<u32>,
    /// HTTP timeout in seconds. Default: 30.
    pub timeout_secs: Option<u64>,
}

impl FleetConfig {
    pub fn effective_gitlab_url(&self) -> &str {
        self.gitlab_url.as_deref().unwrap_or(DEFAULT_GITLAB_URL)
    }

    pub fn effective_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(true)
    }

    pub fn effective_ref(&self) -> &str {
        self.git_ref.as_deref().unwrap_or(DEFAULT_REF)
    }

    pub fn effective_descriptor_path(&self) -> &str {
        self.descriptor_path.as_deref().unwrap_or(DEFAULT_DESCRIPTOR)
    }

    pub fn effective_library_marker(&self) -> &str {
        self.library_marker.as_deref().unwrap_or(DEFAULT_LIBRARY_MARKER)
    }

    pub fn effective_deploy_config_path(&self) -> &str {
        self.deploy_config_path
            .as_deref()
            .unwrap_or(DEFAULT_DEPLOY_CONFIG_PATH)
    }

    pub fn effective_bindings_key(&self) -> &str {
        self.bindings_key.as_deref().unwrap_or(DEFAULT_BINDINGS_KEY)
    }

    pub fn effective_binding(&self) -> &str {
        self.binding.as_deref().unwrap_or(DEFAULT_BINDING)
    }

    pub fn effective_commit_message(&self) -> &str {
        self.commit_message.as_deref().unwrap_or(DEFAULT_COMMIT_MESSAGE)
    }

    pub fn effective_report_path(&self) -> &str {
        self.report_path.as_deref().unwrap_or(DEFAULT_REPORT_PATH)
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// The access token, or `ConfigError::Missing`.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "fleet.token".to_string(),
                hint: "GITLAB_TOKEN".to_string(),
            })
    }

    /// The group id, or `ConfigError::Missing`.
    pub fn require_group_id(&self) -> Result<&str, ConfigError> {
        self.group_id
            .as_deref()
            .filter(|g| !g.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "fleet.group_id".to_string(),
                hint: "GROUP_ID".to_string(),
            })
    }
}

/// Turns a `CI_API_V4_URL` style value into the instance base URL.
pub fn base_url_from_api_url(api_url: &str) -> String {
    api_url
        .trim_end_matches('/')
        .replace("/api/v4", "")
}
