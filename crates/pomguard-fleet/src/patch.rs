//! Per-project binding rule.

use std::fmt;

use pomguard_core::config::FleetConfig;
use pomguard_core::errors::FleetError;

use crate::deploy_config::DeployConfig;
use crate::host::{FileUpdate, ProjectRef, SourceHost};

/// What the rule did to one project. `Display` gives the report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The descriptor is absent or does not mention the library.
    Skipped,
    /// The library is used but the deployment config does not exist.
    ConfigMissing,
    AlreadyPresent { binding: String },
    /// Dry run: the binding is missing and would be added.
    WouldAdd { binding: String },
    Added { binding: String },
    Error(String),
}

impl Action {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("skipped"),
            Self::ConfigMissing => f.write_str("pcf config missing"),
            Self::AlreadyPresent { binding } => write!(f, "{binding} already present"),
            Self::WouldAdd { binding } => write!(f, "would add {binding}"),
            Self::Added { binding } => write!(f, "{binding} added"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub project_name: String,
    pub lib_found: bool,
    pub binding_present: bool,
    pub action: Action,
}

impl ProjectOutcome {
    fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            lib_found: false,
            binding_present: false,
            action: Action::Skipped,
        }
    }
}

/// Paths, marker, and binding the rule works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRule {
    pub descriptor_path: String,
    pub library_marker: String,
    pub deploy_config_path: String,
    pub bindings_key: String,
    pub binding: String,
    pub git_ref: String,
    pub commit_message: String,
    pub dry_run: bool,
}

impl BindingRule {
    pub fn from_config(config: &FleetConfig) -> Self {
        Self {
            descriptor_path: config.effective_descriptor_path().to_string(),
            library_marker: config.effective_library_marker().to_string(),
            deploy_config_path: config.effective_deploy_config_path().to_string(),
            bindings_key: config.effective_bindings_key().to_string(),
            binding: config.effective_binding().to_string(),
            git_ref: config.effective_ref().to_string(),
            commit_message: config.effective_commit_message().to_string(),
            dry_run: config.effective_dry_run(),
        }
    }
}

impl Default for BindingRule {
    fn default() -> Self {
        Self::from_config(&FleetConfig::default())
    }
}

/// Applies a [`BindingRule`] to projects on a [`SourceHost`].
pub struct BindingPatcher<'h, H: SourceHost> {
    host: &'h H,
    rule: BindingRule,
}

impl<'h, H: SourceHost> BindingPatcher<'h, H> {
    pub fn new(host: &'h H, rule: BindingRule) -> Self {
        Self { host, rule }
    }

    pub fn rule(&self) -> &BindingRule {
        &self.rule
    }

    /// Run the rule on one project. Failures become [`Action::Error`]; flags
    /// established before the failure are kept.
    pub fn process(&self, project: &ProjectRef) -> ProjectOutcome {
        let mut outcome = ProjectOutcome::new(&project.name);
        match self.try_process(project, &mut outcome) {
            Ok(action) => outcome.action = action,
            Err(e) => {
                tracing::warn!(project = %project.name, error = %e, "project failed");
                outcome.action = Action::Error(e.to_string());
            }
        }
        tracing::debug!(
            project = %project.name,
            lib_found = outcome.lib_found,
            binding_present = outcome.binding_present,
            action = %outcome.action,
            "project processed"
        );
        outcome
    }

    fn try_process(
        &self,
        project: &ProjectRef,
        outcome: &mut ProjectOutcome,
    ) -> Result<Action, FleetError> {
        let rule = &self.rule;

        let descriptor = self
            .host
            .get_file(project, &rule.descriptor_path, &rule.git_ref)?;
        outcome.lib_found = descriptor.is_some_and(|text| text.contains(&rule.library_marker));
        if !outcome.lib_found {
            return Ok(Action::Skipped);
        }

        let Some(content) = self
            .host
            .get_file(project, &rule.deploy_config_path, &rule.git_ref)?
        else {
            return Ok(Action::ConfigMissing);
        };

        let mut config = DeployConfig::parse(&rule.deploy_config_path, &content)?;
        if config.has_binding(&rule.bindings_key, &rule.binding)? {
            outcome.binding_present = true;
            return Ok(Action::AlreadyPresent {
                binding: rule.binding.clone(),
            });
        }

        if rule.dry_run {
            return Ok(Action::WouldAdd {
                binding: rule.binding.clone(),
            });
        }

        config.add_binding(&rule.bindings_key, &rule.binding)?;
        let update = FileUpdate {
            path: rule.deploy_config_path.clone(),
            branch: rule.git_ref.clone(),
            content: config.to_yaml()?,
            commit_message: rule.commit_message.clone(),
        };
        self.host.update_file(project, &update)?;
        tracing::info!(project = %project.name, binding = %rule.binding, "binding added");

        Ok(Action::Added {
            binding: rule.binding.clone(),
        })
    }
}
