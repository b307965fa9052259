//! Group-wide scan: list projects, run the binding rule on each, in order.

use pomguard_core::errors::FleetError;

use crate::host::SourceHost;
use crate::patch::{Action, BindingPatcher, BindingRule, ProjectOutcome};

/// Counts over one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub projects: usize,
    pub lib_found: usize,
    pub already_present: usize,
    pub pending: usize,
    pub added: usize,
    pub errors: usize,
}

impl FleetSummary {
    pub fn from_outcomes(outcomes: &[ProjectOutcome]) -> Self {
        let mut summary = Self {
            projects: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            if outcome.lib_found {
                summary.lib_found += 1;
            }
            match outcome.action {
                Action::AlreadyPresent { .. } => summary.already_present += 1,
                Action::WouldAdd { .. } => summary.pending += 1,
                Action::Added { .. } => summary.added += 1,
                Action::Error(_) => summary.errors += 1,
                Action::Skipped | Action::ConfigMissing => {}
            }
        }
        summary
    }
}

pub struct FleetScanner<'h, H: SourceHost> {
    host: &'h H,
    patcher: BindingPatcher<'h, H>,
}

impl<'h, H: SourceHost> FleetScanner<'h, H> {
    pub fn new(host: &'h H, rule: BindingRule) -> Self {
        Self {
            host,
            patcher: BindingPatcher::new(host, rule),
        }
    }

    /// One outcome per listed project, in listing order. Only a listing
    /// failure aborts the scan.
    pub fn scan(&self) -> Result<Vec<ProjectOutcome>, FleetError> {
        let projects = self.host.list_projects()?;
        tracing::info!(
            projects = projects.len(),
            dry_run = self.patcher.rule().dry_run,
            "fleet scan started"
        );

        let outcomes: Vec<ProjectOutcome> = projects
            .iter()
            .map(|project| self.patcher.process(project))
            .collect();

        let summary = FleetSummary::from_outcomes(&outcomes);
        tracing::info!(
            projects = summary.projects,
            lib_found = summary.lib_found,
            added = summary.added,
            pending = summary.pending,
            errors = summary.errors,
            "fleet scan finished"
        );
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(lib_found: bool, action: Action) -> ProjectOutcome {
        ProjectOutcome {
            project_name: "p".into(),
            lib_found,
            binding_present: matches!(action, Action::AlreadyPresent { .. }),
            action,
        }
    }

    #[test]
    fn test_summary_counts() {
        let b = || "otel".to_string();
        let summary = FleetSummary::from_outcomes(&[
            outcome(false, Action::Skipped),
            outcome(true, Action::ConfigMissing),
            outcome(true, Action::AlreadyPresent { binding: b() }),
            outcome(true, Action::WouldAdd { binding: b() }),
            outcome(true, Action::Error("x".into())),
        ]);
        assert_eq!(
            summary,
            FleetSummary {
                projects: 5,
                lib_found: 4,
                already_present: 1,
                pending: 1,
                added: 0,
                errors: 1,
            }
        );
    }
}
