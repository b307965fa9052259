//! Audit pipeline: load → extract → match → decide.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pomguard_core::config::AuditConfig;
use pomguard_core::errors::{ConfigError, ParseError};

use crate::descriptor::Descriptor;
use crate::enforcement::{AuditOutcome, EnforcementClock, EnforcementPolicy};
use crate::extract::extract;
use crate::matcher::find_mismatches;
use crate::model::{Expectations, Mismatch};

/// Everything a reporter needs about one audit run.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub descriptor: PathBuf,
    pub outcome: AuditOutcome,
    pub clock: EnforcementClock,
    /// Number of expectations checked.
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

/// Runs one descriptor through the audit pipeline.
#[derive(Debug, Clone)]
pub struct Auditor {
    expectations: Expectations,
    namespace: String,
    policy: EnforcementPolicy,
}

impl Auditor {
    pub fn new(expectations: Expectations, namespace: impl Into<String>, clock: EnforcementClock) -> Self {
        Self {
            expectations,
            namespace: namespace.into(),
            policy: EnforcementPolicy::new(clock),
        }
    }

    /// Build an auditor from resolved configuration. `today` is injected so
    /// callers (and tests) control the enforcement date.
    pub fn from_config(config: &AuditConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let expectations = Expectations::from_entries(&config.expect)?;
        let clock = EnforcementClock::new(today, config.effective_cutover()?);
        Ok(Self::new(expectations, config.effective_namespace(), clock))
    }

    pub fn expectations(&self) -> &Expectations {
        &self.expectations
    }

    pub fn clock(&self) -> &EnforcementClock {
        self.policy.clock()
    }

    /// Load and audit the descriptor at `path`.
    pub fn audit_file(&self, path: &Path) -> Result<AuditReport, ParseError> {
        let descriptor = Descriptor::load(path, &self.namespace)?;
        Ok(self.audit_descriptor(&descriptor))
    }

    /// Audit an already-parsed descriptor.
    pub fn audit_descriptor(&self, descriptor: &Descriptor) -> AuditReport {
        if self.expectations.is_empty() {
            tracing::warn!(path = %descriptor.origin().display(), "no expected dependencies configured");
        }

        let found = extract(descriptor, &self.expectations);
        let mismatches = find_mismatches(&self.expectations, &found);
        let outcome = self.policy.decide(&mismatches);

        tracing::info!(
            path = %descriptor.origin().display(),
            checked = self.expectations.len(),
            mismatches = mismatches.len(),
            outcome = %outcome,
            cutover = %self.clock().cutover,
            "dependency audit finished"
        );

        AuditReport {
            descriptor: descriptor.origin().to_path_buf(),
            outcome,
            clock: *self.clock(),
            checked: self.expectations.len(),
            mismatches,
        }
    }
}
