//! Enforcement policy: Pass, WarnPass, or Fail from mismatches and the clock.

use serde::{Deserialize, Serialize};

use super::clock::EnforcementClock;
use crate::model::Mismatch;

/// Result of an audit run. Every state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// No mismatches.
    Pass,
    /// Mismatches found before the cutover date.
    WarnPass,
    /// Mismatches found on or after the cutover date.
    Fail,
}

impl AuditOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::WarnPass => "warn_pass",
            Self::Fail => "fail",
        }
    }

    /// Process exit code: 0 unless enforcement failed the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Pass | Self::WarnPass => 0,
            Self::Fail => 1,
        }
    }
}

impl std::fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Grace-period enforcement: mismatches warn until the cutover date, then fail.
#[derive(Debug, Clone, Copy)]
pub struct EnforcementPolicy {
    clock: EnforcementClock,
}

impl EnforcementPolicy {
    pub fn new(clock: EnforcementClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &EnforcementClock {
        &self.clock
    }

    pub fn decide(&self, mismatches: &[Mismatch]) -> AuditOutcome {
        if mismatches.is_empty() {
            AuditOutcome::Pass
        } else if self.clock.is_enforcing() {
            AuditOutcome::Fail
        } else {
            AuditOutcome::WarnPass
        }
    }
}
