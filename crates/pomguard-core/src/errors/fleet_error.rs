//! Fleet binding tool errors.

use super::error_code::GuardErrorCode;
use super::{ConfigError, HostError, PatchError, ReportError};

/// Errors from the fleet binding tool. Per-project failures are recorded in
/// the report; only configuration, listing, and report errors abort a run.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Host(#[from] HostError),

    #[error("{0}")]
    Patch(#[from] PatchError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl GuardErrorCode for FleetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Host(e) => e.error_code(),
            Self::Patch(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}
