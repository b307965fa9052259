//! Source-host (GitLab) errors.

use super::error_code::{self, GuardErrorCode};

/// Errors returned by a source-control host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("HTTP {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Cannot decode {what}: {message}")]
    Decode { what: String, message: String },

    #[error("Invalid host URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Project {project} not found")]
    ProjectNotFound { project: u64 },
}

impl GuardErrorCode for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound { .. } => error_code::NOT_FOUND,
            _ => error_code::HOST_ERROR,
        }
    }
}
