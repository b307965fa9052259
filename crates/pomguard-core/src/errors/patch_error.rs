//! Deployment-config patch errors.

use super::error_code::{self, GuardErrorCode};

/// Errors raised while inspecting or rewriting a deployment config file.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Invalid YAML in {path}: {message}")]
    InvalidYaml { path: String, message: String },

    #[error("{path} is not a YAML mapping")]
    NotAMapping { path: String },

    #[error("`{key}` in {path} is not a list")]
    BindingsNotAList { path: String, key: String },

    #[error("Cannot serialize {path}: {message}")]
    Serialize { path: String, message: String },
}

impl GuardErrorCode for PatchError {
    fn error_code(&self) -> &'static str {
        error_code::PATCH_ERROR
    }
}
