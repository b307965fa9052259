//! Descriptor parse errors.

use std::path::PathBuf;

use super::error_code::{self, GuardErrorCode};

/// Errors raised while loading a build descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot read descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed descriptor {path} at byte {position}: {message}")]
    Malformed {
        path: PathBuf,
        position: u64,
        message: String,
    },

    #[error("Descriptor {path} has no root element")]
    Empty { path: PathBuf },
}

impl ParseError {
    /// Path of the descriptor that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Malformed { path, .. } | Self::Empty { path } => path,
        }
    }
}

impl GuardErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
