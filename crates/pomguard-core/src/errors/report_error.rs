//! Report output errors.

use std::path::PathBuf;

use super::error_code::{self, GuardErrorCode};

/// Errors raised while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Cannot write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("Cannot format report as {format}: {message}")]
    Format { format: String, message: String },
}

impl GuardErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
