//! CSV report of a fleet scan.

use std::io::Write;
use std::path::Path;

use pomguard_core::errors::ReportError;

use crate::patch::ProjectOutcome;

pub const CSV_HEADER: [&str; 4] = [
    "project_name",
    "lib_found",
    "otel_binding_present",
    "action_taken",
];

/// Booleans are written as `True`/`False` and rows end in CRLF, the format
/// existing report consumers read.
fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Write the header and one row per outcome to `writer`.
pub fn write_csv_to<W: Write>(
    writer: W,
    outcomes: &[ProjectOutcome],
    origin: &Path,
) -> Result<(), ReportError> {
    let csv_err = |e: csv::Error| ReportError::Csv {
        path: origin.to_path_buf(),
        message: e.to_string(),
    };

    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    out.write_record(CSV_HEADER).map_err(csv_err)?;
    for outcome in outcomes {
        let action = outcome.action.to_string();
        out.write_record([
            outcome.project_name.as_str(),
            flag(outcome.lib_found),
            flag(outcome.binding_present),
            action.as_str(),
        ])
        .map_err(csv_err)?;
    }
    out.flush().map_err(|source| ReportError::Io {
        path: origin.to_path_buf(),
        source,
    })
}

/// Write the report file at `path`, replacing any previous one.
pub fn write_csv(path: &Path, outcomes: &[ProjectOutcome]) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv_to(file, outcomes, path)?;
    tracing::info!(path = %path.display(), rows = outcomes.len(), "report written");
    Ok(())
}
