//! JSON reporter for pipelines that post-process audit results.

use serde_json::{json, Value};

use super::Reporter;
use crate::pipeline::AuditReport;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &AuditReport) -> Result<String, String> {
        let mismatches: Vec<Value> = report
            .mismatches
            .iter()
            .map(|m| {
                json!({
                    "dependency": m.key.to_string(),
                    "group": m.key.group(),
                    "artifact": m.key.artifact(),
                    "expected": m.expected.to_string(),
                    "found": m.found.as_declared(),
                })
            })
            .collect();

        let doc = json!({
            "descriptor": report.descriptor.display().to_string(),
            "outcome": report.outcome,
            "exit_code": report.outcome.exit_code(),
            "today": report.clock.today,
            "cutover": report.clock.cutover,
            "enforcing": report.clock.is_enforcing(),
            "checked": report.checked,
            "mismatches": mismatches,
        });

        serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())
    }
}
