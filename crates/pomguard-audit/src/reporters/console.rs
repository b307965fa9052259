//! Console reporter: one line per mismatch, or one success line.

use super::Reporter;
use crate::enforcement::AuditOutcome;
use crate::pipeline::AuditReport;

pub const SUCCESS_LINE: &str = "✅ All dependency versions match or are present.";
const WARNING_MARK: &str = "⚠️";
const ERROR_MARK: &str = "❌";

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, line: String, outcome: AuditOutcome) -> String {
        if !self.use_color {
            return line;
        }
        let color = match outcome {
            AuditOutcome::Pass => "\x1b[32m",     // green
            AuditOutcome::WarnPass => "\x1b[33m", // yellow
            AuditOutcome::Fail => "\x1b[31m",     // red
        };
        format!("{color}{line}\x1b[0m")
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &AuditReport) -> Result<String, String> {
        let mut output = String::new();
        let mark = match report.outcome {
            AuditOutcome::Pass => {
                output.push_str(&self.paint(SUCCESS_LINE.to_string(), report.outcome));
                output.push('\n');
                return Ok(output);
            }
            AuditOutcome::WarnPass => WARNING_MARK,
            AuditOutcome::Fail => ERROR_MARK,
        };

        for mismatch in &report.mismatches {
            output.push_str(&self.paint(format!("{mark} {mismatch}"), report.outcome));
            output.push('\n');
        }

        let clock = &report.clock;
        let footer = if report.outcome == AuditOutcome::Fail {
            format!("{mark} Enforcement active since {}.", clock.cutover)
        } else {
            format!(
                "{mark} Dependency mismatches will fail the build starting {} ({} days left).",
                clock.cutover,
                clock.days_until_cutover()
            )
        };
        output.push_str(&self.paint(footer, report.outcome));
        output.push('\n');

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcement::EnforcementClock;
    use crate::model::{DependencyKey, ExpectedVersion, FoundVersion, Mismatch};
    use chrono::NaiveDate;

    fn report(outcome: AuditOutcome, today: (i32, u32, u32)) -> AuditReport {
        let mismatches = if outcome == AuditOutcome::Pass {
            vec![]
        } else {
            vec![Mismatch {
                key: DependencyKey::new("g", "a"),
                expected: ExpectedVersion::Exact("1.0.0".into()),
                found: FoundVersion::Declared("0.9.0".into()),
            }]
        };
        AuditReport {
            descriptor: "pom.xml".into(),
            outcome,
            clock: EnforcementClock::new(
                NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            ),
            checked: 1,
            mismatches,
        }
    }

    #[test]
    fn test_pass_prints_single_success_line() {
        let out = ConsoleReporter::default()
            .generate(&report(AuditOutcome::Pass, (2025, 6, 1)))
            .unwrap();
        assert_eq!(out, format!("{SUCCESS_LINE}\n"));
    }

    #[test]
    fn test_warn_lines_mention_cutover() {
        let out = ConsoleReporter::default()
            .generate(&report(AuditOutcome::WarnPass, (2025, 6, 21)))
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "⚠️ Mismatch for g:a - Expected: 1.0.0, Found: 0.9.0");
        assert!(lines[1].contains("2025-07-01"));
        assert!(lines[1].contains("10 days left"));
    }

    #[test]
    fn test_fail_lines_use_error_mark() {
        let out = ConsoleReporter::default()
            .generate(&report(AuditOutcome::Fail, (2025, 7, 1)))
            .unwrap();
        assert!(out.starts_with("❌ Mismatch for g:a - Expected: 1.0.0, Found: 0.9.0\n"));
        assert!(out.contains("Enforcement active since 2025-07-01"));
    }

    #[test]
    fn test_color_wraps_lines() {
        let out = ConsoleReporter::new(true)
            .generate(&report(AuditOutcome::Fail, (2025, 7, 1)))
            .unwrap();
        assert!(out.starts_with("\x1b[31m"));
    }
}
