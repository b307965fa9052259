//! `pomguard audit`.

use std::io::IsTerminal;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use pomguard_audit::descriptor::Descriptor;
use pomguard_audit::extract::extract_all;
use pomguard_audit::reporters::{available_formats, create_reporter};
use pomguard_audit::Auditor;
use pomguard_core::config::audit_config::parse_date;
use pomguard_core::config::CliOverrides;
use pomguard_core::errors::{AuditError, ConfigError, ReportError};

use super::load_config;
use crate::cli::AuditArgs;

pub fn run_audit(args: AuditArgs, config_path: Option<&Path>) -> Result<i32, AuditError> {
    let overrides = CliOverrides {
        descriptor: args.pom.as_ref().map(|p| p.display().to_string()),
        namespace: args.namespace,
        cutover: args.cutover,
        format: args.format,
        expect: args.expect,
        ..CliOverrides::default()
    };
    let (root, config) = load_config(config_path, overrides)?;
    let descriptor_path = root.join(config.audit.effective_descriptor());

    if args.list {
        let descriptor = Descriptor::load(&descriptor_path, config.audit.effective_namespace())?;
        let mut found: Vec<_> = extract_all(&descriptor).into_iter().collect();
        found.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, version) in found {
            println!("{key} {version}");
        }
        return Ok(0);
    }

    let today = resolve_today(args.today.as_deref())?;
    let auditor = Auditor::from_config(&config.audit, today)?;
    let report = auditor.audit_file(&descriptor_path)?;

    let format = config.audit.effective_format();
    let reporter = create_reporter(format, std::io::stdout().is_terminal()).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: "audit.format".to_string(),
            message: format!(
                "unknown format `{format}` (available: {})",
                available_formats().join(", ")
            ),
        }
    })?;
    let output = reporter
        .generate(&report)
        .map_err(|message| ReportError::Format {
            format: reporter.name().to_string(),
            message,
        })?;
    print!("{output}");

    Ok(report.outcome.exit_code())
}

fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, ConfigError> {
    match raw {
        Some(raw) => parse_date("today", raw),
        None => Ok(Utc::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_today() {
        assert_eq!(
            resolve_today(Some("2025-06-30")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
        );
        assert!(resolve_today(Some("30/06/2025")).is_err());
        assert!(resolve_today(None).is_ok());
    }
}
