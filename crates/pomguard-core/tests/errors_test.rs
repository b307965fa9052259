//! Tests for the pomguard error handling system.

use std::path::PathBuf;

use pomguard_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let parse = ParseError::Empty {
        path: PathBuf::from("pom.xml"),
    };
    assert_eq!(parse.error_code(), "PARSE_ERROR");

    let config = ConfigError::Missing {
        field: "fleet.token".into(),
        hint: "GITLAB_TOKEN".into(),
    };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let host = HostError::Status {
        url: "https://gitlab.com/api/v4/groups/1/projects".into(),
        status: 500,
        body: "boom".into(),
    };
    assert_eq!(host.error_code(), "HOST_ERROR");
    assert_eq!(HostError::ProjectNotFound { project: 7 }.error_code(), "NOT_FOUND");

    let patch = PatchError::NotAMapping {
        path: "config/pcf/prd.yml".into(),
    };
    assert_eq!(patch.error_code(), "PATCH_ERROR");

    let report = ReportError::Format {
        format: "json".into(),
        message: "nope".into(),
    };
    assert_eq!(report.error_code(), "REPORT_ERROR");
}

#[test]
fn test_audit_error_from_conversions() {
    let parse = ParseError::Malformed {
        path: PathBuf::from("pom.xml"),
        position: 12,
        message: "mismatched end tag".into(),
    };
    let audit: AuditError = parse.into();
    assert!(matches!(audit, AuditError::Parse(ParseError::Malformed { .. })));
    assert_eq!(audit.error_code(), "PARSE_ERROR");

    let config = ConfigError::FileNotFound {
        path: "pomguard.toml".into(),
    };
    let audit: AuditError = config.into();
    assert_eq!(audit.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_tagged_format() {
    let err = ParseError::Empty {
        path: PathBuf::from("pom.xml"),
    };
    assert_eq!(err.tagged(), "[PARSE_ERROR] Descriptor pom.xml has no root element");
}

#[test]
fn test_parse_error_keeps_io_source() {
    let err = ParseError::Io {
        path: PathBuf::from("missing.xml"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    assert!(err.to_string().contains("no such file"));
    assert_eq!(err.path(), std::path::Path::new("missing.xml"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_fleet_error_delegates_codes() {
    let err: FleetError = HostError::ProjectNotFound { project: 3 }.into();
    assert_eq!(err.error_code(), "NOT_FOUND");
    let err: FleetError = PatchError::BindingsNotAList {
        path: "config/pcf/prd.yml".into(),
        key: "bindings".into(),
    }
    .into();
    assert_eq!(err.error_code(), "PATCH_ERROR");
    assert_eq!(err.to_string(), "`bindings` in config/pcf/prd.yml is not a list");
}
