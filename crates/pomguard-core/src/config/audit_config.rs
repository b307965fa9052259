//! Dependency audit configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DATE_FORMAT, DEFAULT_CUTOVER, DEFAULT_DESCRIPTOR, MAVEN_POM_NAMESPACE};
use crate::errors::ConfigError;

/// One expected dependency. A missing `version` means the dependency only
/// has to be declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectEntry {
    pub group: String,
    pub artifact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ExpectEntry {
    /// Parse `group:artifact` or `group:artifact=version`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            field: "expect".to_string(),
            message: format!("{message}: `{raw}`"),
        };

        let (coords, version) = match raw.split_once('=') {
            Some((coords, version)) => (coords, Some(version.trim())),
            None => (raw, None),
        };
        let (group, artifact) = coords
            .split_once(':')
            .ok_or_else(|| invalid("expected group:artifact[=version]"))?;
        let (group, artifact) = (group.trim(), artifact.trim());
        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            return Err(invalid("expected group:artifact[=version]"));
        }
        if version.is_some_and(str::is_empty) {
            return Err(invalid("empty version"));
        }

        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.map(str::to_string),
        })
    }
}

/// Configuration for the dependency-version auditor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Descriptor path. Default: `pom.xml`.
    pub descriptor: Option<String>,
    /// Descriptor namespace URI. Empty string matches unqualified elements.
    pub namespace: Option<String>,
    /// Cutover date (`YYYY-MM-DD`). Mismatches fail the audit from this day on.
    pub cutover: Option<String>,
    /// Report format: "console" | "json". Default: "console".
    pub format: Option<String>,
    /// Expected dependencies, in report order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expect: Vec<ExpectEntry>,
}

impl AuditConfig {
    pub fn effective_descriptor(&self) -> &str {
        self.descriptor.as_deref().unwrap_or(DEFAULT_DESCRIPTOR)
    }

    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(MAVEN_POM_NAMESPACE)
    }

    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or("console")
    }

    /// Returns the parsed cutover date, defaulting to [`DEFAULT_CUTOVER`].
    pub fn effective_cutover(&self) -> Result<NaiveDate, ConfigError> {
        let raw = self.cutover.as_deref().unwrap_or(DEFAULT_CUTOVER);
        parse_date("audit.cutover", raw)
    }
}

/// Parse a `YYYY-MM-DD` date for the named config field.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("`{raw}` is not a YYYY-MM-DD date ({e})"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expect_with_version() {
        let e = ExpectEntry::parse("com.example:my-library=1.0.0").unwrap();
        assert_eq!(e.group, "com.example");
        assert_eq!(e.artifact, "my-library");
        assert_eq!(e.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_parse_expect_presence_only() {
        let e = ExpectEntry::parse("org.slf4j:slf4j-api").unwrap();
        assert_eq!(e.version, None);
    }

    #[test]
    fn test_parse_expect_rejects_garbage() {
        assert!(ExpectEntry::parse("no-colon").is_err());
        assert!(ExpectEntry::parse(":artifact").is_err());
        assert!(ExpectEntry::parse("g:a:b").is_err());
        assert!(ExpectEntry::parse("g:a=").is_err());
    }

    #[test]
    fn test_default_cutover_parses() {
        let cfg = AuditConfig::default();
        assert_eq!(
            cfg.effective_cutover().unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_bad_cutover_is_invalid_value() {
        let cfg = AuditConfig {
            cutover: Some("01/07/2025".into()),
            ..Default::default()
        };
        assert!(matches!(
            cfg.effective_cutover(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
