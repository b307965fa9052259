//! Tests for the pomguard configuration system.

use std::sync::Mutex;

use pomguard_core::config::{CliOverrides, ExpectEntry, PomguardConfig};
use pomguard_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear every variable the loader reads, and point HOME at an empty
/// directory so a developer's user config cannot leak in.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "GITLAB_TOKEN",
        "CI_API_V4_URL",
        "GROUP_ID",
        "DRY_RUN",
        "POMGUARD_AUDIT_DESCRIPTOR",
        "POMGUARD_AUDIT_NAMESPACE",
        "POMGUARD_AUDIT_CUTOVER",
        "POMGUARD_AUDIT_FORMAT",
        "POMGUARD_FLEET_GITLAB_URL",
        "POMGUARD_FLEET_GROUP_ID",
        "POMGUARD_FLEET_DRY_RUN",
        "POMGUARD_FLEET_REF",
        "POMGUARD_FLEET_REPORT_PATH",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

const PROJECT_TOML: &str = r#"
[audit]
descriptor = "service/pom.xml"
cutover = "2025-07-01"

[[audit.expect]]
group = "org.springframework.boot"
artifact = "spring-boot-starter-web"
version = "3.2.1"

[[audit.expect]]
group = "com.example"
artifact = "my-library"

[fleet]
group_id = "42"
dry_run = false
"#;

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".pomguard");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[fleet]\nreport_path = \"user.csv\"\nbinding = \"tracing\"\n",
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(dir.path().join("pomguard.toml"), PROJECT_TOML).unwrap();
    std::env::set_var("POMGUARD_AUDIT_CUTOVER", "2025-08-01");
    std::env::set_var("GITLAB_TOKEN", "glpat-secret");

    let cli = CliOverrides {
        report_path: Some("cli.csv".into()),
        ..Default::default()
    };
    let config = PomguardConfig::load(dir.path(), Some(&cli)).unwrap();

    // Project config over defaults
    assert_eq!(config.audit.effective_descriptor(), "service/pom.xml");
    assert_eq!(config.audit.expect.len(), 2);
    // Env over project
    assert_eq!(config.audit.cutover.as_deref(), Some("2025-08-01"));
    assert_eq!(config.fleet.require_token().unwrap(), "glpat-secret");
    // CLI over user config
    assert_eq!(config.fleet.effective_report_path(), "cli.csv");
    // User config survives where nothing overrides it
    assert_eq!(config.fleet.effective_binding(), "tracing");
    assert!(!config.fleet.effective_dry_run());

    isolate_env(home.path());
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = PomguardConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.audit.effective_descriptor(), "pom.xml");
    assert_eq!(
        config.audit.effective_namespace(),
        "http://maven.apache.org/POM/4.0.0"
    );
    assert!(config.audit.expect.is_empty());
    assert!(config.fleet.effective_dry_run());
}

#[test]
fn test_explicit_config_path_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let cli = CliOverrides {
        config_path: Some(dir.path().join("nope.toml")),
        ..Default::default()
    };
    let err = PomguardConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_ci_variables() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("CI_API_V4_URL", "https://gitlab.internal/api/v4");
    std::env::set_var("GROUP_ID", "1234");
    std::env::set_var("DRY_RUN", "FALSE");

    let dir = tempdir();
    let config = PomguardConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.fleet.effective_gitlab_url(), "https://gitlab.internal");
    assert_eq!(config.fleet.require_group_id().unwrap(), "1234");
    assert!(!config.fleet.effective_dry_run());

    // Anything other than "false" keeps the dry run on.
    std::env::set_var("DRY_RUN", "no");
    let config = PomguardConfig::load(dir.path(), None).unwrap();
    assert!(config.fleet.effective_dry_run());

    isolate_env(home.path());
}

#[test]
fn test_cli_expectations_are_appended() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("pomguard.toml"), PROJECT_TOML).unwrap();
    let cli = CliOverrides {
        expect: vec![ExpectEntry::parse("org.slf4j:slf4j-api=2.0.9").unwrap()],
        ..Default::default()
    };
    let config = PomguardConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.audit.expect.len(), 3);
    assert_eq!(config.audit.expect[2].artifact, "slf4j-api");
}

#[test]
fn test_duplicate_expectation_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("pomguard.toml"), PROJECT_TOML).unwrap();
    let cli = CliOverrides {
        expect: vec![ExpectEntry::parse("com.example:my-library=2.0.0").unwrap()],
        ..Default::default()
    };
    let err = PomguardConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "audit.expect"));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = PomguardConfig::from_toml("[audit\ncutover =").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rules() {
    let bad_date = PomguardConfig::from_toml("[audit]\ncutover = \"July 1st\"\n").unwrap();
    assert!(matches!(
        PomguardConfig::validate(&bad_date),
        Err(ConfigError::InvalidValue { .. })
    ));

    let bad_format = PomguardConfig::from_toml("[audit]\nformat = \"xml\"\n").unwrap();
    assert!(PomguardConfig::validate(&bad_format).is_err());

    let bad_url = PomguardConfig::from_toml("[fleet]\ngitlab_url = \"gitlab.com\"\n").unwrap();
    assert!(PomguardConfig::validate(&bad_url).is_err());

    let bad_page = PomguardConfig::from_toml("[fleet]\npage_size = 500\n").unwrap();
    assert!(PomguardConfig::validate(&bad_page).is_err());

    let empty_version = PomguardConfig::from_toml(
        "[[audit.expect]]\ngroup = \"g\"\nartifact = \"a\"\nversion = \"\"\n",
    )
    .unwrap();
    assert!(PomguardConfig::validate(&empty_version).is_err());
}

#[test]
fn test_to_toml_never_writes_token() {
    let mut config = PomguardConfig::from_toml(PROJECT_TOML).unwrap();
    config.fleet.token = Some("glpat-secret".into());
    let out = config.to_toml().unwrap();
    assert!(!out.contains("glpat-secret"));
    assert!(out.contains("my-library"));

    let reparsed = PomguardConfig::from_toml(&out).unwrap();
    assert_eq!(reparsed.audit.expect, config.audit.expect);
    assert_eq!(reparsed.fleet.dry_run, Some(false));
}
