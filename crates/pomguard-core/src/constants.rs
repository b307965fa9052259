//! Compiled defaults shared across pomguard crates.

/// Maven POM namespace URI.
pub const MAVEN_POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Default descriptor file name, relative to the working directory.
pub const DEFAULT_DESCRIPTOR: &str = "pom.xml";

/// Default cutover date after which dependency mismatches fail the audit.
pub const DEFAULT_CUTOVER: &str = "2026-01-01";

/// Date format used for cutover and `--today` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "pomguard.toml";

/// User-level config directory name under `$HOME`.
pub const USER_CONFIG_DIR: &str = ".pomguard";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "POMGUARD_LOG";

/// Default GitLab instance.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Marker whose presence in `pom.xml` means the project uses the telemetry library.
pub const DEFAULT_LIBRARY_MARKER: &str = "lib-ops-otel";

/// Deployment config path patched by the fleet tool.
pub const DEFAULT_DEPLOY_CONFIG_PATH: &str = "config/pcf/prd.yml";

/// Top-level YAML key listing service bindings.
pub const DEFAULT_BINDINGS_KEY: &str = "bindings";

/// Binding added by the fleet tool.
pub const DEFAULT_BINDING: &str = "otel";

/// Branch read and written by the fleet tool.
pub const DEFAULT_REF: &str = "main";

/// Commit message for the binding patch.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Add OTEL binding to PCF config for prd";

/// Default CSV report path.
pub const DEFAULT_REPORT_PATH: &str = "report.csv";

/// Page size for project listing.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// HTTP timeout for host calls, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Exit code when the audit cannot run (unreadable descriptor, bad config).
pub const EXIT_ERROR: i32 = 2;
