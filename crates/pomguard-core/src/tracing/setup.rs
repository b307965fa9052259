//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV;

static INIT: Once = Once::new();

/// Initialize the pomguard tracing/logging system.
///
/// Reads `POMGUARD_LOG` for per-module log levels, e.g.
/// `POMGUARD_LOG=pomguard_audit=debug,pomguard_fleet=info`.
/// Falls back to `pomguard=<default_level>` for every pomguard crate when
/// the variable is unset or invalid.
///
/// Events go to stderr so stdout carries only report lines.
/// Calling this more than once is a no-op.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directives(default_level)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false),
            )
            .with(filter)
            .init();
    });
}

/// Builds the fallback filter directives for every workspace crate.
pub fn default_directives(level: &str) -> String {
    let level = match level.to_ascii_lowercase().as_str() {
        l @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => l.to_string(),
        _ => "warn".to_string(),
    };
    ["pomguard_core", "pomguard_audit", "pomguard_fleet", "pomguard"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
