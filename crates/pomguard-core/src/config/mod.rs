//! Configuration system for pomguard.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod audit_config;
pub mod fleet_config;
pub mod pomguard_config;

pub use audit_config::{AuditConfig, ExpectEntry};
pub use fleet_config::FleetConfig;
pub use pomguard_config::{CliOverrides, PomguardConfig};
