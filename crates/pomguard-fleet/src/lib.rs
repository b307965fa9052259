//! # pomguard-fleet
//!
//! Scans every project in a GitLab group, finds the ones whose build
//! descriptor pulls in the telemetry library, and adds the telemetry binding
//! to their deployment config. Dry run by default; every project gets one
//! row in a CSV report.
//!
//! The hosting API sits behind [`host::SourceHost`] so the patch rule runs
//! against [`host::MemoryHost`] in tests.

pub mod deploy_config;
pub mod host;
pub mod patch;
pub mod report;
pub mod scanner;

pub use host::{FileUpdate, GitLabHost, MemoryHost, ProjectRef, SourceHost};
pub use patch::{Action, BindingPatcher, BindingRule, ProjectOutcome};
pub use scanner::{FleetScanner, FleetSummary};
