//! Error handling for pomguard.
//! One error enum per subsystem, `thiserror` only.

pub mod audit_error;
pub mod config_error;
pub mod error_code;
pub mod fleet_error;
pub mod host_error;
pub mod parse_error;
pub mod patch_error;
pub mod report_error;

pub use audit_error::AuditError;
pub use config_error::ConfigError;
pub use error_code::GuardErrorCode;
pub use fleet_error::FleetError;
pub use host_error::HostError;
pub use parse_error::ParseError;
pub use patch_error::PatchError;
pub use report_error::ReportError;
