//! # pomguard-core
//!
//! Shared foundation for the pomguard workspace: one error enum per
//! subsystem, the layered TOML configuration, tracing setup, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::PomguardConfig;
pub use errors::GuardErrorCode;
