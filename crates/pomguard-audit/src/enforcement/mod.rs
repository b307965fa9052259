//! Enforcement: date-gated warn → fail policy over audit mismatches.

pub mod clock;
pub mod policy;

pub use clock::EnforcementClock;
pub use policy::{AuditOutcome, EnforcementPolicy};
