//! # pomguard-audit
//!
//! Checks the dependency versions declared in a Maven descriptor against an
//! expected mapping. Mismatches are advisory before a cutover date and fatal
//! from that date on.
//!
//! Pipeline: [`descriptor`] → [`extract`] → [`matcher`] → [`enforcement`] →
//! [`reporters`], wired together by [`pipeline::Auditor`].

pub mod descriptor;
pub mod enforcement;
pub mod extract;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod reporters;

pub use descriptor::{Descriptor, Element};
pub use enforcement::{AuditOutcome, EnforcementClock, EnforcementPolicy};
pub use model::{DependencyKey, Expectations, ExpectedVersion, FoundVersion, FoundVersions, Mismatch};
pub use pipeline::{AuditReport, Auditor};
