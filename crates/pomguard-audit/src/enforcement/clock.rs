//! The two dates an enforcement decision depends on.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// "Today" and the cutover date, compared as UTC calendar days.
///
/// Stateless: every run builds a fresh clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementClock {
    pub today: NaiveDate,
    pub cutover: NaiveDate,
}

impl EnforcementClock {
    pub fn new(today: NaiveDate, cutover: NaiveDate) -> Self {
        Self { today, cutover }
    }

    /// Clock for the current UTC calendar day.
    pub fn utc_today(cutover: NaiveDate) -> Self {
        Self::new(Utc::now().date_naive(), cutover)
    }

    /// Enforcement starts on the cutover day itself.
    pub fn is_enforcing(&self) -> bool {
        self.today >= self.cutover
    }

    /// Whole days left before enforcement; zero or negative once enforcing.
    pub fn days_until_cutover(&self) -> i64 {
        (self.cutover - self.today).num_days()
    }
}
