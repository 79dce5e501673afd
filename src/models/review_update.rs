use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Review timestamps produced by the scheduler for a single rating.
///
/// Both fields are always written together, so a card either has a full
/// review history entry or none at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub last_reviewed: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
}

/// Drops sub-millisecond digits.
///
/// Card timestamps are kept at millisecond precision so every backend
/// stores and returns the same instant.
pub fn truncate_to_millis(time: DateTime<Utc>) -> DateTime<Utc> {
    time.trunc_subsecs(3)
}
