//! Fixed-interval spaced repetition scheduling.
//!
//! Each rating pushes the next review forward by a number of whole days that
//! depends only on the reported difficulty:
//! - Easy: 7 days
//! - Medium: 3 days
//! - Hard: 1 day
//!
//! The interval does not adapt to the card's history. The caller supplies
//! `now`, so the result is fully determined by the inputs.

use super::{Difficulty, ReviewUpdate, truncate_to_millis};
use crate::error::{FlashcardError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Longest interval accepted from configuration, roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Interval table in days, one entry per difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewIntervals {
    pub easy_days: u32,
    pub medium_days: u32,
    pub hard_days: u32,
}

impl Default for ReviewIntervals {
    fn default() -> Self {
        Self {
            easy_days: 7,
            medium_days: 3,
            hard_days: 1,
        }
    }
}

impl ReviewIntervals {
    pub fn days_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_days,
            Difficulty::Medium => self.medium_days,
            Difficulty::Hard => self.hard_days,
        }
    }

    /// Every interval must move the review at least one day forward.
    pub fn validate(&self) -> Result<()> {
        for difficulty in Difficulty::ALL {
            let days = self.days_for(difficulty);
            if !(1..=MAX_INTERVAL_DAYS).contains(&days) {
                return Err(FlashcardError::Config(format!(
                    "review interval for '{}' must be between 1 and {} days, got {}",
                    difficulty, MAX_INTERVAL_DAYS, days
                )));
            }
        }
        Ok(())
    }
}

/// Stateless scheduler over an interval table.
///
/// Cheap to copy; construct one where it is needed and pass it by reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReviewScheduler {
    intervals: ReviewIntervals,
}

impl ReviewScheduler {
    pub fn new(intervals: ReviewIntervals) -> Result<Self> {
        intervals.validate()?;
        Ok(Self { intervals })
    }

    pub fn intervals(&self) -> &ReviewIntervals {
        &self.intervals
    }

    pub fn interval(&self, difficulty: Difficulty) -> Duration {
        Duration::days(i64::from(self.intervals.days_for(difficulty)))
    }

    /// Computes the review timestamps for a card rated at `now`.
    ///
    /// Never fails: a review date past the last representable instant
    /// saturates to the last representable millisecond.
    pub fn next_review(&self, difficulty: Difficulty, now: DateTime<Utc>) -> ReviewUpdate {
        let now = truncate_to_millis(now);
        let next_review_date = now
            .checked_add_signed(self.interval(difficulty))
            .map_or_else(latest_review_date, truncate_to_millis);
        log::debug!(
            "Rated {} at {}, next review at {}",
            difficulty,
            now,
            next_review_date
        );

        ReviewUpdate {
            last_reviewed: now,
            next_review_date,
        }
    }
}

fn latest_review_date() -> DateTime<Utc> {
    truncate_to_millis(DateTime::<Utc>::MAX_UTC)
}

/// Computes the next review with the default interval table.
pub fn compute_next_review(difficulty: Difficulty, now: DateTime<Utc>) -> ReviewUpdate {
    ReviewScheduler::default().next_review(difficulty, now)
}
