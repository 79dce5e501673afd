//! Flashcard is a pair <front, back> plus the review state the scheduler maintains.
use super::{CardId, Difficulty, ReviewUpdate, truncate_to_millis};
use crate::error::{FlashcardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
}

impl Card {
    /// Creates a never-reviewed card with a fresh id.
    pub fn new(new_card: NewCard, now: DateTime<Utc>) -> Result<Self> {
        let front = non_empty(new_card.front, "front")?;
        let back = non_empty(new_card.back, "back")?;

        Ok(Self {
            id: CardId::generate(),
            front,
            back,
            category: new_card.category,
            difficulty: new_card.difficulty,
            date_created: truncate_to_millis(now),
            last_reviewed: None,
            next_review_date: None,
        })
    }

    pub fn review(&self) -> Option<ReviewUpdate> {
        match (self.last_reviewed, self.next_review_date) {
            (Some(last_reviewed), Some(next_review_date)) => Some(ReviewUpdate {
                last_reviewed,
                next_review_date,
            }),
            _ => None,
        }
    }

    pub fn set_review(&mut self, review: ReviewUpdate) {
        self.last_reviewed = Some(truncate_to_millis(review.last_reviewed));
        self.next_review_date = Some(truncate_to_millis(review.next_review_date));
    }

    /// Applies a partial update. Identity and creation date are never touched.
    pub fn apply(&mut self, patch: &CardPatch) -> Result<()> {
        // Validate everything first so a rejected patch leaves the card as it was.
        let front = patch.front.clone().map(|f| non_empty(f, "front")).transpose()?;
        let back = patch.back.clone().map(|b| non_empty(b, "back")).transpose()?;

        if let Some(front) = front {
            self.front = front;
        }
        if let Some(back) = back {
            self.back = back;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = Some(difficulty);
        }
        if let Some(review) = patch.review {
            self.set_review(review);
        }
        Ok(())
    }
}

/// Content of a card that has not been stored yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewCard {
    pub front: String,
    pub back: String,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl NewCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Partial update of a stored card.
///
/// `category: Some(None)` clears the category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardPatch {
    pub front: Option<String>,
    pub back: Option<String>,
    pub category: Option<Option<String>>,
    pub difficulty: Option<Difficulty>,
    pub review: Option<ReviewUpdate>,
}

impl CardPatch {
    /// Patch recording a rating together with its scheduled review.
    pub fn rated(difficulty: Difficulty, review: ReviewUpdate) -> Self {
        Self {
            difficulty: Some(difficulty),
            review: Some(review),
            ..Default::default()
        }
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FlashcardError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
