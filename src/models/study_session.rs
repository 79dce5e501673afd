//! Study session management.
//! Walks through one selected batch, persisting each rating as it is made.

use super::{Card, CardPatch, Difficulty, ReviewScheduler, ReviewUpdate, select_for_study};
use crate::database::CardRepository;
use crate::error::Result;
use chrono::{DateTime, Utc};

/// A single pass over a batch of cards picked by `select_for_study`.
pub struct StudySession {
    cards: Vec<Card>,
    current_index: usize,
    reviewed: usize,
    pub show_back: bool,
}

impl StudySession {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            current_index: 0,
            reviewed: 0,
            show_back: false,
        }
    }

    /// Loads the collection and selects up to `count` cards due at `now`.
    pub fn start<R: CardRepository + ?Sized>(
        repo: &R,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let all_cards = repo.load()?;
        let batch = select_for_study(&all_cards, count, now)
            .into_iter()
            .cloned()
            .collect();
        Ok(Self::new(batch))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index)
    }

    pub fn toggle_back(&mut self) {
        self.show_back = !self.show_back;
    }

    /// Rates the current card, stores the new review dates and moves on.
    ///
    /// Returns `None` once the session is completed.
    pub fn rate_current<R: CardRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        scheduler: &ReviewScheduler,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Result<Option<ReviewUpdate>> {
        let Some(card) = self.cards.get_mut(self.current_index) else {
            return Ok(None);
        };

        let review = scheduler.next_review(difficulty, now);
        *card = repo.update(&card.id, &CardPatch::rated(difficulty, review))?;

        self.reviewed += 1;
        self.advance();
        Ok(Some(review))
    }

    /// Moves past the current card without rating it.
    pub fn skip(&mut self) {
        if !self.is_completed() {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.current_index += 1;
        self.show_back = false;
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed
    }

    pub fn total_count(&self) -> usize {
        self.cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count().saturating_sub(self.current_index)
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn progress_message(&self) -> String {
        if self.is_completed() {
            format!(
                "Session complete: {} of {} cards reviewed",
                self.reviewed,
                self.total_count()
            )
        } else {
            format!(
                "Card {} of {} ({} remaining)",
                self.current_index + 1,
                self.total_count(),
                self.remaining_count()
            )
        }
    }
}
