//! Card operations offered to the application, on top of any repository.

use crate::database::CardRepository;
use crate::error::{FlashcardError, Result};
use crate::export::json;
use crate::models::{
    Card, CardId, CardPatch, Difficulty, NewCard, ReviewScheduler, StudySession, select_for_study,
};
use chrono::{DateTime, Utc};

pub struct FlashcardService<R: CardRepository> {
    repo: R,
    scheduler: ReviewScheduler,
}

impl<R: CardRepository> FlashcardService<R> {
    pub fn new(repo: R, scheduler: ReviewScheduler) -> Self {
        Self { repo, scheduler }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn scheduler(&self) -> &ReviewScheduler {
        &self.scheduler
    }

    pub fn cards(&self) -> Result<Vec<Card>> {
        self.repo.load()
    }

    pub fn get_card(&self, id: &CardId) -> Result<Card> {
        self.repo
            .load()?
            .into_iter()
            .find(|card| card.id == *id)
            .ok_or_else(|| FlashcardError::CardNotFound(id.clone()))
    }

    pub fn add_card(&mut self, new_card: NewCard, now: DateTime<Utc>) -> Result<Card> {
        let card = Card::new(new_card, now)?;
        self.repo.save(&card)?;
        Ok(card)
    }

    /// Adds every card or none: all entries are validated before the first save.
    pub fn add_cards(
        &mut self,
        new_cards: Vec<NewCard>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Card>> {
        let cards = new_cards
            .into_iter()
            .map(|new_card| Card::new(new_card, now))
            .collect::<Result<Vec<_>>>()?;

        // Only reached once every entry is valid
        for card in &cards {
            self.repo.save(card)?;
        }
        Ok(cards)
    }

    pub fn update_card(&mut self, id: &CardId, patch: &CardPatch) -> Result<Card> {
        self.repo.update(id, patch)
    }

    pub fn delete_card(&mut self, id: &CardId) -> Result<()> {
        self.repo.delete(id)
    }

    /// Records a rating: stores the difficulty and the next review date.
    pub fn rate_card(
        &mut self,
        id: &CardId,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let review = self.scheduler.next_review(difficulty, now);
        self.repo.update(id, &CardPatch::rated(difficulty, review))
    }

    pub fn cards_for_study(&self, count: usize, now: DateTime<Utc>) -> Result<Vec<Card>> {
        let cards = self.repo.load()?;
        Ok(select_for_study(&cards, count, now)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn start_session(&self, count: usize, now: DateTime<Utc>) -> Result<StudySession> {
        StudySession::start(&self.repo, count, now)
    }

    /// Rates the session's current card through this service's repository.
    pub fn rate_in_session(
        &mut self,
        session: &mut StudySession,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let rated = session.rate_current(&mut self.repo, &self.scheduler, difficulty, now)?;
        Ok(rated.is_some())
    }

    /// Imports exported cards and returns how many were added.
    pub fn import_json(&mut self, contents: &str, now: DateTime<Utc>) -> Result<usize> {
        let new_cards = json::import_json(contents)?;
        let added = self.add_cards(new_cards, now)?;
        log::info!("Imported {} flashcards", added.len());
        Ok(added.len())
    }

    pub fn export_json(&self) -> Result<String> {
        json::export_json(&self.repo.load()?)
    }
}
