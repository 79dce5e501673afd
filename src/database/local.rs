//! Local key-value storage for flashcards.
//!
//! The file holds a JSON object of string keys to JSON values, the same shape
//! a browser's local storage exposes. Cards live under `"flashcards"` as an
//! array; other keys are preserved untouched. Every mutation rewrites the file.

use super::CardRepository;
use crate::error::{FlashcardError, Result};
use crate::models::{Card, CardId, CardPatch};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const FLASHCARDS_KEY: &str = "flashcards";

pub struct LocalRepository {
    path: PathBuf,
}

impl LocalRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_store(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_cards(&self, cards: &[Card]) -> Result<()> {
        // Re-read so keys written by other parts of the app survive
        let mut store = self.read_store()?;
        store.insert(FLASHCARDS_KEY.to_string(), serde_json::to_value(cards)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&store)?)?;
        Ok(())
    }
}

impl CardRepository for LocalRepository {
    fn load(&self) -> Result<Vec<Card>> {
        let mut store = self.read_store()?;
        match store.remove(FLASHCARDS_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, card: &Card) -> Result<()> {
        let mut cards = self.load()?;
        // Replace in place so the collection keeps its order
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }

        self.write_cards(&cards)?;
        log::info!("Saved flashcard {} to {}", card.id, self.path.display());
        Ok(())
    }

    fn update(&mut self, id: &CardId, patch: &CardPatch) -> Result<Card> {
        let mut cards = self.load()?;
        let card = cards
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| FlashcardError::CardNotFound(id.clone()))?;
        // Nothing is written unless the patch applies cleanly
        card.apply(patch)?;
        let updated = card.clone();

        self.write_cards(&cards)?;
        log::info!("Updated flashcard {} in {}", id, self.path.display());
        Ok(updated)
    }

    fn delete(&mut self, id: &CardId) -> Result<()> {
        let mut cards = self.load()?;
        let before = cards.len();
        cards.retain(|c| c.id != *id);
        if cards.len() == before {
            return Err(FlashcardError::CardNotFound(id.clone()));
        }

        self.write_cards(&cards)?;
        log::info!("Deleted flashcard {} from {}", id, self.path.display());
        Ok(())
    }
}
