//! Card storage backends.
//!
//! The scheduling core only ever sees `Vec<Card>` and `CardPatch` values;
//! where they live is decided by the `CardRepository` implementation.
pub mod db;
pub mod local;

use crate::error::Result;
use crate::models::{Card, CardId, CardPatch};

pub use db::SqliteRepository;
pub use local::LocalRepository;

/// Storage interface shared by the local and the relational backend.
pub trait CardRepository {
    /// All cards, in the order they were first saved.
    fn load(&self) -> Result<Vec<Card>>;

    /// Inserts a card, or replaces the stored card with the same id in place.
    fn save(&mut self, card: &Card) -> Result<()>;

    /// Applies `patch` to the stored card and returns the updated card.
    fn update(&mut self, id: &CardId, patch: &CardPatch) -> Result<Card>;

    /// Permanently removes a card.
    fn delete(&mut self, id: &CardId) -> Result<()>;
}

impl<R: CardRepository + ?Sized> CardRepository for Box<R> {
    fn load(&self) -> Result<Vec<Card>> {
        (**self).load()
    }

    fn save(&mut self, card: &Card) -> Result<()> {
        (**self).save(card)
    }

    fn update(&mut self, id: &CardId, patch: &CardPatch) -> Result<Card> {
        (**self).update(id, patch)
    }

    fn delete(&mut self, id: &CardId) -> Result<()> {
        (**self).delete(id)
    }
}
