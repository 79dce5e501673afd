//! SQLite storage for flashcards
//!
//! Handles database initialization and CRUD operations for cards,
//! including the review timestamps written by the scheduler.

use super::CardRepository;
use crate::error::{FlashcardError, Result};
use crate::models::{Card, CardId, CardPatch, Difficulty};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const CARD_COLUMNS: &str =
    "id, front, back, category, difficulty, date_created, last_reviewed, next_review_date";

pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) the database file and its tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        log::debug!("Opened card database at {}", path.as_ref().display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Creates the flashcards table.
///
/// `seq` keeps insertion order stable across upserts; timestamps are stored
/// as milliseconds since the Unix epoch.
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS flashcards (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            category TEXT,
            difficulty TEXT,
            date_created INTEGER NOT NULL,
            last_reviewed INTEGER,
            next_review_date INTEGER
        )",
        (),
    )?;

    Ok(())
}

fn find_card(conn: &Connection, id: &CardId) -> Result<Option<Card>> {
    let card = conn
        .query_row(
            &format!("SELECT {} FROM flashcards WHERE id = ?1", CARD_COLUMNS),
            params![id.as_str()],
            card_from_row,
        )
        .optional()?;
    Ok(card)
}

/// Inserts a card, or rewrites its mutable columns if the id already exists.
/// `seq` and `date_created` of an existing row are never changed.
fn upsert_card(conn: &Connection, card: &Card) -> Result<()> {
    conn.execute(
        "INSERT INTO flashcards (id, front, back, category, difficulty, date_created, last_reviewed, next_review_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
            front = excluded.front,
            back = excluded.back,
            category = excluded.category,
            difficulty = excluded.difficulty,
            last_reviewed = excluded.last_reviewed,
            next_review_date = excluded.next_review_date",
        params![
            card.id.as_str(),
            card.front,
            card.back,
            card.category,
            card.difficulty.map(|d| d.as_str()),
            card.date_created.timestamp_millis(),
            card.last_reviewed.map(|t| t.timestamp_millis()),
            card.next_review_date.map(|t| t.timestamp_millis()),
        ],
    )?;

    Ok(())
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    let id: String = row.get(0)?;
    let difficulty: Option<String> = row.get(4)?;

    // Text columns are validated here; nothing unparsed leaves the database layer
    Ok(Card {
        id: id
            .parse::<CardId>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        front: row.get(1)?,
        back: row.get(2)?,
        category: row.get(3)?,
        difficulty: difficulty
            .map(|d| d.parse::<Difficulty>())
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        // Timestamps: milliseconds since the Unix epoch
        date_created: timestamp_from_millis(row.get(5)?, 5)?,
        last_reviewed: row
            .get::<_, Option<i64>>(6)?
            .map(|ms| timestamp_from_millis(ms, 6))
            .transpose()?,
        next_review_date: row
            .get::<_, Option<i64>>(7)?
            .map(|ms| timestamp_from_millis(ms, 7))
            .transpose()?,
    })
}

fn timestamp_from_millis(millis: i64, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Integer,
            Box::new(FlashcardError::InvalidTimestamp(millis)),
        )
    })
}

impl CardRepository for SqliteRepository {
    fn load(&self) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM flashcards ORDER BY seq ASC",
            CARD_COLUMNS
        ))?;

        let cards = stmt
            .query_map([], card_from_row)?
            .collect::<rusqlite::Result<Vec<Card>>>()?;

        Ok(cards)
    }

    fn save(&mut self, card: &Card) -> Result<()> {
        upsert_card(&self.conn, card)?;
        log::info!("Saved flashcard {}", card.id);
        Ok(())
    }

    /// Read-modify-write inside one transaction so concurrent raters on the
    /// same database file cannot interleave between the read and the write.
    fn update(&mut self, id: &CardId, patch: &CardPatch) -> Result<Card> {
        let tx = self.conn.transaction()?;

        let mut card = find_card(&tx, id)?.ok_or_else(|| FlashcardError::CardNotFound(id.clone()))?;
        // A rejected patch drops the transaction, rolling it back
        card.apply(patch)?;
        upsert_card(&tx, &card)?;

        tx.commit()?;
        log::info!("Updated flashcard {}", id);
        Ok(card)
    }

    fn delete(&mut self, id: &CardId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![id.as_str()])?;

        if removed == 0 {
            return Err(FlashcardError::CardNotFound(id.clone()));
        }
        log::info!("Deleted flashcard {}", id);
        Ok(())
    }
}
