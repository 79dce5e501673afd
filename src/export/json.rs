//! JSON import/export module for flashcards.
//! Exports card content without ids or review dates, and imports the same
//! shape leniently: invalid entries are skipped rather than failing the file.

use crate::error::{FlashcardError, Result};
use crate::models::{Card, Difficulty, NewCard};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct ExportedCard<'a> {
    front: &'a str,
    back: &'a str,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
}

/// Serializes cards to a pretty-printed JSON array.
pub fn export_json(cards: &[Card]) -> Result<String> {
    let exported: Vec<ExportedCard<'_>> = cards
        .iter()
        .map(|card| ExportedCard {
            front: &card.front,
            back: &card.back,
            category: card.category.as_deref().unwrap_or(""),
            difficulty: card.difficulty,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&exported)?)
}

/// Exports cards to a JSON file at the specified path.
pub fn export_json_to_path(cards: &[Card], path: impl AsRef<Path>) -> Result<()> {
    let json_string = export_json(cards)?;
    fs::write(path.as_ref(), json_string)?;
    log::info!(
        "Exported {} flashcards to '{}'",
        cards.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Parses an exported card list.
///
/// Entries need non-blank string `front` and `back`; anything else is skipped.
/// A category is kept when it is a non-blank string and a difficulty only when it is
/// one of the known labels.
pub fn import_json(json: &str) -> Result<Vec<NewCard>> {
    let parsed: Value = serde_json::from_str(json)?;
    let Value::Array(entries) = parsed else {
        return Err(FlashcardError::Import(
            "expected an array of flashcards".to_string(),
        ));
    };

    let total = entries.len();
    let cards: Vec<NewCard> = entries.iter().filter_map(new_card_from_entry).collect();

    if total > cards.len() {
        log::warn!("Skipped {} invalid flashcard entries", total - cards.len());
    }
    if cards.is_empty() {
        return Err(FlashcardError::Import(
            "no valid flashcards found".to_string(),
        ));
    }

    Ok(cards)
}

/// Imports cards from a JSON file.
pub fn import_json_from_path(path: impl AsRef<Path>) -> Result<Vec<NewCard>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let cards = import_json(&contents)?;
    log::info!(
        "Read {} flashcards from '{}'",
        cards.len(),
        path.as_ref().display()
    );
    Ok(cards)
}

fn new_card_from_entry(entry: &Value) -> Option<NewCard> {
    let front = non_blank(entry.get("front")?)?;
    let back = non_blank(entry.get("back")?)?;

    Some(NewCard {
        front,
        back,
        // Export writes "" for a missing category; read it back as None
        category: entry
            .get("category")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
        difficulty: entry
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(|d| d.parse().ok()),
    })
}

fn non_blank(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
