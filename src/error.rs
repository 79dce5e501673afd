//! Error type shared by the scheduling core, the repositories and the CLI.
use crate::models::CardId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Flashcard not found: {0}")]
    CardNotFound(CardId),

    #[error("Invalid difficulty '{0}', expected easy, medium or hard")]
    InvalidDifficulty(String),

    #[error("Flashcard {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
