pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use database::CardRepository;
pub use error::{FlashcardError, Result};
pub use models::{
    Card, CardId, CardPatch, Difficulty, NewCard, ReviewScheduler, ReviewUpdate, StudySession,
    compute_next_review, select_for_study,
};
pub use service::FlashcardService;
