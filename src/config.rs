//! Application configuration, read from a TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! backend = "sqlite"           # or "local"
//! local_path = "flashcards.json"
//! sqlite_path = "db.sqlite3"
//! study_batch_size = 10
//!
//! [intervals]
//! easy_days = 7
//! medium_days = 3
//! hard_days = 1
//! ```

use crate::database::{CardRepository, LocalRepository, SqliteRepository};
use crate::error::{FlashcardError, Result};
use crate::models::{DEFAULT_STUDY_BATCH, ReviewIntervals, ReviewScheduler};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON key-value file
    Local,
    #[default]
    Sqlite,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Backend,
    pub local_path: PathBuf,
    pub sqlite_path: PathBuf,
    pub study_batch_size: usize,
    pub intervals: ReviewIntervals,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            local_path: PathBuf::from("flashcards.json"),
            sqlite_path: PathBuf::from("db.sqlite3"),
            study_batch_size: DEFAULT_STUDY_BATCH,
            intervals: ReviewIntervals::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                log::debug!("Loaded configuration from {}", path.display());
                Self::from_toml(&contents)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.study_batch_size == 0 {
            return Err(FlashcardError::Config(
                "study_batch_size must be at least 1".to_string(),
            ));
        }
        self.intervals.validate()
    }

    pub fn scheduler(&self) -> Result<ReviewScheduler> {
        ReviewScheduler::new(self.intervals)
    }

    /// Opens the configured storage backend.
    pub fn open_repository(&self) -> Result<Box<dyn CardRepository>> {
        let repo: Box<dyn CardRepository> = match self.backend {
            Backend::Local => Box::new(LocalRepository::new(&self.local_path)),
            Backend::Sqlite => Box::new(SqliteRepository::open(&self.sqlite_path)?),
        };
        log::debug!("Using {:?} card storage", self.backend);
        Ok(repo)
    }
}
