pub mod card_id;
pub mod difficulty;
pub mod flashcard;
pub mod review_update;
pub mod scheduler;
pub mod study_queue;
pub mod study_session;

pub use card_id::CardId;
pub use difficulty::Difficulty;
pub use flashcard::{Card, CardPatch, NewCard};
pub use review_update::{ReviewUpdate, truncate_to_millis};
pub use scheduler::{ReviewIntervals, ReviewScheduler, compute_next_review};
pub use study_queue::{DEFAULT_STUDY_BATCH, is_due, select_for_study};
pub use study_session::StudySession;
