//! Self-reported recall difficulty used to pick the next review interval.
use crate::error::FlashcardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parses a rating label, treating anything unrecognised as `Medium`.
    ///
    /// Use this only where stored or user input must never be rejected;
    /// `str::parse` is the strict alternative.
    pub fn lenient(label: &str) -> Self {
        label.parse().unwrap_or(Difficulty::Medium)
    }
}

impl FromStr for Difficulty {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(FlashcardError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = "impossible".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, FlashcardError::InvalidDifficulty(label) if label == "impossible"));
    }

    #[test]
    fn test_lenient_falls_back_to_medium() {
        assert_eq!(Difficulty::lenient("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::lenient(""), Difficulty::Medium);
        assert_eq!(Difficulty::lenient("very hard"), Difficulty::Medium);
    }

    #[test]
    fn test_serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
