//! Emoji/movie mapping records.
//!
//! # Responsibility
//! - Define the persisted mapping row and its write payload.
//! - Define the public `{emoji, unicode_seq, movie_name}` projection.
//!
//! # Invariants
//! - `emoji` is unique across stored rows.
//! - `unicode_seq` uses `U+XXXX` tokens and converts back to `emoji`.

use crate::codepoint;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row identifier assigned by SQLite.
pub type MappingId = i64;

/// Persisted emoji/movie mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiMapping {
    pub id: MappingId,
    pub emoji: String,
    pub unicode_seq: String,
    pub movie_name: String,
    /// Free-form clue; not exposed by the public projection.
    pub hint: Option<String>,
    /// Unix epoch milliseconds, set by storage.
    pub created_at: i64,
}

impl EmojiMapping {
    /// Returns the public projection of this row.
    pub fn view(&self) -> MappingView {
        MappingView {
            emoji: self.emoji.clone(),
            unicode_seq: self.unicode_seq.clone(),
            movie_name: self.movie_name.clone(),
        }
    }
}

/// Public projection served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingView {
    pub emoji: String,
    pub unicode_seq: String,
    pub movie_name: String,
}

/// Insert payload for a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub emoji: String,
    pub unicode_seq: String,
    pub movie_name: String,
    pub hint: Option<String>,
}

impl NewMapping {
    /// Builds a payload whose `unicode_seq` is derived from `emoji`.
    pub fn from_emoji(
        emoji: impl Into<String>,
        movie_name: impl Into<String>,
        hint: Option<&str>,
    ) -> Self {
        let emoji = emoji.into();
        Self {
            unicode_seq: codepoint::encode(&emoji),
            emoji,
            movie_name: movie_name.into(),
            hint: hint.map(str::to_string),
        }
    }

    /// Validates write-time invariants.
    pub fn validate(&self) -> Result<(), MappingValidationError> {
        if self.emoji.trim().is_empty() {
            return Err(MappingValidationError::EmptyField("emoji"));
        }
        if self.unicode_seq.trim().is_empty() {
            return Err(MappingValidationError::EmptyField("unicode_seq"));
        }
        if self.movie_name.trim().is_empty() {
            return Err(MappingValidationError::EmptyField("movie_name"));
        }
        Ok(())
    }
}

/// Validation failures for mapping writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingValidationError {
    EmptyField(&'static str),
}

impl Display for MappingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "mapping field `{field}` cannot be empty"),
        }
    }
}

impl Error for MappingValidationError {}

#[cfg(test)]
mod tests {
    use super::{EmojiMapping, MappingValidationError, NewMapping};

    #[test]
    fn from_emoji_derives_sequence() {
        let mapping = NewMapping::from_emoji("\u{1F680}\u{1F315}", "First Man", Some("moon"));
        assert_eq!(mapping.unicode_seq, "U+1F680 U+1F315");
        assert_eq!(mapping.hint.as_deref(), Some("moon"));
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_movie_name() {
        let mapping = NewMapping::from_emoji("\u{1F680}", "  ", None);
        assert_eq!(
            mapping.validate(),
            Err(MappingValidationError::EmptyField("movie_name"))
        );
    }

    #[test]
    fn view_serializes_only_public_fields() {
        let row = EmojiMapping {
            id: 7,
            emoji: "\u{1F604}\u{1F3AC}".to_string(),
            unicode_seq: "U+1F604 U+1F3AC".to_string(),
            movie_name: "The Big Smile".to_string(),
            hint: Some("A big grin + movie".to_string()),
            created_at: 0,
        };
        let json = serde_json::to_value(row.view()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["movie_name"], "The Big Smile");
        assert!(!object.contains_key("hint"));
    }
}
