//! JSON file record source.
//!
//! # Responsibility
//! - Read a JSON array of loosely-shaped records (or `{"items": [...]}`).
//! - Resolve each logical field through the configured alias priority list.
//! - Fill a missing emoji from the codepoint sequence, and vice versa.
//!
//! # Invariants
//! - Output order follows file order.
//! - Unusable records are skipped with a warning, never fatal.

use crate::codepoint;
use crate::config::FieldAliases;
use crate::model::mapping::MappingView;
use log::{info, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    /// Top-level value is neither an array nor an object with `items`.
    UnexpectedShape(&'static str),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read records `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid records json: {err}"),
            Self::UnexpectedShape(found) => {
                write!(f, "records json must be an array or {{\"items\": [...]}}, found {found}")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::UnexpectedShape(_) => None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One record after alias resolution, before it becomes a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub emoji: String,
    pub unicode_seq: String,
    pub movie_name: String,
    pub hint: Option<String>,
}

impl ResolvedRecord {
    pub fn into_view(self) -> MappingView {
        MappingView {
            emoji: self.emoji,
            unicode_seq: self.unicode_seq,
            movie_name: self.movie_name,
        }
    }
}

/// Reads and resolves every usable record in `path`.
pub fn load_records(path: impl AsRef<Path>, aliases: &FieldAliases) -> SourceResult<Vec<ResolvedRecord>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&text, aliases)?;
    info!(
        "event=json_load module=source status=ok path={} records={}",
        path.display(),
        records.len()
    );
    Ok(records)
}

/// Parses record JSON text and resolves every usable record.
pub fn parse_records(text: &str, aliases: &FieldAliases) -> SourceResult<Vec<ResolvedRecord>> {
    let document: Value = serde_json::from_str(text)?;
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("items") {
            Some(Value::Array(items)) => items,
            _ => return Err(SourceError::UnexpectedShape("object without items array")),
        },
        other => return Err(SourceError::UnexpectedShape(value_kind(&other))),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Object(object) = item else {
            warn!(
                "event=json_record module=source status=skipped index={} reason=not_object",
                index
            );
            continue;
        };
        match resolve_record(object, aliases) {
            Ok(record) => records.push(record),
            Err(reason) => warn!(
                "event=json_record module=source status=skipped index={} reason={}",
                index, reason
            ),
        }
    }

    Ok(records)
}

/// Resolves one JSON object into a record, or names why it is unusable.
pub fn resolve_record(
    object: &Map<String, Value>,
    aliases: &FieldAliases,
) -> Result<ResolvedRecord, &'static str> {
    let movie_name = first_string(object, &aliases.movie_name).ok_or("missing_movie_name")?;
    let stored_emoji = first_string(object, &aliases.emoji);
    let stored_seq = first_string(object, &aliases.unicode_seq);

    let (emoji, unicode_seq) = match (stored_emoji, stored_seq) {
        (Some(emoji), Some(seq)) => (emoji, seq),
        (Some(emoji), None) => {
            let seq = codepoint::encode(&emoji);
            (emoji, seq)
        }
        (None, Some(seq)) => (codepoint::convert(&seq), seq),
        (None, None) => return Err("missing_emoji_and_sequence"),
    };

    if emoji.is_empty() {
        return Err("unconvertible_sequence");
    }

    Ok(ResolvedRecord {
        emoji,
        unicode_seq,
        movie_name,
        hint: first_string(object, &aliases.hint),
    })
}

fn first_string(object: &Map<String, Value>, aliases: &[String]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| object.get(alias.as_str()))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
