//! Mapping repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/count/list APIs over the `emoji_mappings` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Listing order is always `id ASC`.
//! - Batch inserts are atomic: all rows land or none do.

use crate::db::DbError;
use crate::model::mapping::{EmojiMapping, MappingId, MappingValidationError, NewMapping};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAPPING_SELECT_SQL: &str = "SELECT
    id,
    emoji,
    unicode_seq,
    movie_name,
    hint,
    created_at
FROM emoji_mappings";

const MAPPING_INSERT_SQL: &str = "INSERT INTO emoji_mappings (
    emoji,
    unicode_seq,
    movie_name,
    hint
) VALUES (?1, ?2, ?3, ?4);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for mapping persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MappingValidationError),
    Db(DbError),
    /// Another row already stores this emoji.
    DuplicateEmoji(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmoji(emoji) => write!(f, "emoji already mapped: {emoji}"),
            Self::InvalidData(message) => write!(f, "invalid persisted mapping data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateEmoji(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<MappingValidationError> for RepoError {
    fn from(value: MappingValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for mapping storage.
pub trait MappingRepository {
    fn count_mappings(&self) -> RepoResult<u64>;
    fn insert_mapping(&self, mapping: &NewMapping) -> RepoResult<MappingId>;
    fn insert_mappings(&self, mappings: &[NewMapping]) -> RepoResult<Vec<MappingId>>;
    fn list_mappings(&self) -> RepoResult<Vec<EmojiMapping>>;
}

/// SQLite-backed mapping repository.
pub struct SqliteMappingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMappingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MappingRepository for SqliteMappingRepository<'_> {
    fn count_mappings(&self) -> RepoResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM emoji_mappings;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn insert_mapping(&self, mapping: &NewMapping) -> RepoResult<MappingId> {
        insert_one(self.conn, mapping)
    }

    fn insert_mappings(&self, mappings: &[NewMapping]) -> RepoResult<Vec<MappingId>> {
        for mapping in mappings {
            mapping.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            ids.push(insert_one(&tx, mapping)?);
        }
        tx.commit()?;

        Ok(ids)
    }

    fn list_mappings(&self) -> RepoResult<Vec<EmojiMapping>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MAPPING_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut mappings = Vec::new();

        while let Some(row) = rows.next()? {
            mappings.push(parse_mapping_row(row)?);
        }

        Ok(mappings)
    }
}

fn insert_one(conn: &Connection, mapping: &NewMapping) -> RepoResult<MappingId> {
    mapping.validate()?;

    let result = conn.execute(
        MAPPING_INSERT_SQL,
        params![
            mapping.emoji.as_str(),
            mapping.unicode_seq.as_str(),
            mapping.movie_name.as_str(),
            mapping.hint.as_deref(),
        ],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == ErrorCode::ConstraintViolation =>
        {
            Err(RepoError::DuplicateEmoji(mapping.emoji.clone()))
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_mapping_row(row: &Row<'_>) -> RepoResult<EmojiMapping> {
    let id: MappingId = row.get("id")?;
    let mapping = EmojiMapping {
        id,
        emoji: row.get("emoji")?,
        unicode_seq: row.get("unicode_seq")?,
        movie_name: row.get("movie_name")?,
        hint: row.get("hint")?,
        created_at: row.get("created_at")?,
    };

    if mapping.emoji.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty emoji in emoji_mappings.emoji for id {id}"
        )));
    }
    if mapping.movie_name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty movie name in emoji_mappings.movie_name for id {id}"
        )));
    }

    Ok(mapping)
}
