//! Key-value repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide a small string-to-string store for device-local app state.
//! - Keep SQL details inside the repository boundary.
//!
//! # Invariants
//! - Keys are trimmed, non-empty and at most 128 chars.
//! - `set` is an upsert; `updated_at` is epoch milliseconds of the last write.
//! - Key listing is deterministic: `key ASC`.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_KEY_CHARS: usize = 128;

pub type KvRepoResult<T> = Result<T, KvRepoError>;

#[derive(Debug)]
pub enum KvRepoError {
    Db(DbError),
    InvalidKey(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for KvRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: `{key}`"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key-value repository requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for KvRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for KvRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for device-local key-value state.
pub trait KeyValueRepository {
    fn get(&self, key: &str) -> KvRepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvRepoResult<()>;
    /// Returns whether a row was removed.
    fn remove(&self, key: &str) -> KvRepoResult<bool>;
    fn keys(&self) -> KvRepoResult<Vec<String>>;
}

/// SQLite-backed key-value repository.
pub struct SqliteKeyValueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> KvRepoResult<Self> {
        let actual_version = schema_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(KvRepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueRepository for SqliteKeyValueRepository<'_> {
    fn get(&self, key: &str) -> KvRepoResult<Option<String>> {
        let key = normalize_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvRepoResult<()> {
        let key = normalize_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> KvRepoResult<bool> {
        let key = normalize_key(key)?;
        let removed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", params![key])?;
        Ok(removed > 0)
    }

    fn keys(&self) -> KvRepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_store ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

fn normalize_key(key: &str) -> KvRepoResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_KEY_CHARS {
        return Err(KvRepoError::InvalidKey(key.to_string()));
    }
    Ok(trimmed)
}
