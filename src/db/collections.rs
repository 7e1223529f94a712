//! SQLite-backed collection storage.
//!
//! Stores each journal collection as a single row in the `collections`
//! table. Replacing a collection is one `INSERT ... ON CONFLICT` statement,
//! so a reader never observes a half-written collection.

use super::db::Db;
use crate::libs::error::StorageError;
use crate::libs::storage::{check_quota, KeyValueStore};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_VALUE: &str = "SELECT value FROM collections WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO collections (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const SIZE_OF_OTHERS: &str = "SELECT COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM collections WHERE key != ?1";
const SELECT_KEYS: &str = "SELECT key FROM collections ORDER BY key";

pub struct Collections {
    pub conn: Connection,
    quota: Option<usize>,
}

impl Collections {
    /// Opens the collections table in the default journal database.
    pub fn new(quota: Option<usize>) -> Result<Collections> {
        let db = Db::new()?;
        Ok(Self::from_db(db, quota))
    }

    pub fn from_db(db: Db, quota: Option<usize>) -> Collections {
        Collections { conn: db.conn, quota }
    }

    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare(SELECT_KEYS)?;
        let keys = stmt.query_map([], |row| row.get(0))?.collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn size_of_others(&self, key: &str) -> Result<usize, StorageError> {
        let size: i64 = self.conn.query_row(SIZE_OF_OTHERS, params![key], |row| row.get(0))?;
        Ok(usize::try_from(size).unwrap_or(0))
    }
}

impl KeyValueStore for Collections {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.conn.query_row(SELECT_VALUE, params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.quota.is_some() {
            check_quota(self.quota, key, self.size_of_others(key)?, value.len())?;
        }
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }
}
