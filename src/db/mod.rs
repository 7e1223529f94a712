//! SQLite persistence for the journal.
//!
//! The database holds one row per collection plus the migration history.
//! [`collections::Collections`] exposes it through the
//! [`KeyValueStore`](crate::libs::storage::KeyValueStore) seam used by the store.

/// Connection setup; opening always applies pending migrations.
pub mod db;

pub mod migrations;

pub mod collections;
