//! Core library modules for aqualog.
//!
//! - Records: [`aquarium`], [`log`], [`plant`], [`task`], built on [`record`]
//! - Journal: [`store`] over the [`storage`] seam, with [`seed`] data
//! - Domain logic: [`scheduler`] for due dates, [`ingest`] for photos
//! - Infrastructure: [`config`], [`data_storage`], [`error`], [`messages`]
//! - Console output: [`view`], [`formatter`]
//!
//! ```rust,no_run
//! use aqualog::libs::aquarium::{NewAquarium, Unit};
//! use aqualog::libs::storage::MemoryStorage;
//! use aqualog::libs::store::AquariumStore;
//! use chrono::Utc;
//!
//! let mut store = AquariumStore::open(MemoryStorage::new(), false);
//! let tank = store.add_aquarium(NewAquarium::new("Nano", 30.0, Unit::Litres, Utc::now()))?;
//! # Ok::<(), aqualog::libs::error::StoreError>(())
//! ```

pub mod aquarium;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod ingest;
pub mod log;
pub mod messages;
pub mod plant;
pub mod record;
pub mod scheduler;
pub mod seed;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;
