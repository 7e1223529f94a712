//! Error types shared by the journal core.
//!
//! The taxonomy mirrors what a caller has to do about a failure:
//!
//! - [`ValidationError`]: the input was rejected, nothing changed.
//! - [`StorageError`]: the durable layer refused a read or write.
//! - [`StoreError`]: a store mutation failed validation, or succeeded in
//!   memory but could not be written through to durable storage.
//! - [`IngestError`]: an image could not be turned into an embeddable string.

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error("Repeatable tasks need a frequency of at least one day")]
    MissingFrequency,

    #[error("Task frequency of {0} days is longer than the {max} day limit", max = crate::libs::task::MAX_FREQUENCY_DAYS)]
    FrequencyTooLong(u32),

    #[error("Aquarium {0} does not exist")]
    UnknownAquarium(String),

    #[error("Photo {photo_id} does not belong to aquarium {aquarium_id}")]
    ForeignPhoto { photo_id: String, aquarium_id: String },

    #[error("File size too large ({size} bytes). Please select an image smaller than {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file type '{0}'. Please select a valid image file")]
    InvalidFileType(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage quota exceeded: writing '{key}' needs {required} bytes, {quota} bytes available")]
    QuotaExceeded { key: String, required: usize, quota: usize },

    #[error("Storage database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The change is live in memory but the durable copy of `key` is stale.
    #[error("Changes to '{key}' were kept for this session but could not be saved: {source}")]
    NotPersisted {
        key: &'static str,
        #[source]
        source: StorageError,
    },
}

impl StoreError {
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, StoreError::NotPersisted { .. })
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Image processing was cancelled")]
    Cancelled,
}
