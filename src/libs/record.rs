//! Shared behaviour of the six journal record kinds.
//!
//! Every record is stored as one JSON array under a fixed key, carries an
//! opaque string id, and is built from a separate input type (`Self::New`)
//! that has no id yet. Records that hang off an aquarium also implement
//! [`AquariumScoped`] so cascade deletes and per-tank views can treat them
//! uniformly.

use super::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Durable storage key for the whole collection.
    const KEY: &'static str;

    /// Input accepted by `add`, everything except the id.
    type New;

    fn id(&self) -> &str;

    fn from_new(id: String, new: Self::New) -> Self;

    /// Field-level checks that need no knowledge of other records.
    fn validate(&self) -> Result<(), ValidationError>;
}

pub trait AquariumScoped: Record {
    fn aquarium_id(&self) -> &str;
}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_positive(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}
