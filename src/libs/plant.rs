//! Plants and growth photos.
//!
//! Both carry images inline as data URIs produced by the image pipeline,
//! never as paths to files on disk.

use super::error::ValidationError;
use super::record::{require_text, AquariumScoped, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub aquarium_id: String,
    pub species: String,
    pub planting_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlant {
    pub aquarium_id: String,
    pub species: String,
    pub planting_date: DateTime<Utc>,
    pub photo_data_url: Option<String>,
    pub notes: Option<String>,
}

impl NewPlant {
    pub fn new(aquarium_id: &str, species: &str, planting_date: DateTime<Utc>) -> Self {
        Self {
            aquarium_id: aquarium_id.to_string(),
            species: species.trim().to_string(),
            planting_date,
            photo_data_url: None,
            notes: None,
        }
    }

    pub fn with_photo(mut self, data_url: Option<String>) -> Self {
        self.photo_data_url = data_url;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

impl Record for Plant {
    const KEY: &'static str = "plants";
    type New = NewPlant;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewPlant) -> Self {
        Self {
            id,
            aquarium_id: new.aquarium_id,
            species: new.species,
            planting_date: new.planting_date,
            photo_data_url: new.photo_data_url,
            notes: new.notes,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.species, "Plant species")
    }
}

impl AquariumScoped for Plant {
    fn aquarium_id(&self) -> &str {
        &self.aquarium_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPhoto {
    pub id: String,
    pub aquarium_id: String,
    pub date: DateTime<Utc>,
    pub photo_data_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGrowthPhoto {
    pub aquarium_id: String,
    pub date: DateTime<Utc>,
    pub photo_data_url: String,
    pub notes: Option<String>,
}

impl NewGrowthPhoto {
    pub fn new(aquarium_id: &str, date: DateTime<Utc>, photo_data_url: String) -> Self {
        Self {
            aquarium_id: aquarium_id.to_string(),
            date,
            photo_data_url,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

impl Record for GrowthPhoto {
    const KEY: &'static str = "photos";
    type New = NewGrowthPhoto;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewGrowthPhoto) -> Self {
        Self {
            id,
            aquarium_id: new.aquarium_id,
            date: new.date,
            photo_data_url: new.photo_data_url,
            notes: new.notes,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.photo_data_url, "Photo")
    }
}

impl AquariumScoped for GrowthPhoto {
    fn aquarium_id(&self) -> &str {
        &self.aquarium_id
    }
}
