//! Water-change and fertilization logs.

use super::aquarium::Unit;
use super::error::ValidationError;
use super::record::{require_positive, require_text, AquariumScoped, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterChangeLog {
    pub id: String,
    pub aquarium_id: String,
    pub date: DateTime<Utc>,
    pub volume: f64,
    /// Independent of the aquarium's own unit.
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWaterChange {
    pub aquarium_id: String,
    pub date: DateTime<Utc>,
    pub volume: f64,
    pub unit: Unit,
    pub notes: Option<String>,
}

impl NewWaterChange {
    pub fn new(aquarium_id: &str, date: DateTime<Utc>, volume: f64, unit: Unit) -> Self {
        Self {
            aquarium_id: aquarium_id.to_string(),
            date,
            volume,
            unit,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

impl Record for WaterChangeLog {
    const KEY: &'static str = "waterChanges";
    type New = NewWaterChange;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewWaterChange) -> Self {
        Self {
            id,
            aquarium_id: new.aquarium_id,
            date: new.date,
            volume: new.volume,
            unit: new.unit,
            notes: new.notes,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_positive(self.volume, "Water change volume")
    }
}

impl AquariumScoped for WaterChangeLog {
    fn aquarium_id(&self) -> &str {
        &self.aquarium_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizationLog {
    pub id: String,
    pub aquarium_id: String,
    pub date: DateTime<Utc>,
    pub fertilizer: String,
    pub dosage_ml: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFertilization {
    pub aquarium_id: String,
    pub date: DateTime<Utc>,
    pub fertilizer: String,
    pub dosage_ml: f64,
    pub notes: Option<String>,
}

impl NewFertilization {
    pub fn new(aquarium_id: &str, date: DateTime<Utc>, fertilizer: &str, dosage_ml: f64) -> Self {
        Self {
            aquarium_id: aquarium_id.to_string(),
            date,
            fertilizer: fertilizer.trim().to_string(),
            dosage_ml,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

impl Record for FertilizationLog {
    const KEY: &'static str = "fertilizations";
    type New = NewFertilization;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewFertilization) -> Self {
        Self {
            id,
            aquarium_id: new.aquarium_id,
            date: new.date,
            fertilizer: new.fertilizer,
            dosage_ml: new.dosage_ml,
            notes: new.notes,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.fertilizer, "Fertilizer name")?;
        require_positive(self.dosage_ml, "Dosage")
    }
}

impl AquariumScoped for FertilizationLog {
    fn aquarium_id(&self) -> &str {
        &self.aquarium_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_water_change_keeps_its_own_unit() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        let log = WaterChangeLog::from_new("wc1".to_string(), NewWaterChange::new("aq1", date, 10.0, Unit::GallonsUk));
        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json["aquariumId"], "aq1");
        assert_eq!(json["unit"], "gallons-uk");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_fertilization_validation() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        let mut log = FertilizationLog::from_new("f1".to_string(), NewFertilization::new("aq1", date, "Easy Green", 2.5));
        assert!(log.validate().is_ok());
        assert_eq!(serde_json::to_value(&log).unwrap()["dosageMl"], 2.5);

        log.dosage_ml = 0.0;
        assert_eq!(log.validate(), Err(ValidationError::NotPositive("Dosage")));

        log.dosage_ml = 1.0;
        log.fertilizer = String::new();
        assert_eq!(log.validate(), Err(ValidationError::EmptyField("Fertilizer name")));
    }
}
