//! Aquarium records.
//!
//! An aquarium is the root of the journal: every log, plant, photo and task
//! points at one. Volume is kept in the unit the owner entered; nothing is
//! converted between units.

use super::error::ValidationError;
use super::record::{require_positive, require_text, Record};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Volume unit for tank sizes and water-change volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "gallons-us")]
    GallonsUs,
    #[serde(rename = "gallons-uk")]
    GallonsUk,
    #[serde(rename = "litres")]
    Litres,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::GallonsUs => "US Gallons",
            Unit::GallonsUk => "UK Gallons",
            Unit::Litres => "Litres",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Unit::GallonsUs => "US Gal",
            Unit::GallonsUk => "UK Gal",
            Unit::Litres => "L",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::GallonsUs => "gallons-us",
            Unit::GallonsUk => "gallons-uk",
            Unit::Litres => "litres",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gallons-us" | "us" | "gal" => Ok(Unit::GallonsUs),
            "gallons-uk" | "uk" => Ok(Unit::GallonsUk),
            "litres" | "liters" | "l" => Ok(Unit::Litres),
            other => Err(format!("unknown unit '{}', expected gallons-us, gallons-uk or litres", other)),
        }
    }
}

/// Lighting schedule, stored as `HH:MM` wall-clock times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lighting {
    pub brand: String,
    #[serde(rename = "durationStart", with = "hhmm")]
    pub on_time: NaiveTime,
    #[serde(rename = "durationEnd", with = "hhmm")]
    pub off_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Co2 {
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aquarium {
    pub id: String,
    pub name: String,
    pub size: f64,
    pub unit: Unit,
    pub setup_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_photo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting: Option<Lighting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2: Option<Co2>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAquarium {
    pub name: String,
    pub size: f64,
    pub unit: Unit,
    pub setup_date: DateTime<Utc>,
    pub dashboard_photo_id: Option<String>,
    pub lighting: Option<Lighting>,
    pub co2: Option<Co2>,
}

impl NewAquarium {
    pub fn new(name: &str, size: f64, unit: Unit, setup_date: DateTime<Utc>) -> Self {
        Self {
            name: name.trim().to_string(),
            size,
            unit,
            setup_date,
            dashboard_photo_id: None,
            lighting: None,
            co2: None,
        }
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = Some(lighting);
        self
    }

    pub fn with_co2(mut self, details: &str) -> Self {
        self.co2 = Some(Co2 { details: details.to_string() });
        self
    }
}

impl Record for Aquarium {
    const KEY: &'static str = "aquariums";
    type New = NewAquarium;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewAquarium) -> Self {
        Self {
            id,
            name: new.name,
            size: new.size,
            unit: new.unit,
            setup_date: new.setup_date,
            dashboard_photo_id: new.dashboard_photo_id,
            lighting: new.lighting,
            co2: new.co2,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "Aquarium name")?;
        require_positive(self.size, "Aquarium size")?;
        if let Some(lighting) = &self.lighting {
            require_text(&lighting.brand, "Lighting brand")?;
        }
        if let Some(co2) = &self.co2 {
            require_text(&co2.details, "CO2 details")?;
        }
        Ok(())
    }
}

/// Serde adapter for `HH:MM` times; also accepts `HH:MM:SS` on input.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT).or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
    }
}

pub use hhmm::parse as parse_clock_time;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Aquarium {
        Aquarium::from_new(
            "aq-test".to_string(),
            NewAquarium::new("Nano Cube", 30.0, Unit::Litres, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        )
    }

    #[test]
    fn test_unit_parsing_and_labels() {
        assert_eq!("gallons-us".parse::<Unit>().unwrap(), Unit::GallonsUs);
        assert_eq!("UK".parse::<Unit>().unwrap(), Unit::GallonsUk);
        assert_eq!("L".parse::<Unit>().unwrap(), Unit::Litres);
        assert!("barrels".parse::<Unit>().is_err());
        assert_eq!(Unit::GallonsUs.label(), "US Gallons");
        assert_eq!(Unit::Litres.short_label(), "L");
    }

    #[test]
    fn test_json_layout_uses_camel_case_and_unit_names() {
        let mut aquarium = sample().with_lighting_for_test();
        aquarium.co2 = Some(Co2 { details: "Pressurized".to_string() });
        let json = serde_json::to_value(&aquarium).unwrap();

        assert_eq!(json["unit"], "litres");
        assert_eq!(json["setupDate"], "2024-03-01T12:00:00Z");
        assert_eq!(json["lighting"]["durationStart"], "10:00");
        assert_eq!(json["lighting"]["durationEnd"], "20:30");
        assert_eq!(json["co2"]["details"], "Pressurized");
        assert!(json.get("dashboardPhotoId").is_none());
    }

    #[test]
    fn test_reads_historical_layout() {
        let raw = r#"{"id":"aq1","name":"Living Room Reef","size":55,"unit":"gallons-us",
            "setupDate":"2023-01-15T12:00:00.000Z",
            "lighting":{"brand":"Kessil A360X","durationStart":"10:00","durationEnd":"20:00"}}"#;
        let aquarium: Aquarium = serde_json::from_str(raw).unwrap();

        assert_eq!(aquarium.size, 55.0);
        assert_eq!(aquarium.unit, Unit::GallonsUs);
        assert_eq!(aquarium.lighting.unwrap().off_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert!(aquarium.co2.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut aquarium = sample();
        aquarium.size = 0.0;
        assert_eq!(aquarium.validate(), Err(ValidationError::NotPositive("Aquarium size")));

        let mut aquarium = sample();
        aquarium.name = " ".to_string();
        assert_eq!(aquarium.validate(), Err(ValidationError::EmptyField("Aquarium name")));
    }

    impl Aquarium {
        fn with_lighting_for_test(mut self) -> Self {
            self.lighting = Some(Lighting {
                brand: "Chihiros".to_string(),
                on_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                off_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            });
            self
        }
    }
}
