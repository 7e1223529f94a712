use super::aquarium::{Aquarium, Unit};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date of an instant in the local time zone.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

pub fn format_volume(amount: f64, unit: Unit) -> String {
    // Whole numbers print without a trailing ".0".
    if amount.fract() == 0.0 {
        format!("{:.0} {}", amount, unit.short_label())
    } else {
        format!("{} {}", amount, unit.short_label())
    }
}

pub fn format_lighting(aquarium: &Aquarium) -> String {
    match &aquarium.lighting {
        Some(lighting) => format!(
            "{} ({} - {})",
            lighting.brand,
            lighting.on_time.format("%H:%M"),
            lighting.off_time.format("%H:%M")
        ),
        None => "-".to_string(),
    }
}

pub fn format_co2(aquarium: &Aquarium) -> String {
    aquarium.co2.as_ref().map(|co2| co2.details.clone()).unwrap_or_else(|| "-".to_string())
}

/// Shortens long text for table cells.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Parses a user-supplied date: `YYYY-MM-DD` is the start of that day in
/// `tz`, anything else must be an RFC 3339 timestamp.
pub fn parse_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return tz
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|local| local.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|parsed| parsed.with_timezone(&Utc))
}

pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    parse_date_in(raw, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(55.0, Unit::GallonsUs), "55 US Gal");
        assert_eq!(format_volume(12.5, Unit::Litres), "12.5 L");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long note", 8), "a rathe…");
    }

    #[test]
    fn test_parse_date_in_utc() {
        assert_eq!(parse_date_in("2024-07-01", &Utc), Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()));
        assert_eq!(
            parse_date_in("2024-07-01T10:30:00+02:00", &Utc),
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap())
        );
        assert_eq!(parse_date_in("yesterday", &Utc), None);
    }
}
