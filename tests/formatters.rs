#[cfg(test)]
mod tests {
    use aqualog::libs::formatter::{format_co2, format_lighting, format_volume, parse_date_in};
    use aqualog::libs::seed::default_aquariums;
    use aqualog::libs::aquarium::Unit;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn test_format_volume_units() {
        assert_eq!(format_volume(20.0, Unit::Litres), "20 L");
        assert_eq!(format_volume(0.25, Unit::GallonsUk), "0.25 UK Gal");
        assert_eq!(format_volume(55.0, Unit::GallonsUs), "55 US Gal");
    }

    #[test]
    fn test_format_optional_aquarium_equipment() {
        let aquariums = default_aquariums();
        let reef = &aquariums[0];
        let betta = &aquariums[1];

        assert_eq!(format_lighting(reef), "Kessil A360X (10:00 - 20:00)");
        assert_eq!(format_co2(reef), "-");

        assert_eq!(format_lighting(betta), "-");
        assert_eq!(format_co2(betta), "Pressurized, 1 bubble/sec");
    }

    #[test]
    fn test_plain_date_is_start_of_day_in_given_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            parse_date_in("2024-07-22", &tokyo),
            Some(Utc.with_ymd_and_hms(2024, 7, 21, 15, 0, 0).unwrap())
        );

        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(
            parse_date_in(" 2024-07-22 ", &new_york),
            Some(Utc.with_ymd_and_hms(2024, 7, 22, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_rejects_unparseable_dates() {
        assert_eq!(parse_date_in("22/07/2024", &Utc), None);
        assert_eq!(parse_date_in("2024-13-01", &Utc), None);
        assert_eq!(parse_date_in("", &Utc), None);
    }
}
