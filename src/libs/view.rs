use super::aquarium::Aquarium;
use super::formatter::{format_co2, format_date, format_lighting, format_volume, truncate};
use super::log::{FertilizationLog, WaterChangeLog};
use super::plant::{GrowthPhoto, Plant};
use super::scheduler::ScheduledTask;
use anyhow::Result;
use prettytable::{row, Table};

const NOTES_WIDTH: usize = 40;

fn notes(value: &Option<String>) -> String {
    value.as_deref().map(|text| truncate(text, NOTES_WIDTH)).unwrap_or_default()
}

pub struct View {}

impl View {
    pub fn aquariums(aquariums: &[Aquarium]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "SIZE", "SETUP", "LIGHTING", "CO2"]);
        for aquarium in aquariums {
            table.add_row(row![
                aquarium.id,
                aquarium.name,
                format_volume(aquarium.size, aquarium.unit),
                format_date(&aquarium.setup_date),
                format_lighting(aquarium),
                format_co2(aquarium)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn aquarium(aquarium: &Aquarium, dashboard_photo: Option<&GrowthPhoto>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", aquarium.id]);
        table.add_row(row!["NAME", aquarium.name]);
        table.add_row(row!["SIZE", format_volume(aquarium.size, aquarium.unit)]);
        table.add_row(row!["SETUP", format_date(&aquarium.setup_date)]);
        table.add_row(row!["LIGHTING", format_lighting(aquarium)]);
        table.add_row(row!["CO2", format_co2(aquarium)]);
        let dashboard = dashboard_photo
            .map(|photo| format!("{} ({})", photo.id, format_date(&photo.date)))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row!["DASHBOARD PHOTO", dashboard]);
        table.printstd();

        Ok(())
    }

    pub fn water_changes(logs: &[&WaterChangeLog]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "VOLUME", "NOTES"]);
        for log in logs {
            table.add_row(row![log.id, format_date(&log.date), format_volume(log.volume, log.unit), notes(&log.notes)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn fertilizations(logs: &[&FertilizationLog]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "FERTILIZER", "DOSAGE (ML)", "NOTES"]);
        for log in logs {
            table.add_row(row![log.id, format_date(&log.date), log.fertilizer, log.dosage_ml, notes(&log.notes)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn plants(plants: &[&Plant]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "SPECIES", "PLANTED", "PHOTO", "NOTES"]);
        for plant in plants {
            let photo = if plant.photo_data_url.is_some() { "yes" } else { "-" };
            table.add_row(row![plant.id, plant.species, format_date(&plant.planting_date), photo, notes(&plant.notes)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn photos(photos: &[&GrowthPhoto], dashboard_photo_id: Option<&str>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "SIZE (KB)", "DASHBOARD", "NOTES"]);
        for photo in photos {
            let starred = if dashboard_photo_id == Some(photo.id.as_str()) { "★" } else { "" };
            table.add_row(row![
                photo.id,
                format_date(&photo.date),
                photo.photo_data_url.len() / 1024,
                starred,
                notes(&photo.notes)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[ScheduledTask<'_>]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "AQUARIUM", "TASK", "REPEATS", "DUE", "STATUS"]);
        for entry in tasks {
            let repeats = match entry.task.schedule.frequency_days() {
                Some(days) => format!("every {} day(s)", days),
                None => "once".to_string(),
            };
            table.add_row(row![
                entry.task.id,
                entry.task.aquarium_id,
                entry.task.name,
                repeats,
                entry.status.due_date,
                entry.status.label()
            ]);
        }
        table.printstd();

        Ok(())
    }
}
