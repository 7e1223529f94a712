//! User-facing text for every [`Message`].
//!
//! All wording lives here so commands only pick a variant and its parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === AQUARIUM MESSAGES ===
            Message::AquariumCreated(name) => format!("Aquarium '{}' created", name),
            Message::AquariumUpdated(name) => format!("Aquarium '{}' updated", name),
            Message::AquariumDeleted(name) => format!("Aquarium '{}' and all of its records deleted", name),
            Message::AquariumNotFound(id) => format!("Aquarium '{}' not found", id),
            Message::AquariumsHeader => "Aquariums:".to_string(),
            Message::NoAquariums => "No aquariums yet. Add one with `aqualog aquarium add`.".to_string(),
            Message::EditingAquarium(name) => format!("Editing aquarium: {}", name),
            Message::ConfirmDeleteAquarium(name, records) => format!(
                "Delete aquarium '{}'? This also removes {} related log(s), plant(s), photo(s) and task(s).",
                name, records
            ),
            Message::PromptAquariumName => "Name".to_string(),
            Message::PromptAquariumSize => "Size".to_string(),
            Message::PromptAquariumUnit => "Unit".to_string(),
            Message::PromptSetupDate => "Setup date (YYYY-MM-DD)".to_string(),
            Message::PromptLightingBrand => "Lighting brand (empty for none)".to_string(),
            Message::PromptLightsOn => "Lights on (HH:MM)".to_string(),
            Message::PromptLightsOff => "Lights off (HH:MM)".to_string(),
            Message::PromptCo2Details => "CO2 details (empty for none)".to_string(),

            // === AQUARIUM DETAIL SECTIONS ===
            Message::DetailWaterChanges => "Water changes".to_string(),
            Message::DetailFertilizations => "Fertilization".to_string(),
            Message::DetailPlants => "Plants".to_string(),
            Message::DetailPhotos => "Growth photos".to_string(),
            Message::DetailUpcomingTasks => "Upcoming tasks".to_string(),

            // === LOG MESSAGES ===
            Message::WaterChangeLogged(aquarium) => format!("Water change logged for '{}'", aquarium),
            Message::WaterChangeUpdated => "Water change updated".to_string(),
            Message::WaterChangeDeleted => "Water change deleted".to_string(),
            Message::WaterChangeNotFound(id) => format!("Water change '{}' not found", id),
            Message::NoWaterChanges(aquarium) => format!("No water changes logged for '{}'", aquarium),
            Message::FertilizationLogged(aquarium) => format!("Fertilization logged for '{}'", aquarium),
            Message::FertilizationUpdated => "Fertilization updated".to_string(),
            Message::FertilizationDeleted => "Fertilization deleted".to_string(),
            Message::FertilizationNotFound(id) => format!("Fertilization '{}' not found", id),
            Message::NoFertilizations(aquarium) => format!("No fertilization logged for '{}'", aquarium),

            // === PLANT MESSAGES ===
            Message::PlantAdded(species) => format!("Plant '{}' added", species),
            Message::PlantUpdated(species) => format!("Plant '{}' updated", species),
            Message::PlantDeleted(species) => format!("Plant '{}' deleted", species),
            Message::PlantNotFound(id) => format!("Plant '{}' not found", id),
            Message::NoPlants(aquarium) => format!("No plants recorded for '{}'", aquarium),

            // === PHOTO MESSAGES ===
            Message::PhotoAdded(aquarium) => format!("Growth photo added to '{}'", aquarium),
            Message::PhotoUpdated => "Growth photo updated".to_string(),
            Message::PhotoDeleted => "Growth photo deleted".to_string(),
            Message::PhotoNotFound(id) => format!("Growth photo '{}' not found", id),
            Message::NoPhotos(aquarium) => format!("No growth photos for '{}'", aquarium),
            Message::DashboardPhotoSet(aquarium) => format!("Dashboard photo set for '{}'", aquarium),
            Message::DashboardPhotoCleared(aquarium) => format!("Dashboard photo cleared for '{}'", aquarium),
            Message::ProcessingImage(file) => format!("Processing image {}...", file),
            Message::ImageReady(width, height) => format!("Image ready ({}x{})", width, height),
            Message::PhotoExported(path) => format!("Photo written to {}", path),
            Message::PhotoNotJpeg(id) => format!("Photo '{}' is not an embedded JPEG", id),

            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskUpdated(name) => format!("Task '{}' updated", name),
            Message::TaskDeleted(name) => format!("Task '{}' deleted", name),
            Message::TaskNotFound(id) => format!("Task '{}' not found", id),
            Message::TaskRescheduled(name, status) => format!("Task '{}' completed. Next: {}", name, status),
            Message::TaskCompletedRemoved(name) => format!("Task '{}' completed and removed", name),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::NoTasks => "No tasks scheduled.".to_string(),
            Message::ScheduleConflict => "Use either --every with --last, or --due, not both".to_string(),

            // === GENERAL ===
            Message::AmbiguousId(prefix, count) => format!("'{}' matches {} records. Use a longer id.", prefix, count),
            Message::InvalidDate(raw) => format!("Invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp.", raw),
            Message::InvalidTime(raw) => format!("Invalid time '{}'. Use HH:MM.", raw),
            Message::ConfirmDelete(what) => format!("Delete {}?", what),
            Message::OperationCancelled => "Operation cancelled.".to_string(),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::StorageFull => "Storage may be full. Please try deleting some old photos.".to_string(),

            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration file deleted".to_string(),
            Message::ConfigNotFound => "No configuration file to delete".to_string(),
            Message::ConfigModuleImage => "Image processing".to_string(),
            Message::ConfigModuleStorage => "Storage".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptMaxUploadMb => "Maximum upload size (MB)".to_string(),
            Message::PromptMaxWidth => "Maximum image width (px)".to_string(),
            Message::PromptJpegQuality => "JPEG quality (1-100)".to_string(),
            Message::PromptQuotaMb => "Storage quota (MB, 0 for unlimited)".to_string(),
            Message::PromptSeedDefaults => "Seed example aquariums on first run?".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
