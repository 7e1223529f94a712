#[derive(Debug, Clone)]
pub enum Message {
    // === AQUARIUM MESSAGES ===
    AquariumCreated(String),
    AquariumUpdated(String),
    AquariumDeleted(String),
    AquariumNotFound(String),
    AquariumsHeader,
    NoAquariums,
    EditingAquarium(String),
    ConfirmDeleteAquarium(String, usize),
    PromptAquariumName,
    PromptAquariumSize,
    PromptAquariumUnit,
    PromptSetupDate,
    PromptLightingBrand,
    PromptLightsOn,
    PromptLightsOff,
    PromptCo2Details,

    // === AQUARIUM DETAIL SECTIONS ===
    DetailWaterChanges,
    DetailFertilizations,
    DetailPlants,
    DetailPhotos,
    DetailUpcomingTasks,

    // === LOG MESSAGES ===
    WaterChangeLogged(String),
    WaterChangeUpdated,
    WaterChangeDeleted,
    WaterChangeNotFound(String),
    NoWaterChanges(String),
    FertilizationLogged(String),
    FertilizationUpdated,
    FertilizationDeleted,
    FertilizationNotFound(String),
    NoFertilizations(String),

    // === PLANT MESSAGES ===
    PlantAdded(String),
    PlantUpdated(String),
    PlantDeleted(String),
    PlantNotFound(String),
    NoPlants(String),

    // === PHOTO MESSAGES ===
    PhotoAdded(String),
    PhotoUpdated,
    PhotoDeleted,
    PhotoNotFound(String),
    NoPhotos(String),
    DashboardPhotoSet(String),
    DashboardPhotoCleared(String),
    ProcessingImage(String),
    ImageReady(u32, u32),
    PhotoExported(String),
    PhotoNotJpeg(String),

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskNotFound(String),
    TaskRescheduled(String, String),
    TaskCompletedRemoved(String),
    TasksHeader,
    NoTasks,
    ScheduleConflict,

    // === GENERAL ===
    AmbiguousId(String, usize),
    InvalidDate(String),
    InvalidTime(String),
    ConfirmDelete(String),
    OperationCancelled,
    NoChangesDetected,
    StorageFull,

    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleImage,
    ConfigModuleStorage,
    PromptSelectModules,
    PromptMaxUploadMb,
    PromptMaxWidth,
    PromptJpegQuality,
    PromptQuotaMb,
    PromptSeedDefaults,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    DatabaseUpToDate,
}
