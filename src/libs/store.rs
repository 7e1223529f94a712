//! The journal: six collections kept in memory and written through to a
//! [`KeyValueStore`] after every change.
//!
//! Each collection is serialized whole under its own key. A mutation first
//! changes the in-memory collection and then replaces the stored value; if
//! the write fails the in-memory change stays and the caller gets
//! [`StoreError::NotPersisted`].
//!
//! New records are prepended, so collections read newest-entered first.

use super::aquarium::{Aquarium, NewAquarium};
use super::error::{StorageError, StoreError, StoreResult, ValidationError};
use super::log::{FertilizationLog, NewFertilization, NewWaterChange, WaterChangeLog};
use super::plant::{GrowthPhoto, NewGrowthPhoto, NewPlant, Plant};
use super::record::{AquariumScoped, Record};
use super::scheduler::{self, ScheduledTask};
use super::seed;
use super::storage::KeyValueStore;
use super::task::{NewTask, Task, TaskSchedule};
use crate::db::collections::Collections;
use crate::libs::config::Config;
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Collection<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Collection<T> {
    /// Reads the stored value for `T::KEY`, falling back to `default` when it
    /// is absent, unreadable or malformed.
    fn load<S: KeyValueStore>(storage: &S, default: Vec<T>) -> (Self, bool) {
        let raw = match storage.get(T::KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Self { records: default }, true),
            Err(e) => {
                warn!(key = T::KEY, error = %e, "failed to read collection, using defaults");
                return (Self { records: default }, false);
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(key = T::KEY, count = records.len(), "collection loaded");
                (Self { records }, false)
            }
            Err(e) => {
                warn!(key = T::KEY, error = %e, "stored collection is malformed, using defaults");
                (Self { records: default }, false)
            }
        }
    }

    fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find(&id).is_none() {
                return id;
            }
        }
    }

    fn replace(&mut self, record: T) -> bool {
        match self.records.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let position = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(position))
    }

    fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(&self.records).map_err(|source| StorageError::Serialize {
            key: T::KEY.to_string(),
            source,
        })
    }
}

impl<T: AquariumScoped> Collection<T> {
    fn remove_for_aquarium(&mut self, aquarium_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.aquarium_id() != aquarium_id);
        before - self.records.len()
    }

    fn count_for_aquarium(&self, aquarium_id: &str) -> usize {
        self.records.iter().filter(|record| record.aquarium_id() == aquarium_id).count()
    }
}

fn persist<S: KeyValueStore, T: Record>(storage: &mut S, collection: &Collection<T>) -> StoreResult<()> {
    collection
        .to_json()
        .and_then(|value| storage.set(T::KEY, &value))
        .map_err(|source| {
            warn!(key = T::KEY, error = %source, "collection changed in memory but was not saved");
            StoreError::NotPersisted { key: T::KEY, source }
        })
}

fn insert<S: KeyValueStore, T: Record>(storage: &mut S, collection: &mut Collection<T>, new: T::New) -> StoreResult<T> {
    let record = T::from_new(collection.fresh_id(), new);
    record.validate()?;
    collection.records.insert(0, record.clone());
    info!(key = T::KEY, id = record.id(), "record added");
    persist(storage, collection)?;
    Ok(record)
}

fn replace<S: KeyValueStore, T: Record>(storage: &mut S, collection: &mut Collection<T>, record: T) -> StoreResult<T> {
    record.validate()?;
    if collection.replace(record.clone()) {
        info!(key = T::KEY, id = record.id(), "record updated");
    } else {
        warn!(key = T::KEY, id = record.id(), "update matched no record");
    }
    persist(storage, collection)?;
    Ok(record)
}

fn remove<S: KeyValueStore, T: Record>(storage: &mut S, collection: &mut Collection<T>, id: &str) -> StoreResult<Option<T>> {
    let removed = collection.remove(id);
    match &removed {
        Some(_) => info!(key = T::KEY, id, "record deleted"),
        None => debug!(key = T::KEY, id, "delete matched no record"),
    }
    persist(storage, collection)?;
    Ok(removed)
}

/// What completing a task did to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Recurring task, now counted from the completion instant.
    Rescheduled(Task),
    /// One-off task, removed from the journal.
    Removed(Task),
    NotFound,
}

/// Records removed by [`AquariumStore::delete_aquarium`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub water_changes: usize,
    pub fertilizations: usize,
    pub plants: usize,
    pub photos: usize,
    pub tasks: usize,
}

impl CascadeSummary {
    pub fn total(&self) -> usize {
        self.water_changes + self.fertilizations + self.plants + self.photos + self.tasks
    }
}

pub struct AquariumStore<S: KeyValueStore> {
    storage: S,
    aquariums: Collection<Aquarium>,
    water_changes: Collection<WaterChangeLog>,
    fertilizations: Collection<FertilizationLog>,
    plants: Collection<Plant>,
    photos: Collection<GrowthPhoto>,
    tasks: Collection<Task>,
}

impl AquariumStore<Collections> {
    /// Opens the journal in the platform data directory with the configured storage settings.
    pub fn new() -> anyhow::Result<Self> {
        let settings = Config::read()?.storage_settings();
        let collections = Collections::new(settings.quota_bytes)?;
        Ok(Self::open(collections, settings.seed_defaults))
    }
}

impl<S: KeyValueStore> AquariumStore<S> {
    /// Loads every collection from `storage`.
    ///
    /// Aquariums and tasks that were never stored start from the example data
    /// when `seed_defaults` is set; the seeded collections are written back
    /// straight away.
    pub fn open(storage: S, seed_defaults: bool) -> Self {
        let (aquarium_seed, task_seed) = if seed_defaults {
            (seed::default_aquariums(), seed::default_tasks())
        } else {
            (Vec::new(), Vec::new())
        };

        let (aquariums, aquariums_missing) = Collection::load(&storage, aquarium_seed);
        let (water_changes, _) = Collection::load(&storage, Vec::new());
        let (fertilizations, _) = Collection::load(&storage, Vec::new());
        let (plants, _) = Collection::load(&storage, Vec::new());
        let (photos, _) = Collection::load(&storage, Vec::new());
        let (tasks, tasks_missing) = Collection::load(&storage, task_seed);

        let mut store = Self {
            storage,
            aquariums,
            water_changes,
            fertilizations,
            plants,
            photos,
            tasks,
        };

        if seed_defaults {
            // A failed seed write leaves the examples in memory only; the next mutation retries it.
            if aquariums_missing {
                if let Err(e) = persist(&mut store.storage, &store.aquariums) {
                    debug!(error = %e, "seeded aquariums not stored");
                }
            }
            if tasks_missing {
                if let Err(e) = persist(&mut store.storage, &store.tasks) {
                    debug!(error = %e, "seeded tasks not stored");
                }
            }
        }

        store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // === Reads ===

    pub fn aquariums(&self) -> &[Aquarium] {
        &self.aquariums.records
    }

    pub fn water_changes(&self) -> &[WaterChangeLog] {
        &self.water_changes.records
    }

    pub fn fertilizations(&self) -> &[FertilizationLog] {
        &self.fertilizations.records
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants.records
    }

    pub fn photos(&self) -> &[GrowthPhoto] {
        &self.photos.records
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks.records
    }

    pub fn aquarium(&self, id: &str) -> Option<&Aquarium> {
        self.aquariums.find(id)
    }

    pub fn water_change(&self, id: &str) -> Option<&WaterChangeLog> {
        self.water_changes.find(id)
    }

    pub fn fertilization(&self, id: &str) -> Option<&FertilizationLog> {
        self.fertilizations.find(id)
    }

    pub fn plant(&self, id: &str) -> Option<&Plant> {
        self.plants.find(id)
    }

    pub fn photo(&self, id: &str) -> Option<&GrowthPhoto> {
        self.photos.find(id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.find(id)
    }

    /// Water changes of one aquarium, most recent date first.
    pub fn water_changes_for(&self, aquarium_id: &str) -> Vec<&WaterChangeLog> {
        let mut logs = scoped(&self.water_changes, aquarium_id);
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    /// Fertilizations of one aquarium, most recent date first.
    pub fn fertilizations_for(&self, aquarium_id: &str) -> Vec<&FertilizationLog> {
        let mut logs = scoped(&self.fertilizations, aquarium_id);
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    pub fn plants_for(&self, aquarium_id: &str) -> Vec<&Plant> {
        scoped(&self.plants, aquarium_id)
    }

    /// Growth photos of one aquarium, most recent date first.
    pub fn photos_for(&self, aquarium_id: &str) -> Vec<&GrowthPhoto> {
        let mut photos = scoped(&self.photos, aquarium_id);
        photos.sort_by(|a, b| b.date.cmp(&a.date));
        photos
    }

    pub fn tasks_for(&self, aquarium_id: &str) -> Vec<&Task> {
        scoped(&self.tasks, aquarium_id)
    }

    pub fn upcoming_tasks<Tz: TimeZone>(&self, aquarium_id: &str, now: &DateTime<Tz>, limit: usize) -> Vec<ScheduledTask<'_>> {
        scheduler::upcoming_tasks(self.tasks(), aquarium_id, now, limit)
    }

    pub fn dashboard_photo(&self, aquarium: &Aquarium) -> Option<&GrowthPhoto> {
        let photo_id = aquarium.dashboard_photo_id.as_deref()?;
        self.photos.find(photo_id).filter(|photo| photo.aquarium_id == aquarium.id)
    }

    /// Number of records that deleting the aquarium would remove with it.
    pub fn dependent_count(&self, aquarium_id: &str) -> usize {
        self.water_changes.count_for_aquarium(aquarium_id)
            + self.fertilizations.count_for_aquarium(aquarium_id)
            + self.plants.count_for_aquarium(aquarium_id)
            + self.photos.count_for_aquarium(aquarium_id)
            + self.tasks.count_for_aquarium(aquarium_id)
    }

    fn require_aquarium(&self, aquarium_id: &str) -> Result<(), ValidationError> {
        match self.aquariums.find(aquarium_id) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownAquarium(aquarium_id.to_string())),
        }
    }

    fn check_dashboard_photo(&self, aquarium: &Aquarium) -> Result<(), ValidationError> {
        let Some(photo_id) = aquarium.dashboard_photo_id.as_deref() else {
            return Ok(());
        };
        match self.photos.find(photo_id) {
            Some(photo) if photo.aquarium_id == aquarium.id => Ok(()),
            _ => Err(ValidationError::ForeignPhoto {
                photo_id: photo_id.to_string(),
                aquarium_id: aquarium.id.clone(),
            }),
        }
    }

    // === Aquariums ===

    pub fn add_aquarium(&mut self, new: NewAquarium) -> StoreResult<Aquarium> {
        if let Some(photo_id) = &new.dashboard_photo_id {
            // A new aquarium owns no photos yet.
            return Err(ValidationError::ForeignPhoto {
                photo_id: photo_id.clone(),
                aquarium_id: String::new(),
            }
            .into());
        }
        insert(&mut self.storage, &mut self.aquariums, new)
    }

    pub fn update_aquarium(&mut self, aquarium: Aquarium) -> StoreResult<Aquarium> {
        self.check_dashboard_photo(&aquarium)?;
        replace(&mut self.storage, &mut self.aquariums, aquarium)
    }

    /// Deletes the aquarium and every record that belongs to it.
    ///
    /// All collections are updated in memory first, then each is written.
    /// Every write is attempted; the first failure is returned.
    pub fn delete_aquarium(&mut self, id: &str) -> StoreResult<CascadeSummary> {
        let removed = self.aquariums.remove(id);
        let summary = CascadeSummary {
            water_changes: self.water_changes.remove_for_aquarium(id),
            fertilizations: self.fertilizations.remove_for_aquarium(id),
            plants: self.plants.remove_for_aquarium(id),
            photos: self.photos.remove_for_aquarium(id),
            tasks: self.tasks.remove_for_aquarium(id),
        };

        if removed.is_some() {
            info!(id, dependents = summary.total(), "aquarium deleted");
        } else {
            debug!(id, dependents = summary.total(), "delete matched no aquarium");
        }

        let results = [
            persist(&mut self.storage, &self.aquariums),
            persist(&mut self.storage, &self.water_changes),
            persist(&mut self.storage, &self.fertilizations),
            persist(&mut self.storage, &self.plants),
            persist(&mut self.storage, &self.photos),
            persist(&mut self.storage, &self.tasks),
        ];
        results.into_iter().collect::<StoreResult<Vec<()>>>()?;

        Ok(summary)
    }

    /// Points the aquarium's dashboard at one of its own photos, or clears it with `None`.
    pub fn set_dashboard_photo(&mut self, aquarium_id: &str, photo_id: Option<&str>) -> StoreResult<Aquarium> {
        let mut aquarium = self
            .aquariums
            .find(aquarium_id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownAquarium(aquarium_id.to_string()))?;
        aquarium.dashboard_photo_id = photo_id.map(str::to_string);
        self.update_aquarium(aquarium)
    }

    // === Water changes ===

    pub fn add_water_change(&mut self, new: NewWaterChange) -> StoreResult<WaterChangeLog> {
        self.require_aquarium(&new.aquarium_id)?;
        insert(&mut self.storage, &mut self.water_changes, new)
    }

    pub fn update_water_change(&mut self, log: WaterChangeLog) -> StoreResult<WaterChangeLog> {
        self.require_aquarium(&log.aquarium_id)?;
        replace(&mut self.storage, &mut self.water_changes, log)
    }

    pub fn delete_water_change(&mut self, id: &str) -> StoreResult<Option<WaterChangeLog>> {
        remove(&mut self.storage, &mut self.water_changes, id)
    }

    // === Fertilizations ===

    pub fn add_fertilization(&mut self, new: NewFertilization) -> StoreResult<FertilizationLog> {
        self.require_aquarium(&new.aquarium_id)?;
        insert(&mut self.storage, &mut self.fertilizations, new)
    }

    pub fn update_fertilization(&mut self, log: FertilizationLog) -> StoreResult<FertilizationLog> {
        self.require_aquarium(&log.aquarium_id)?;
        replace(&mut self.storage, &mut self.fertilizations, log)
    }

    pub fn delete_fertilization(&mut self, id: &str) -> StoreResult<Option<FertilizationLog>> {
        remove(&mut self.storage, &mut self.fertilizations, id)
    }

    // === Plants ===

    pub fn add_plant(&mut self, new: NewPlant) -> StoreResult<Plant> {
        self.require_aquarium(&new.aquarium_id)?;
        insert(&mut self.storage, &mut self.plants, new)
    }

    pub fn update_plant(&mut self, plant: Plant) -> StoreResult<Plant> {
        self.require_aquarium(&plant.aquarium_id)?;
        replace(&mut self.storage, &mut self.plants, plant)
    }

    pub fn delete_plant(&mut self, id: &str) -> StoreResult<Option<Plant>> {
        remove(&mut self.storage, &mut self.plants, id)
    }

    // === Growth photos ===

    pub fn add_photo(&mut self, new: NewGrowthPhoto) -> StoreResult<GrowthPhoto> {
        self.require_aquarium(&new.aquarium_id)?;
        insert(&mut self.storage, &mut self.photos, new)
    }

    /// Replaces a photo. Moving it to another aquarium clears the old owner's
    /// dashboard reference to it.
    pub fn update_photo(&mut self, photo: GrowthPhoto) -> StoreResult<GrowthPhoto> {
        photo.validate()?;
        self.require_aquarium(&photo.aquarium_id)?;

        let cleared = self.release_dashboard_photo(&photo.id, Some(photo.aquarium_id.as_str()));
        let updated = replace(&mut self.storage, &mut self.photos, photo);
        let aquariums = if cleared { persist(&mut self.storage, &self.aquariums) } else { Ok(()) };

        let photo = updated?;
        aquariums?;
        Ok(photo)
    }

    /// Deletes the photo and clears any dashboard that pointed at it.
    ///
    /// Both changes are made in memory before either collection is written.
    pub fn delete_photo(&mut self, id: &str) -> StoreResult<Option<GrowthPhoto>> {
        let cleared = self.release_dashboard_photo(id, None);
        let removed = remove(&mut self.storage, &mut self.photos, id);
        let aquariums = if cleared { persist(&mut self.storage, &self.aquariums) } else { Ok(()) };

        let removed = removed?;
        aquariums?;
        Ok(removed)
    }

    /// Drops dashboard references to `photo_id` from every aquarium except `owner`.
    fn release_dashboard_photo(&mut self, photo_id: &str, owner: Option<&str>) -> bool {
        let mut cleared = false;
        for aquarium in self.aquariums.records.iter_mut() {
            if aquarium.dashboard_photo_id.as_deref() == Some(photo_id) && owner != Some(aquarium.id.as_str()) {
                aquarium.dashboard_photo_id = None;
                cleared = true;
            }
        }
        if cleared {
            info!(photo_id, "dashboard photo reference cleared");
        }
        cleared
    }

    // === Tasks ===

    pub fn add_task(&mut self, new: NewTask) -> StoreResult<Task> {
        self.require_aquarium(&new.aquarium_id)?;
        insert(&mut self.storage, &mut self.tasks, new)
    }

    pub fn update_task(&mut self, task: Task) -> StoreResult<Task> {
        self.require_aquarium(&task.aquarium_id)?;
        replace(&mut self.storage, &mut self.tasks, task)
    }

    pub fn delete_task(&mut self, id: &str) -> StoreResult<Option<Task>> {
        remove(&mut self.storage, &mut self.tasks, id)
    }

    /// Marks a task done at `completed_at`.
    ///
    /// A recurring task restarts its interval from `completed_at`; a one-off
    /// task is removed. Unknown ids change nothing and write nothing.
    pub fn complete_task(&mut self, id: &str, completed_at: DateTime<Utc>) -> StoreResult<Completion> {
        let Some(task) = self.tasks.find(id).cloned() else {
            debug!(id, "complete matched no task");
            return Ok(Completion::NotFound);
        };

        match task.schedule {
            TaskSchedule::Recurring { frequency_days, .. } => {
                let mut next = task;
                next.schedule = TaskSchedule::recurring(completed_at, frequency_days);
                self.tasks.replace(next.clone());
                info!(id, next_due = %next.schedule.due_at(), "recurring task completed");
                persist(&mut self.storage, &self.tasks)?;
                Ok(Completion::Rescheduled(next))
            }
            TaskSchedule::OneOff { .. } => {
                self.tasks.remove(id);
                info!(id, "one-off task completed");
                persist(&mut self.storage, &self.tasks)?;
                Ok(Completion::Removed(task))
            }
        }
    }
}

fn scoped<'a, T: AquariumScoped>(collection: &'a Collection<T>, aquarium_id: &str) -> Vec<&'a T> {
    collection.records.iter().filter(|record| record.aquarium_id() == aquarium_id).collect()
}
