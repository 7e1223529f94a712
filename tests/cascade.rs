#[cfg(test)]
mod tests {
    use aqualog::libs::aquarium::{NewAquarium, Unit};
    use aqualog::libs::error::{StorageError, StoreError, ValidationError};
    use aqualog::libs::log::{NewFertilization, NewWaterChange};
    use aqualog::libs::plant::{NewGrowthPhoto, NewPlant};
    use aqualog::libs::storage::MemoryStorage;
    use aqualog::libs::store::AquariumStore;
    use aqualog::libs::task::{NewTask, TaskSchedule};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn photo_url(tag: &str) -> String {
        format!("data:image/jpeg;base64,{}", tag)
    }

    /// Two tanks with one record of every kind each.
    fn populated() -> (AquariumStore<MemoryStorage>, String, String) {
        let mut store = AquariumStore::open(MemoryStorage::new(), false);
        let a = store.add_aquarium(NewAquarium::new("Tank A", 100.0, Unit::Litres, at(2024, 1, 1))).unwrap().id;
        let b = store.add_aquarium(NewAquarium::new("Tank B", 40.0, Unit::GallonsUk, at(2024, 2, 1))).unwrap().id;

        for id in [&a, &b] {
            store.add_water_change(NewWaterChange::new(id, at(2024, 7, 1), 10.0, Unit::Litres)).unwrap();
            store.add_fertilization(NewFertilization::new(id, at(2024, 7, 2), "NPK", 2.0)).unwrap();
            store.add_plant(NewPlant::new(id, "Anubias", at(2024, 7, 3))).unwrap();
            store.add_photo(NewGrowthPhoto::new(id, at(2024, 7, 4), photo_url("AAAA"))).unwrap();
            store.add_task(NewTask::new(id, "Water change", TaskSchedule::recurring(at(2024, 7, 1), 7))).unwrap();
        }

        (store, a, b)
    }

    #[test]
    fn test_delete_aquarium_removes_all_dependents() {
        let (mut store, a, b) = populated();

        let summary = store.delete_aquarium(&a).unwrap();
        assert_eq!(summary.total(), 5);

        assert!(store.aquarium(&a).is_none());
        assert!(store.water_changes().iter().all(|log| log.aquarium_id != a));
        assert!(store.fertilizations().iter().all(|log| log.aquarium_id != a));
        assert!(store.plants().iter().all(|plant| plant.aquarium_id != a));
        assert!(store.photos().iter().all(|photo| photo.aquarium_id != a));
        assert!(store.tasks().iter().all(|task| task.aquarium_id != a));

        // The other tank is untouched
        assert_eq!(store.dependent_count(&b), 5);

        // And the stored copies agree with memory
        let reopened = AquariumStore::open(store.storage().clone(), false);
        assert_eq!(reopened.aquariums().len(), 1);
        assert_eq!(reopened.dependent_count(&a), 0);
        assert_eq!(reopened.dependent_count(&b), 5);
    }

    #[test]
    fn test_dashboard_photo_must_belong_to_the_aquarium() {
        let (mut store, a, b) = populated();
        let photo_of_b = store.photos_for(&b)[0].id.clone();
        let photo_of_a = store.photos_for(&a)[0].id.clone();

        let err = store.set_dashboard_photo(&a, Some(photo_of_b.as_str())).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::ForeignPhoto { .. })));
        assert!(store.aquarium(&a).unwrap().dashboard_photo_id.is_none());

        let err = store.set_dashboard_photo(&a, Some("no-such-photo")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::ForeignPhoto { .. })));

        let updated = store.set_dashboard_photo(&a, Some(photo_of_a.as_str())).unwrap();
        assert_eq!(updated.dashboard_photo_id.as_deref(), Some(photo_of_a.as_str()));
        let aquarium = store.aquarium(&a).unwrap().clone();
        assert_eq!(store.dashboard_photo(&aquarium).map(|photo| photo.id.clone()), Some(photo_of_a));

        store.set_dashboard_photo(&a, None).unwrap();
        assert!(store.aquarium(&a).unwrap().dashboard_photo_id.is_none());
    }

    #[test]
    fn test_deleting_dashboard_photo_clears_the_reference() {
        let (mut store, a, _) = populated();
        let photo = store.photos_for(&a)[0].id.clone();
        store.set_dashboard_photo(&a, Some(photo.as_str())).unwrap();

        store.delete_photo(&photo).unwrap();

        assert!(store.photo(&photo).is_none());
        assert!(store.aquarium(&a).unwrap().dashboard_photo_id.is_none());
        let reopened = AquariumStore::open(store.storage().clone(), false);
        assert!(reopened.aquarium(&a).unwrap().dashboard_photo_id.is_none());
    }

    #[test]
    fn test_moving_dashboard_photo_releases_the_old_aquarium() {
        let (mut store, a, b) = populated();
        let photo = store.photos_for(&a)[0].clone();
        store.set_dashboard_photo(&a, Some(photo.id.as_str())).unwrap();

        let mut moved = photo.clone();
        moved.aquarium_id = b.clone();
        store.update_photo(moved).unwrap();

        assert_eq!(store.photo(&photo.id).unwrap().aquarium_id, b);
        assert!(store.aquarium(&a).unwrap().dashboard_photo_id.is_none());
        let reopened = AquariumStore::open(store.storage().clone(), false);
        assert!(reopened.aquarium(&a).unwrap().dashboard_photo_id.is_none());

        // Editing a photo in place keeps its own aquarium's dashboard
        store.set_dashboard_photo(&b, Some(photo.id.as_str())).unwrap();
        let mut renamed = store.photo(&photo.id).unwrap().clone();
        renamed.notes = Some("new growth".to_string());
        store.update_photo(renamed).unwrap();
        assert_eq!(store.aquarium(&b).unwrap().dashboard_photo_id.as_deref(), Some(photo.id.as_str()));
    }

    #[test]
    fn test_failed_photo_delete_still_clears_dashboard_in_memory() {
        let (mut store, a, _) = populated();
        let photo = store.photos_for(&a)[0].id.clone();
        store.set_dashboard_photo(&a, Some(photo.as_str())).unwrap();

        // No write fits from here on
        let mut storage = store.into_storage();
        storage.set_quota(Some(0));
        let mut store = AquariumStore::open(storage, false);

        let err = store.delete_photo(&photo).unwrap_err();
        assert!(matches!(err, StoreError::NotPersisted { key: "photos", .. }));

        assert!(store.photo(&photo).is_none());
        assert!(store.aquarium(&a).unwrap().dashboard_photo_id.is_none());
    }

    #[test]
    fn test_quota_failure_keeps_the_change_in_memory() {
        let mut store = AquariumStore::open(MemoryStorage::with_quota(2_000), false);
        let tank = store.add_aquarium(NewAquarium::new("Nano", 30.0, Unit::Litres, at(2024, 1, 1))).unwrap().id;

        let big_photo = photo_url(&"A".repeat(4_000));
        let err = store.add_photo(NewGrowthPhoto::new(&tank, at(2024, 7, 1), big_photo)).unwrap_err();

        assert!(err.is_storage_failure());
        match err {
            StoreError::NotPersisted { key, source } => {
                assert_eq!(key, "photos");
                assert!(matches!(source, StorageError::QuotaExceeded { .. }));
            }
            other => panic!("expected a persistence failure, got {:?}", other),
        }

        // Visible for the rest of the session, absent from storage
        assert_eq!(store.photos().len(), 1);
        assert!(store.storage().raw("photos").is_none());

        // Deleting it frees the space again
        let id = store.photos()[0].id.clone();
        store.delete_photo(&id).unwrap();
        assert_eq!(store.storage().raw("photos"), Some("[]"));
    }

    #[test]
    fn test_cascade_fits_in_a_full_quota() {
        let (store, a, _) = populated();
        let mut storage = store.into_storage();
        // Nothing can grow from here on, but every shrinking write still fits.
        let used: usize = ["aquariums", "waterChanges", "fertilizations", "plants", "photos", "tasks"]
            .iter()
            .filter_map(|key| storage.raw(key).map(str::len))
            .sum();
        storage.set_quota(Some(used));

        let mut store = AquariumStore::open(storage, false);
        store.delete_aquarium(&a).unwrap();

        let reopened = AquariumStore::open(store.storage().clone(), false);
        assert_eq!(reopened.aquariums().len(), 1);
        assert_eq!(reopened.dependent_count(&a), 0);
    }
}
