#[cfg(test)]
mod tests {
    use aqualog::libs::config::{Config, ImageConfig, StorageConfig};
    use aqualog::libs::store::AquariumStore;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Tests here point HOME at a temp dir, so they must not overlap.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Gives each test its own empty data directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.image.is_none());
        assert!(config.storage.is_none());

        assert_eq!(config.image_settings(), ImageConfig::default());
        assert_eq!(config.storage_settings().quota_bytes, Some(5 * 1024 * 1024));
        assert!(config.storage_settings().seed_defaults);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(_ctx: &mut ConfigTestContext) {
        let config = Config {
            image: Some(ImageConfig {
                max_upload_bytes: 2 * 1024 * 1024,
                max_width: 640,
                jpeg_quality: 70,
            }),
            storage: None,
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        assert_eq!(read_config.image, config.image);
        assert!(read_config.storage.is_none());
        assert_eq!(read_config.image_settings().max_width, 640);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_config(_ctx: &mut ConfigTestContext) {
        assert!(!Config::delete().unwrap());

        Config::default().save().unwrap();
        assert!(Config::delete().unwrap());
        assert!(!Config::delete().unwrap());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_store_follows_storage_settings(_ctx: &mut ConfigTestContext) {
        let seeded = AquariumStore::new().unwrap();
        assert_eq!(seeded.aquariums().len(), 2);
        drop(seeded);

        // A fresh data directory with seeding turned off starts empty
        let temp_dir = tempfile::tempdir().unwrap();
        std::env::set_var("HOME", temp_dir.path());
        std::env::set_var("LOCALAPPDATA", temp_dir.path());
        Config {
            image: None,
            storage: Some(StorageConfig {
                quota_bytes: None,
                seed_defaults: false,
            }),
        }
        .save()
        .unwrap();

        let empty = AquariumStore::new().unwrap();
        assert!(empty.aquariums().is_empty());
        assert!(empty.tasks().is_empty());
    }
}
