//! Application configuration.
//!
//! Stored as pretty-printed JSON in `config.json` inside the platform data
//! directory. Every module is optional; a missing file or module means the
//! built-in defaults apply, so the journal works without running `init`.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Limits applied when turning an uploaded picture into an embedded JPEG.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageConfig {
    /// Uploads above this many bytes are rejected before decoding.
    pub max_upload_bytes: usize,

    /// Wider images are scaled down to this width, keeping the aspect ratio.
    pub max_width: u32,

    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StorageConfig {
    /// Upper bound on the total size of all stored collections. `None` disables the check.
    pub quota_bytes: Option<usize>,

    /// Populate the example aquariums and tasks when a collection has never been stored.
    pub seed_defaults: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            max_upload_bytes: 10 * MIB,
            max_width: 800,
            jpeg_quality: 80,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            quota_bytes: Some(5 * MIB),
            seed_defaults: true,
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. Returns `false` when there was nothing to remove.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    pub fn image_settings(&self) -> ImageConfig {
        self.image.clone().unwrap_or_default()
    }

    pub fn storage_settings(&self) -> StorageConfig {
        self.storage.clone().unwrap_or_default()
    }

    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "image".to_string(),
                name: Message::ConfigModuleImage.to_string(),
            },
            ConfigModule {
                key: "storage".to_string(),
                name: Message::ConfigModuleStorage.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "image" => {
                    let default = config.image_settings();
                    msg_print!(Message::ConfigModuleImage);
                    let max_upload_mb: usize = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptMaxUploadMb.to_string())
                        .default(default.max_upload_bytes / MIB)
                        .interact_text()?;
                    config.image = Some(ImageConfig {
                        max_upload_bytes: max_upload_mb.max(1) * MIB,
                        max_width: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaxWidth.to_string())
                            .default(default.max_width)
                            .validate_with(|width: &u32| if *width > 0 { Ok(()) } else { Err("must be positive") })
                            .interact_text()?,
                        jpeg_quality: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptJpegQuality.to_string())
                            .default(default.jpeg_quality)
                            .validate_with(|quality: &u8| if (1..=100).contains(quality) { Ok(()) } else { Err("must be between 1 and 100") })
                            .interact_text()?,
                    });
                }
                "storage" => {
                    let default = config.storage_settings();
                    msg_print!(Message::ConfigModuleStorage);
                    let quota_mb: usize = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptQuotaMb.to_string())
                        .default(default.quota_bytes.map(|bytes| bytes / MIB).unwrap_or(0))
                        .interact_text()?;
                    config.storage = Some(StorageConfig {
                        quota_bytes: (quota_mb > 0).then_some(quota_mb * MIB),
                        seed_defaults: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSeedDefaults.to_string())
                            .default(default.seed_defaults)
                            .interact()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
