pub mod aquarium;
pub mod fertilizer;
pub mod init;
pub mod photo;
pub mod plant;
pub mod task;
pub mod water;

use crate::libs::config::Config;
use crate::libs::error::{StorageError, StoreError, StoreResult};
use crate::libs::formatter::parse_date;
use crate::libs::ingest::{ImageIngestor, ImageSelection, ImageUpload};
use crate::libs::messages::Message;
use crate::libs::record::Record;
use crate::{msg_bail_anyhow, msg_info, msg_warning};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage aquariums", visible_alias = "aq")]
    Aquarium(aquarium::AquariumArgs),
    #[command(about = "Log and review water changes")]
    Water(water::WaterArgs),
    #[command(about = "Log and review fertilizer dosing", visible_alias = "fert")]
    Fertilizer(fertilizer::FertilizerArgs),
    #[command(about = "Keep track of plants")]
    Plant(plant::PlantArgs),
    #[command(about = "Growth photos and the dashboard picture")]
    Photo(photo::PhotoArgs),
    #[command(about = "Maintenance tasks and due dates")]
    Task(task::TaskArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Aquarium(args) => aquarium::cmd(args),
            Commands::Water(args) => water::cmd(args),
            Commands::Fertilizer(args) => fertilizer::cmd(args),
            Commands::Plant(args) => plant::cmd(args).await,
            Commands::Photo(args) => photo::cmd(args).await,
            Commands::Task(args) => task::cmd(args),
        }
    }
}

/// Finds a record by full id or by a unique id prefix.
pub(crate) fn find_record<'a, T: Record>(records: &'a [T], id: &str) -> Result<Option<&'a T>> {
    if let Some(record) = records.iter().find(|record| record.id() == id) {
        return Ok(Some(record));
    }

    let matches: Vec<&T> = records.iter().filter(|record| record.id().starts_with(id)).collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.first().copied()),
        count => msg_bail_anyhow!(Message::AmbiguousId(id.to_string(), count)),
    }
}

/// `None` means now.
pub(crate) fn date_or_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => match parse_date(raw) {
            Some(date) => Ok(date),
            None => msg_bail_anyhow!(Message::InvalidDate(raw.to_string())),
        },
        None => Ok(Utc::now()),
    }
}

/// Empty strings clear optional text fields.
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Turns a store result into a command result, adding advice when storage ran out of room.
pub(crate) fn saved<T>(result: StoreResult<T>) -> Result<T> {
    result.map_err(|err| {
        if let StoreError::NotPersisted {
            source: StorageError::QuotaExceeded { .. },
            ..
        } = &err
        {
            msg_warning!(Message::StorageFull);
        }
        anyhow::Error::new(err)
    })
}

/// Loads and processes one image file into an embeddable data URI.
pub(crate) async fn embed_image(path: &Path) -> Result<String> {
    let ingestor = ImageIngestor::new(Config::read()?.image_settings());
    let mut selection = ImageSelection::new(ingestor);

    let upload = ImageUpload::from_path(path).await?;
    msg_info!(Message::ProcessingImage(upload.file_name.clone()));
    selection.select(upload)?;

    match selection.finish().await {
        Some(result) => {
            let image = result?;
            msg_info!(Message::ImageReady(image.width, image.height));
            Ok(image.data_url)
        }
        None => Err(crate::libs::error::IngestError::Cancelled.into()),
    }
}
