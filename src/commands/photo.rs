use super::aquarium::resolve;
use super::{date_or_now, embed_image, find_record, non_empty, saved};
use crate::{
    libs::{ingest::DATA_URL_PREFIX, messages::Message, plant::NewGrowthPhoto, store::AquariumStore, view::View},
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PhotoArgs {
    #[command(subcommand)]
    command: PhotoCommand,
}

#[derive(Debug, Subcommand)]
enum PhotoCommand {
    /// Add a growth photo
    Add {
        aquarium: String,
        file: PathBuf,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// Also use it as the aquarium's dashboard photo
        #[arg(long)]
        star: bool,
    },
    List { aquarium: String },
    Edit {
        id: String,
        /// Replace the picture
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Use a photo as its aquarium's dashboard photo
    Star { id: String },
    /// Clear an aquarium's dashboard photo
    Unstar { aquarium: String },
    /// Write the stored JPEG to a file
    Export { id: String, output: PathBuf },
}

pub async fn cmd(args: PhotoArgs) -> Result<()> {
    let mut store = AquariumStore::new()?;
    match args.command {
        PhotoCommand::Add {
            aquarium,
            file,
            date,
            notes,
            star,
        } => {
            let Some(aquarium) = resolve(&store, &aquarium)?.cloned() else {
                return Ok(());
            };
            let date = date_or_now(date.as_deref())?;
            let data_url = embed_image(&file).await?;
            let photo = saved(store.add_photo(NewGrowthPhoto::new(&aquarium.id, date, data_url).with_notes(notes.and_then(non_empty))))?;
            msg_success!(Message::PhotoAdded(aquarium.name.clone()));
            if star {
                saved(store.set_dashboard_photo(&aquarium.id, Some(photo.id.as_str())))?;
                msg_success!(Message::DashboardPhotoSet(aquarium.name));
            }
        }
        PhotoCommand::List { aquarium } => {
            let Some(aquarium) = resolve(&store, &aquarium)? else {
                return Ok(());
            };
            let photos = store.photos_for(&aquarium.id);
            if photos.is_empty() {
                msg_info!(Message::NoPhotos(aquarium.name.clone()));
                return Ok(());
            }
            msg_print!(Message::DetailPhotos, true);
            View::photos(&photos, aquarium.dashboard_photo_id.as_deref())?;
        }
        PhotoCommand::Edit { id, file, date, notes } => {
            let Some(mut photo) = find_record(store.photos(), &id)?.cloned() else {
                msg_error!(Message::PhotoNotFound(id));
                return Ok(());
            };
            let before = photo.clone();
            if let Some(file) = file {
                photo.photo_data_url = embed_image(&file).await?;
            }
            if date.is_some() {
                photo.date = date_or_now(date.as_deref())?;
            }
            if let Some(notes) = notes {
                photo.notes = non_empty(notes);
            }
            if photo == before {
                msg_info!(Message::NoChangesDetected);
                return Ok(());
            }
            saved(store.update_photo(photo))?;
            msg_success!(Message::PhotoUpdated);
        }
        PhotoCommand::Delete { id, yes } => {
            let Some(photo) = find_record(store.photos(), &id)?.cloned() else {
                msg_error!(Message::PhotoNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDelete(format!("photo from {}", photo.date.format("%Y-%m-%d"))).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            saved(store.delete_photo(&photo.id))?;
            msg_success!(Message::PhotoDeleted);
        }
        PhotoCommand::Star { id } => {
            let Some(photo) = find_record(store.photos(), &id)?.cloned() else {
                msg_error!(Message::PhotoNotFound(id));
                return Ok(());
            };
            let aquarium = saved(store.set_dashboard_photo(&photo.aquarium_id, Some(photo.id.as_str())))?;
            msg_success!(Message::DashboardPhotoSet(aquarium.name));
        }
        PhotoCommand::Unstar { aquarium } => {
            let Some(aquarium) = resolve(&store, &aquarium)?.cloned() else {
                return Ok(());
            };
            saved(store.set_dashboard_photo(&aquarium.id, None))?;
            msg_success!(Message::DashboardPhotoCleared(aquarium.name));
        }
        PhotoCommand::Export { id, output } => {
            let Some(photo) = find_record(store.photos(), &id)? else {
                msg_error!(Message::PhotoNotFound(id));
                return Ok(());
            };
            let Some(encoded) = photo.photo_data_url.strip_prefix(DATA_URL_PREFIX) else {
                msg_bail_anyhow!(Message::PhotoNotJpeg(photo.id.clone()));
            };
            tokio::fs::write(&output, STANDARD.decode(encoded)?).await?;
            msg_success!(Message::PhotoExported(output.display().to_string()));
        }
    }
    Ok(())
}
