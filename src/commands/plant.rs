use super::aquarium::resolve;
use super::{date_or_now, embed_image, find_record, non_empty, saved};
use crate::{
    libs::{messages::Message, plant::NewPlant, store::AquariumStore, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PlantArgs {
    #[command(subcommand)]
    command: PlantCommand,
}

#[derive(Debug, Subcommand)]
enum PlantCommand {
    /// Record a new plant
    Add {
        aquarium: String,
        species: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        planted: Option<String>,
        /// Image file to attach
        #[arg(short, long)]
        photo: Option<PathBuf>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    List { aquarium: String },
    Edit {
        id: String,
        #[arg(short, long)]
        species: Option<String>,
        #[arg(long)]
        planted: Option<String>,
        #[arg(short, long, conflicts_with = "remove_photo")]
        photo: Option<PathBuf>,
        #[arg(long)]
        remove_photo: bool,
        #[arg(short, long)]
        notes: Option<String>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: PlantArgs) -> Result<()> {
    let mut store = AquariumStore::new()?;
    match args.command {
        PlantCommand::Add {
            aquarium,
            species,
            planted,
            photo,
            notes,
        } => {
            let Some(aquarium) = resolve(&store, &aquarium)?.cloned() else {
                return Ok(());
            };
            let planting_date = date_or_now(planted.as_deref())?;
            let photo_data_url = match photo {
                Some(path) => Some(embed_image(&path).await?),
                None => None,
            };
            let new = NewPlant::new(&aquarium.id, &species, planting_date)
                .with_photo(photo_data_url)
                .with_notes(notes.and_then(non_empty));
            let plant = saved(store.add_plant(new))?;
            msg_success!(Message::PlantAdded(plant.species));
        }
        PlantCommand::List { aquarium } => {
            let Some(aquarium) = resolve(&store, &aquarium)? else {
                return Ok(());
            };
            let plants = store.plants_for(&aquarium.id);
            if plants.is_empty() {
                msg_info!(Message::NoPlants(aquarium.name.clone()));
                return Ok(());
            }
            msg_print!(Message::DetailPlants, true);
            View::plants(&plants)?;
        }
        PlantCommand::Edit {
            id,
            species,
            planted,
            photo,
            remove_photo,
            notes,
        } => {
            let Some(mut plant) = find_record(store.plants(), &id)?.cloned() else {
                msg_error!(Message::PlantNotFound(id));
                return Ok(());
            };
            let before = plant.clone();
            if let Some(species) = species {
                plant.species = species.trim().to_string();
            }
            if planted.is_some() {
                plant.planting_date = date_or_now(planted.as_deref())?;
            }
            if let Some(path) = photo {
                plant.photo_data_url = Some(embed_image(&path).await?);
            } else if remove_photo {
                plant.photo_data_url = None;
            }
            if let Some(notes) = notes {
                plant.notes = non_empty(notes);
            }
            if plant == before {
                msg_info!(Message::NoChangesDetected);
                return Ok(());
            }
            let plant = saved(store.update_plant(plant))?;
            msg_success!(Message::PlantUpdated(plant.species));
        }
        PlantCommand::Delete { id, yes } => {
            let Some(plant) = find_record(store.plants(), &id)?.cloned() else {
                msg_error!(Message::PlantNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDelete(format!("plant '{}'", plant.species)).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            saved(store.delete_plant(&plant.id))?;
            msg_success!(Message::PlantDeleted(plant.species));
        }
    }
    Ok(())
}
