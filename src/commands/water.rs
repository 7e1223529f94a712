use super::aquarium::resolve;
use super::{date_or_now, find_record, non_empty, saved};
use crate::{
    libs::{
        aquarium::Unit,
        log::NewWaterChange,
        messages::Message,
        store::AquariumStore,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct WaterArgs {
    #[command(subcommand)]
    command: WaterCommand,
}

#[derive(Debug, Subcommand)]
enum WaterCommand {
    /// Log a water change
    Add {
        aquarium: String,
        volume: f64,
        /// Defaults to the aquarium's unit
        #[arg(short, long)]
        unit: Option<Unit>,
        /// YYYY-MM-DD, defaults to now
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List water changes of an aquarium, newest first
    List { aquarium: String },
    /// Change fields of a logged water change
    Edit {
        id: String,
        #[arg(long)]
        volume: Option<f64>,
        #[arg(short, long)]
        unit: Option<Unit>,
        #[arg(short, long)]
        date: Option<String>,
        /// Pass an empty string to clear
        #[arg(short, long)]
        notes: Option<String>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: WaterArgs) -> Result<()> {
    let mut store = AquariumStore::new()?;
    match args.command {
        WaterCommand::Add {
            aquarium,
            volume,
            unit,
            date,
            notes,
        } => {
            let Some(aquarium) = resolve(&store, &aquarium)?.cloned() else {
                return Ok(());
            };
            let new = NewWaterChange::new(&aquarium.id, date_or_now(date.as_deref())?, volume, unit.unwrap_or(aquarium.unit))
                .with_notes(notes.and_then(non_empty));
            saved(store.add_water_change(new))?;
            msg_success!(Message::WaterChangeLogged(aquarium.name));
        }
        WaterCommand::List { aquarium } => {
            let Some(aquarium) = resolve(&store, &aquarium)? else {
                return Ok(());
            };
            let logs = store.water_changes_for(&aquarium.id);
            if logs.is_empty() {
                msg_info!(Message::NoWaterChanges(aquarium.name.clone()));
                return Ok(());
            }
            msg_print!(Message::DetailWaterChanges, true);
            View::water_changes(&logs)?;
        }
        WaterCommand::Edit {
            id,
            volume,
            unit,
            date,
            notes,
        } => {
            let Some(mut log) = find_record(store.water_changes(), &id)?.cloned() else {
                msg_error!(Message::WaterChangeNotFound(id));
                return Ok(());
            };
            if volume.is_none() && unit.is_none() && date.is_none() && notes.is_none() {
                msg_info!(Message::NoChangesDetected);
                return Ok(());
            }
            if let Some(volume) = volume {
                log.volume = volume;
            }
            if let Some(unit) = unit {
                log.unit = unit;
            }
            if date.is_some() {
                log.date = date_or_now(date.as_deref())?;
            }
            if let Some(notes) = notes {
                log.notes = non_empty(notes);
            }
            saved(store.update_water_change(log))?;
            msg_success!(Message::WaterChangeUpdated);
        }
        WaterCommand::Delete { id, yes } => {
            let Some(log) = find_record(store.water_changes(), &id)?.cloned() else {
                msg_error!(Message::WaterChangeNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDelete(format!("water change {}", log.id)).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            saved(store.delete_water_change(&log.id))?;
            msg_success!(Message::WaterChangeDeleted);
        }
    }
    Ok(())
}
