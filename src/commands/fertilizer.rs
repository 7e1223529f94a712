use super::aquarium::resolve;
use super::{date_or_now, find_record, non_empty, saved};
use crate::{
    libs::{log::NewFertilization, messages::Message, store::AquariumStore, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct FertilizerArgs {
    #[command(subcommand)]
    command: FertilizerCommand,
}

#[derive(Debug, Subcommand)]
enum FertilizerCommand {
    /// Log a fertilizer dose
    Add {
        aquarium: String,
        fertilizer: String,
        /// Dose in millilitres
        dosage_ml: f64,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List doses for an aquarium, newest first
    List { aquarium: String },
    Edit {
        id: String,
        #[arg(short, long)]
        fertilizer: Option<String>,
        #[arg(long)]
        dosage_ml: Option<f64>,
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
}

pub fn cmd(args: FertilizerArgs) -> Result<()> {
    let mut store = AquariumStore::new()?;
    match args.command {
        FertilizerCommand::Add {
            aquarium,
            fertilizer,
            dosage_ml,
            date,
            notes,
        } => {
            let Some(aquarium) = resolve(&store, &aquarium)?.cloned() else {
                return Ok(());
            };
            let new = NewFertilization::new(&aquarium.id, date_or_now(date.as_deref())?, &fertilizer, dosage_ml).with_notes(notes.and_then(non_empty));
            saved(store.add_fertilization(new))?;
            msg_success!(Message::FertilizationLogged(aquarium.name));
        }
        FertilizerCommand::List { aquarium } => {
            let Some(aquarium) = resolve(&store, &aquarium)? else {
                return Ok(());
            };
            let logs = store.fertilizations_for(&aquarium.id);
            if logs.is_empty() {
                msg_info!(Message::NoFertilizations(aquarium.name.clone()));
                return Ok(());
            }
            msg_print!(Message::DetailFertilizations, true);
            View::fertilizations(&logs)?;
        }
        FertilizerCommand::Edit {
            id,
            fertilizer,
            dosage_ml,
            date,
            notes,
        } => {
            let Some(mut log) = find_record(store.fertilizations(), &id)?.cloned() else {
                msg_error!(Message::FertilizationNotFound(id));
                return Ok(());
            };
            let before = log.clone();
            if let Some(fertilizer) = fertilizer {
                log.fertilizer = fertilizer.trim().to_string();
            }
            if let Some(dosage_ml) = dosage_ml {
                log.dosage_ml = dosage_ml;
            }
            if date.is_some() {
                log.date = date_or_now(date.as_deref())?;
            }
            if let Some(notes) = notes {
                log.notes = non_empty(notes);
            }
            if log == before {
                msg_info!(Message::NoChangesDetected);
                return Ok(());
            }
            saved(store.update_fertilization(log))?;
            msg_success!(Message::FertilizationUpdated);
        }
        FertilizerCommand::Delete { id, yes } => {
            let Some(log) = find_record(store.fertilizations(), &id)?.cloned() else {
                msg_error!(Message::FertilizationNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDelete(format!("{} dose from {}", log.fertilizer, log.date.format("%Y-%m-%d"))).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            saved(store.delete_fertilization(&log.id))?;
            msg_success!(Message::FertilizationDeleted);
        }
    }
    Ok(())
}
