use super::{date_or_now, find_record, non_empty, saved};
use crate::{
    libs::{
        aquarium::{parse_clock_time, Aquarium, Co2, Lighting, NewAquarium, Unit},
        formatter::{format_date, parse_date},
        messages::Message,
        scheduler::UPCOMING_LIMIT,
        storage::KeyValueStore,
        store::AquariumStore,
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct AquariumArgs {
    #[command(subcommand)]
    command: AquariumCommand,
}

#[derive(Debug, Subcommand)]
enum AquariumCommand {
    /// Add an aquarium
    Add {
        name: String,
        size: f64,
        /// gallons-us, gallons-uk or litres
        #[arg(short, long, default_value = "gallons-us")]
        unit: Unit,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        setup_date: Option<String>,
        #[arg(long)]
        lighting: Option<String>,
        #[arg(long, default_value = "10:00")]
        lights_on: String,
        #[arg(long, default_value = "20:00")]
        lights_off: String,
        #[arg(long)]
        co2: Option<String>,
    },
    /// List all aquariums
    List,
    /// Show an aquarium with its logs, plants, photos and upcoming tasks
    Show { aquarium: String },
    /// Edit an aquarium interactively
    Edit { aquarium: String },
    /// Delete an aquarium and everything recorded for it
    Delete {
        aquarium: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: AquariumArgs) -> Result<()> {
    let mut store = AquariumStore::new()?;
    match args.command {
        AquariumCommand::Add {
            name,
            size,
            unit,
            setup_date,
            lighting,
            lights_on,
            lights_off,
            co2,
        } => {
            let mut new = NewAquarium::new(&name, size, unit, date_or_now(setup_date.as_deref())?);
            if let Some(brand) = lighting.and_then(non_empty) {
                new = new.with_lighting(Lighting {
                    brand,
                    on_time: clock(&lights_on)?,
                    off_time: clock(&lights_off)?,
                });
            }
            if let Some(details) = co2.and_then(non_empty) {
                new = new.with_co2(&details);
            }
            let aquarium = saved(store.add_aquarium(new))?;
            msg_success!(Message::AquariumCreated(aquarium.name));
            Ok(())
        }
        AquariumCommand::List => handle_list(&store),
        AquariumCommand::Show { aquarium } => handle_show(&store, &aquarium),
        AquariumCommand::Edit { aquarium } => handle_edit(&mut store, &aquarium),
        AquariumCommand::Delete { aquarium, yes } => handle_delete(&mut store, &aquarium, yes),
    }
}

fn clock(raw: &str) -> Result<NaiveTime> {
    match parse_clock_time(raw) {
        Ok(time) => Ok(time),
        Err(_) => msg_bail_anyhow!(Message::InvalidTime(raw.to_string())),
    }
}

/// Resolves an aquarium argument or reports it missing.
pub(crate) fn resolve<'a, S: KeyValueStore>(store: &'a AquariumStore<S>, id: &str) -> Result<Option<&'a Aquarium>> {
    let aquarium = find_record(store.aquariums(), id)?;
    if aquarium.is_none() {
        msg_error!(Message::AquariumNotFound(id.to_string()));
    }
    Ok(aquarium)
}

fn handle_list<S: KeyValueStore>(store: &AquariumStore<S>) -> Result<()> {
    if store.aquariums().is_empty() {
        msg_info!(Message::NoAquariums);
        return Ok(());
    }

    msg_print!(Message::AquariumsHeader, true);
    View::aquariums(store.aquariums())
}

fn handle_show<S: KeyValueStore>(store: &AquariumStore<S>, id: &str) -> Result<()> {
    let Some(aquarium) = resolve(store, id)? else {
        return Ok(());
    };

    View::aquarium(aquarium, store.dashboard_photo(aquarium))?;

    let upcoming = store.upcoming_tasks(&aquarium.id, &Local::now(), UPCOMING_LIMIT);
    if !upcoming.is_empty() {
        msg_print!(Message::DetailUpcomingTasks, true);
        View::tasks(&upcoming)?;
    }

    let water_changes = store.water_changes_for(&aquarium.id);
    if !water_changes.is_empty() {
        msg_print!(Message::DetailWaterChanges, true);
        View::water_changes(&water_changes)?;
    }

    let fertilizations = store.fertilizations_for(&aquarium.id);
    if !fertilizations.is_empty() {
        msg_print!(Message::DetailFertilizations, true);
        View::fertilizations(&fertilizations)?;
    }

    let plants = store.plants_for(&aquarium.id);
    if !plants.is_empty() {
        msg_print!(Message::DetailPlants, true);
        View::plants(&plants)?;
    }

    let photos = store.photos_for(&aquarium.id);
    if !photos.is_empty() {
        msg_print!(Message::DetailPhotos, true);
        View::photos(&photos, aquarium.dashboard_photo_id.as_deref())?;
    }

    Ok(())
}

fn handle_edit<S: KeyValueStore>(store: &mut AquariumStore<S>, id: &str) -> Result<()> {
    let Some(current) = resolve(store, id)?.cloned() else {
        return Ok(());
    };

    msg_print!(Message::EditingAquarium(current.name.clone()), true);
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptAquariumName.to_string())
        .default(current.name.clone())
        .interact_text()?;

    let size: f64 = Input::with_theme(&theme)
        .with_prompt(Message::PromptAquariumSize.to_string())
        .default(current.size)
        .interact_text()?;

    let units = [Unit::GallonsUs, Unit::GallonsUk, Unit::Litres];
    let unit_index = Select::with_theme(&theme)
        .with_prompt(Message::PromptAquariumUnit.to_string())
        .items(&units.iter().map(Unit::label).collect::<Vec<_>>())
        .default(units.iter().position(|unit| *unit == current.unit).unwrap_or(0))
        .interact()?;

    let setup_date: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptSetupDate.to_string())
        .default(format_date(&current.setup_date))
        .validate_with(|raw: &String| parse_date(raw).map(|_| ()).ok_or_else(|| Message::InvalidDate(raw.clone()).to_string()))
        .interact_text()?;

    let brand: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptLightingBrand.to_string())
        .default(current.lighting.as_ref().map(|l| l.brand.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let lighting = match non_empty(brand) {
        Some(brand) => {
            let defaults = current.lighting.clone();
            let on_time = prompt_clock(&theme, Message::PromptLightsOn, defaults.as_ref().map(|l| l.on_time), "10:00")?;
            let off_time = prompt_clock(&theme, Message::PromptLightsOff, defaults.as_ref().map(|l| l.off_time), "20:00")?;
            Some(Lighting { brand, on_time, off_time })
        }
        None => None,
    };

    let co2: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptCo2Details.to_string())
        .default(current.co2.as_ref().map(|c| c.details.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let updated = Aquarium {
        name: name.trim().to_string(),
        size,
        unit: units[unit_index],
        setup_date: date_or_now(Some(setup_date.as_str()))?,
        lighting,
        co2: non_empty(co2).map(|details| Co2 { details }),
        ..current.clone()
    };

    if updated == current {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let aquarium = saved(store.update_aquarium(updated))?;
    msg_success!(Message::AquariumUpdated(aquarium.name));
    Ok(())
}

fn prompt_clock(theme: &ColorfulTheme, prompt: Message, current: Option<NaiveTime>, fallback: &str) -> Result<NaiveTime> {
    let default = current.map(|time| time.format("%H:%M").to_string()).unwrap_or_else(|| fallback.to_string());
    let raw: String = Input::with_theme(theme)
        .with_prompt(prompt.to_string())
        .default(default)
        .validate_with(|raw: &String| parse_clock_time(raw).map(|_| ()).map_err(|_| Message::InvalidTime(raw.clone()).to_string()))
        .interact_text()?;
    clock(&raw)
}

fn handle_delete<S: KeyValueStore>(store: &mut AquariumStore<S>, id: &str, yes: bool) -> Result<()> {
    let Some(aquarium) = resolve(store, id)?.cloned() else {
        return Ok(());
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteAquarium(aquarium.name.clone(), store.dependent_count(&aquarium.id)).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    saved(store.delete_aquarium(&aquarium.id))?;
    msg_success!(Message::AquariumDeleted(aquarium.name));
    Ok(())
}
