use super::aquarium::resolve;
use super::{date_or_now, find_record, non_empty, saved};
use crate::{
    libs::{
        messages::Message,
        scheduler::{by_due_date, compute_status},
        store::{AquariumStore, Completion},
        task::{NewTask, TaskSchedule},
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Schedule a task: recurring with --every, otherwise one-off
    Add {
        aquarium: String,
        name: String,
        /// Repeat every N days
        #[arg(long, conflicts_with = "due")]
        every: Option<u32>,
        /// When a recurring task was last done, defaults to now
        #[arg(long, requires = "every")]
        last: Option<String>,
        /// Due date of a one-off task, defaults to now
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List tasks by due date, optionally for one aquarium
    List {
        aquarium: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Make the task recurring every N days
        #[arg(long, conflicts_with_all = ["due", "once"])]
        every: Option<u32>,
        #[arg(long, conflicts_with = "due")]
        last: Option<String>,
        #[arg(long)]
        due: Option<String>,
        /// Turn a recurring task into a one-off due at its next due date
        #[arg(long)]
        once: bool,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Mark a task as done
    Done {
        id: String,
        /// Completion time, defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let mut store = AquariumStore::new()?;
    match args.command {
        TaskCommand::Add {
            aquarium,
            name,
            every,
            last,
            due,
            notes,
        } => {
            let Some(aquarium) = resolve(&store, &aquarium)?.cloned() else {
                return Ok(());
            };
            let schedule = match every {
                Some(days) => TaskSchedule::recurring(date_or_now(last.as_deref())?, days),
                None => TaskSchedule::one_off(date_or_now(due.as_deref())?),
            };
            let task = saved(store.add_task(NewTask::new(&aquarium.id, &name, schedule).with_notes(notes.and_then(non_empty))))?;
            msg_success!(Message::TaskCreated(task.name));
        }
        TaskCommand::List { aquarium, limit } => {
            let tasks = match aquarium {
                Some(aquarium) => {
                    let Some(aquarium) = resolve(&store, &aquarium)? else {
                        return Ok(());
                    };
                    store.tasks_for(&aquarium.id)
                }
                None => store.tasks().iter().collect(),
            };
            if tasks.is_empty() {
                msg_info!(Message::NoTasks);
                return Ok(());
            }
            let mut scheduled = by_due_date(tasks, &Local::now());
            if let Some(limit) = limit {
                scheduled.truncate(limit);
            }
            msg_print!(Message::TasksHeader, true);
            View::tasks(&scheduled)?;
        }
        TaskCommand::Edit {
            id,
            name,
            every,
            last,
            due,
            once,
            notes,
        } => {
            let Some(mut task) = find_record(store.tasks(), &id)?.cloned() else {
                msg_error!(Message::TaskNotFound(id));
                return Ok(());
            };
            let before = task.clone();
            if let Some(name) = name {
                task.name = name.trim().to_string();
            }
            task.schedule = match (task.schedule, every, last, due, once) {
                (_, Some(days), last, None, false) => {
                    let last_completed_at = match (last, task.schedule) {
                        (Some(raw), _) => date_or_now(Some(raw.as_str()))?,
                        (None, TaskSchedule::Recurring { last_completed_at, .. }) => last_completed_at,
                        (None, TaskSchedule::OneOff { .. }) => date_or_now(None)?,
                    };
                    TaskSchedule::recurring(last_completed_at, days)
                }
                (TaskSchedule::Recurring { frequency_days, .. }, None, Some(raw), None, false) => {
                    TaskSchedule::recurring(date_or_now(Some(raw.as_str()))?, frequency_days)
                }
                (_, None, None, Some(raw), _) => TaskSchedule::one_off(date_or_now(Some(raw.as_str()))?),
                (schedule, None, None, None, true) => TaskSchedule::one_off(schedule.due_at()),
                (schedule, None, None, None, false) => schedule,
                _ => msg_bail_anyhow!(Message::ScheduleConflict),
            };
            if let Some(notes) = notes {
                task.notes = non_empty(notes);
            }
            if task == before {
                msg_info!(Message::NoChangesDetected);
                return Ok(());
            }
            let task = saved(store.update_task(task))?;
            msg_success!(Message::TaskUpdated(task.name));
        }
        TaskCommand::Done { id, at } => {
            let Some(task) = find_record(store.tasks(), &id)?.cloned() else {
                msg_error!(Message::TaskNotFound(id));
                return Ok(());
            };
            match saved(store.complete_task(&task.id, date_or_now(at.as_deref())?))? {
                Completion::Rescheduled(next) => {
                    let status = compute_status(&next, &Local::now());
                    msg_success!(Message::TaskRescheduled(next.name, status.label()));
                }
                Completion::Removed(done) => msg_success!(Message::TaskCompletedRemoved(done.name)),
                Completion::NotFound => msg_error!(Message::TaskNotFound(id)),
            }
        }
        TaskCommand::Delete { id, yes } => {
            let Some(task) = find_record(store.tasks(), &id)?.cloned() else {
                msg_error!(Message::TaskNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDelete(format!("task '{}'", task.name)).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            saved(store.delete_task(&task.id))?;
            msg_success!(Message::TaskDeleted(task.name));
        }
    }
    Ok(())
}
