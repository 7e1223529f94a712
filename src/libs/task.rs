//! Maintenance tasks.
//!
//! A task is either recurring (due a fixed number of days after it was last
//! done) or a one-off with a fixed due date that disappears once completed.
//!
//! Stored data keeps the flat layout older journals were written with: an
//! `isRepeatable` flag, an optional `frequencyDays` and a single
//! `lastCompleted` timestamp whose meaning depends on the flag. That layout
//! is converted to and from [`TaskSchedule`] at the serde boundary only.

use super::error::ValidationError;
use super::record::{require_text, AquariumScoped, Record};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted repeat interval, one hundred years.
pub const MAX_FREQUENCY_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSchedule {
    Recurring { last_completed_at: DateTime<Utc>, frequency_days: u32 },
    OneOff { due_at: DateTime<Utc> },
}

impl TaskSchedule {
    pub fn recurring(last_completed_at: DateTime<Utc>, frequency_days: u32) -> Self {
        TaskSchedule::Recurring { last_completed_at, frequency_days }
    }

    pub fn one_off(due_at: DateTime<Utc>) -> Self {
        TaskSchedule::OneOff { due_at }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, TaskSchedule::Recurring { .. })
    }

    pub fn frequency_days(&self) -> Option<u32> {
        match *self {
            TaskSchedule::Recurring { frequency_days, .. } => Some(frequency_days),
            TaskSchedule::OneOff { .. } => None,
        }
    }

    pub fn due_at(&self) -> DateTime<Utc> {
        match *self {
            TaskSchedule::Recurring { last_completed_at, frequency_days } => last_completed_at
                .checked_add_signed(Duration::days(i64::from(frequency_days)))
                .map_or_else(latest_due_at, |due_at| due_at.min(latest_due_at())),
            TaskSchedule::OneOff { due_at } => due_at,
        }
    }
}

/// Upper bound for due dates: one day short of the calendar limit, so any
/// UTC offset can still be applied when the due day is shown.
fn latest_due_at() -> DateTime<Utc> {
    DateTime::<Utc>::MAX_UTC - Duration::days(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TaskRecord", from = "TaskRecord")]
pub struct Task {
    pub id: String,
    pub aquarium_id: String,
    pub name: String,
    pub schedule: TaskSchedule,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub aquarium_id: String,
    pub name: String,
    pub schedule: TaskSchedule,
    pub notes: Option<String>,
}

impl NewTask {
    pub fn new(aquarium_id: &str, name: &str, schedule: TaskSchedule) -> Self {
        Self {
            aquarium_id: aquarium_id.to_string(),
            name: name.trim().to_string(),
            schedule,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

impl Record for Task {
    const KEY: &'static str = "tasks";
    type New = NewTask;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewTask) -> Self {
        Self {
            id,
            aquarium_id: new.aquarium_id,
            name: new.name,
            schedule: new.schedule,
            notes: new.notes,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "Task name")?;
        match self.schedule {
            TaskSchedule::Recurring { frequency_days: 0, .. } => return Err(ValidationError::MissingFrequency),
            TaskSchedule::Recurring { frequency_days, .. } if frequency_days > MAX_FREQUENCY_DAYS => {
                return Err(ValidationError::FrequencyTooLong(frequency_days))
            }
            _ => {}
        }
        Ok(())
    }
}

impl AquariumScoped for Task {
    fn aquarium_id(&self) -> &str {
        &self.aquarium_id
    }
}

/// On-disk shape of a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    aquarium_id: String,
    name: String,
    is_repeatable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frequency_days: Option<u32>,
    last_completed: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let (is_repeatable, frequency_days, last_completed) = match task.schedule {
            TaskSchedule::Recurring { last_completed_at, frequency_days } => (true, Some(frequency_days), last_completed_at),
            TaskSchedule::OneOff { due_at } => (false, None, due_at),
        };

        TaskRecord {
            id: task.id,
            aquarium_id: task.aquarium_id,
            name: task.name,
            is_repeatable,
            frequency_days,
            last_completed,
            notes: task.notes,
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        // A repeatable flag without a usable frequency has always been scheduled as a one-off.
        let schedule = match (record.is_repeatable, record.frequency_days) {
            (true, Some(frequency_days)) if frequency_days > 0 => TaskSchedule::recurring(record.last_completed, frequency_days),
            _ => TaskSchedule::one_off(record.last_completed),
        };

        Task {
            id: record.id,
            aquarium_id: record.aquarium_id,
            name: record.name,
            schedule,
            notes: record.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_due_at_for_each_schedule() {
        assert_eq!(TaskSchedule::recurring(at(2024, 7, 1), 7).due_at(), at(2024, 7, 8));
        assert_eq!(TaskSchedule::one_off(at(2024, 7, 30)).due_at(), at(2024, 7, 30));
    }

    #[test]
    fn test_recurring_task_wire_format() {
        let task = Task::from_new("t1".to_string(), NewTask::new("aq1", "Weekly water change", TaskSchedule::recurring(at(2024, 7, 15), 7)));
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["isRepeatable"], true);
        assert_eq!(json["frequencyDays"], 7);
        assert_eq!(json["lastCompleted"], "2024-07-15T10:00:00Z");
        assert_eq!(json["aquariumId"], "aq1");
    }

    #[test]
    fn test_one_off_task_wire_format() {
        let task = Task::from_new("t3".to_string(), NewTask::new("aq2", "Clean filter", TaskSchedule::one_off(at(2024, 7, 30))));
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["isRepeatable"], false);
        assert!(json.get("frequencyDays").is_none());
        assert_eq!(json["lastCompleted"], "2024-07-30T10:00:00Z");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_repeatable_without_frequency_reads_as_one_off() {
        let raw = r#"{"id":"t9","aquariumId":"aq1","name":"Trim","isRepeatable":true,"lastCompleted":"2024-07-18T10:00:00.000Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();

        assert_eq!(task.schedule, TaskSchedule::one_off(Utc.with_ymd_and_hms(2024, 7, 18, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_zero_frequency_is_rejected() {
        let task = Task::from_new("t".to_string(), NewTask::new("aq1", "Dose", TaskSchedule::recurring(at(2024, 7, 1), 0)));
        assert_eq!(task.validate(), Err(ValidationError::MissingFrequency));
    }

    #[test]
    fn test_frequency_limit() {
        let yearly = Task::from_new("t".to_string(), NewTask::new("aq1", "Replace bulbs", TaskSchedule::recurring(at(2024, 7, 1), MAX_FREQUENCY_DAYS)));
        assert!(yearly.validate().is_ok());

        let endless = Task::from_new("t".to_string(), NewTask::new("aq1", "Dose", TaskSchedule::recurring(at(2024, 7, 1), 200_000_000)));
        assert_eq!(endless.validate(), Err(ValidationError::FrequencyTooLong(200_000_000)));
    }

    #[test]
    fn test_due_at_saturates_past_calendar_range() {
        let raw = r#"{"id":"t8","aquariumId":"aq1","name":"Someday","isRepeatable":true,"frequencyDays":4000000000,"lastCompleted":"2024-07-18T10:00:00Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();

        assert_eq!(task.schedule.due_at(), latest_due_at());

        let east = chrono::FixedOffset::east_opt(14 * 3600).unwrap();
        let status = crate::libs::scheduler::compute_status(&task, &at(2024, 7, 20).with_timezone(&east));
        assert_eq!(status.severity, crate::libs::scheduler::Severity::Upcoming);
    }
}
