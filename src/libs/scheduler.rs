//! Task due dates and urgency.
//!
//! [`compute_status`] is a pure function of a task and a reference instant.
//! Callers pass `now` explicitly; the calendar day of both the due date and
//! `now` is taken in `now`'s time zone, so passing `Local::now()` ranks tasks
//! by the owner's wall-clock days while tests can pin everything to UTC.

use super::task::Task;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt;

/// How many tasks the per-aquarium upcoming view shows.
pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Overdue,
    DueToday,
    Upcoming,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Overdue => "overdue",
            Severity::DueToday => "due-today",
            Severity::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStatus {
    pub due_at: DateTime<Utc>,
    /// Calendar day of `due_at` in the reference time zone.
    pub due_date: NaiveDate,
    pub severity: Severity,
    /// Whole days overdue or until due; zero when due today.
    pub days: u32,
}

impl TaskStatus {
    pub fn label(&self) -> String {
        match self.severity {
            Severity::Overdue => format!("Overdue by {} day(s)", self.days),
            Severity::DueToday => "Due Today".to_string(),
            Severity::Upcoming => format!("Due in {} day(s)", self.days),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn compute_status<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> TaskStatus {
    let due_at = task.schedule.due_at();
    let due_date = due_at.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();
    let diff = (due_date - today).num_days();

    let (severity, days) = match diff.cmp(&0) {
        Ordering::Less => (Severity::Overdue, diff.unsigned_abs()),
        Ordering::Equal => (Severity::DueToday, 0),
        Ordering::Greater => (Severity::Upcoming, diff.unsigned_abs()),
    };

    TaskStatus {
        due_at,
        due_date,
        severity,
        days: u32::try_from(days).unwrap_or(u32::MAX),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask<'a> {
    pub task: &'a Task,
    pub status: TaskStatus,
}

/// Pairs each task with its status, earliest due first. Ties keep input order.
pub fn by_due_date<'a, Tz: TimeZone>(tasks: impl IntoIterator<Item = &'a Task>, now: &DateTime<Tz>) -> Vec<ScheduledTask<'a>> {
    let mut scheduled: Vec<ScheduledTask<'a>> = tasks
        .into_iter()
        .map(|task| ScheduledTask {
            task,
            status: compute_status(task, now),
        })
        .collect();

    scheduled.sort_by_key(|entry| entry.status.due_at);
    scheduled
}

/// Tasks of one aquarium, earliest due first, at most `limit` of them.
pub fn upcoming_tasks<'a, Tz: TimeZone>(tasks: &'a [Task], aquarium_id: &str, now: &DateTime<Tz>, limit: usize) -> Vec<ScheduledTask<'a>> {
    let mut scheduled = by_due_date(tasks.iter().filter(|task| task.aquarium_id == aquarium_id), now);
    scheduled.truncate(limit);
    scheduled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::record::Record;
    use crate::libs::task::{NewTask, TaskSchedule};
    use chrono::FixedOffset;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn task(id: &str, aquarium_id: &str, schedule: TaskSchedule) -> Task {
        Task::from_new(id.to_string(), NewTask::new(aquarium_id, id, schedule))
    }

    #[test]
    fn test_recurring_task_overdue() {
        let weekly = task("t", "aq", TaskSchedule::recurring(at(2024, 7, 1, 10), 7));
        let status = compute_status(&weekly, &at(2024, 7, 10, 8));

        assert_eq!(status.due_date, NaiveDate::from_ymd_opt(2024, 7, 8).unwrap());
        assert_eq!(status.severity, Severity::Overdue);
        assert_eq!(status.days, 2);
        assert_eq!(status.label(), "Overdue by 2 day(s)");
    }

    #[test]
    fn test_recurring_task_due_today_ignores_time_of_day() {
        let weekly = task("t", "aq", TaskSchedule::recurring(at(2024, 7, 1, 10), 7));

        for hour in [0, 9, 10, 23] {
            let status = compute_status(&weekly, &at(2024, 7, 8, hour));
            assert_eq!(status.severity, Severity::DueToday);
            assert_eq!(status.days, 0);
            assert_eq!(status.label(), "Due Today");
        }
    }

    #[test]
    fn test_recurring_task_upcoming() {
        let weekly = task("t", "aq", TaskSchedule::recurring(at(2024, 7, 1, 10), 7));
        let status = compute_status(&weekly, &at(2024, 7, 5, 18));

        assert_eq!(status.severity, Severity::Upcoming);
        assert_eq!(status.days, 3);
        assert_eq!(status.label(), "Due in 3 day(s)");
    }

    #[test]
    fn test_one_off_task_uses_its_own_date() {
        let filter = task("t", "aq", TaskSchedule::one_off(at(2024, 7, 30, 11)));

        assert_eq!(compute_status(&filter, &at(2024, 7, 29, 23)).severity, Severity::Upcoming);
        assert_eq!(compute_status(&filter, &at(2024, 7, 30, 0)).severity, Severity::DueToday);
        let late = compute_status(&filter, &at(2024, 8, 2, 0));
        assert_eq!(late.severity, Severity::Overdue);
        assert_eq!(late.days, 3);
    }

    #[test]
    fn test_day_boundary_follows_reference_time_zone() {
        // 23:00 UTC on the 7th is already the 8th at UTC+2.
        let due_late = task("t", "aq", TaskSchedule::one_off(at(2024, 7, 7, 23)));
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = plus_two.with_ymd_and_hms(2024, 7, 8, 9, 0, 0).unwrap();

        let status = compute_status(&due_late, &now);
        assert_eq!(status.severity, Severity::DueToday);
        assert_eq!(status.due_date, NaiveDate::from_ymd_opt(2024, 7, 8).unwrap());
    }

    #[test]
    fn test_upcoming_tasks_filters_sorts_and_limits() {
        let now = at(2024, 7, 20, 12);
        let tasks = vec![
            task("later", "aq1", TaskSchedule::one_off(at(2024, 8, 1, 9))),
            task("other-tank", "aq2", TaskSchedule::one_off(at(2024, 7, 1, 9))),
            task("overdue", "aq1", TaskSchedule::recurring(at(2024, 7, 1, 9), 7)),
            task("soon", "aq1", TaskSchedule::recurring(at(2024, 7, 18, 9), 3)),
            task("a", "aq1", TaskSchedule::one_off(at(2024, 8, 2, 9))),
            task("b", "aq1", TaskSchedule::one_off(at(2024, 8, 3, 9))),
            task("c", "aq1", TaskSchedule::one_off(at(2024, 8, 4, 9))),
        ];

        let upcoming = upcoming_tasks(&tasks, "aq1", &now, UPCOMING_LIMIT);
        let ids: Vec<&str> = upcoming.iter().map(|entry| entry.task.id.as_str()).collect();

        assert_eq!(ids, vec!["overdue", "soon", "later", "a", "b"]);
        assert_eq!(upcoming[0].status.severity, Severity::Overdue);
        assert_eq!(upcoming[0].status.days, 12);
    }
}
