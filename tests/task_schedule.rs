#[cfg(test)]
mod tests {
    use aqualog::libs::aquarium::{NewAquarium, Unit};
    use aqualog::libs::scheduler::{compute_status, Severity, UPCOMING_LIMIT};
    use aqualog::libs::storage::MemoryStorage;
    use aqualog::libs::store::{AquariumStore, Completion};
    use aqualog::libs::task::{NewTask, TaskSchedule};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn seeded() -> AquariumStore<MemoryStorage> {
        AquariumStore::open(MemoryStorage::new(), true)
    }

    #[test]
    fn test_seeded_tasks_status() {
        let store = seeded();
        let now = at(2024, 7, 20, 9);

        let weekly = compute_status(store.task("t1").unwrap(), &now);
        assert_eq!(weekly.due_date, NaiveDate::from_ymd_opt(2024, 7, 22).unwrap());
        assert_eq!(weekly.severity, Severity::Upcoming);
        assert_eq!(weekly.label(), "Due in 2 day(s)");

        let dosing = compute_status(store.task("t2").unwrap(), &now);
        assert_eq!(dosing.due_date, NaiveDate::from_ymd_opt(2024, 7, 21).unwrap());
        assert_eq!(dosing.label(), "Due in 1 day(s)");

        let filter = compute_status(store.task("t3").unwrap(), &at(2024, 8, 1, 9));
        assert_eq!(filter.severity, Severity::Overdue);
        assert_eq!(filter.label(), "Overdue by 2 day(s)");
    }

    #[test]
    fn test_completing_recurring_task_restarts_interval() {
        let mut store = seeded();
        let done_at = at(2024, 7, 20, 9);

        let completion = store.complete_task("t1", done_at).unwrap();
        let Completion::Rescheduled(task) = completion else {
            panic!("expected the weekly task to be rescheduled, got {:?}", completion);
        };

        assert_eq!(task.schedule, TaskSchedule::recurring(done_at, 7));
        assert_eq!(task.schedule.due_at(), at(2024, 7, 27, 9));
        assert_eq!(store.task("t1"), Some(&task));
        assert!(store.storage().raw("tasks").unwrap().contains("\"lastCompleted\":\"2024-07-20T09:00:00Z\""));
    }

    #[test]
    fn test_completing_one_off_task_removes_it() {
        let mut store = seeded();

        let completion = store.complete_task("t3", at(2024, 7, 30, 18)).unwrap();
        assert!(matches!(completion, Completion::Removed(ref task) if task.name == "Clean filter"));
        assert!(store.task("t3").is_none());
        assert_eq!(store.tasks().len(), 2);

        let reopened = AquariumStore::open(store.storage().clone(), true);
        assert!(reopened.task("t3").is_none());
    }

    #[test]
    fn test_completing_unknown_task_is_a_no_op() {
        let mut store = seeded();
        let before = store.storage().raw("tasks").unwrap().to_string();

        assert_eq!(store.complete_task("nope", at(2024, 7, 20, 9)).unwrap(), Completion::NotFound);
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.storage().raw("tasks").unwrap(), before);
    }

    #[test]
    fn test_upcoming_tasks_for_one_aquarium() {
        let mut store = AquariumStore::open(MemoryStorage::new(), false);
        let tank = store.add_aquarium(NewAquarium::new("Shrimp tank", 30.0, Unit::Litres, at(2024, 1, 1, 12))).unwrap().id;
        for day in (1..=7).rev() {
            store
                .add_task(NewTask::new(&tank, &format!("Task {}", day), TaskSchedule::one_off(at(2024, 8, day, 10))))
                .unwrap();
        }

        let upcoming = store.upcoming_tasks(&tank, &at(2024, 8, 3, 8), UPCOMING_LIMIT);
        let names: Vec<&str> = upcoming.iter().map(|entry| entry.task.name.as_str()).collect();
        assert_eq!(names, vec!["Task 1", "Task 2", "Task 3", "Task 4", "Task 5"]);
        assert_eq!(upcoming[0].status.severity, Severity::Overdue);
        assert_eq!(upcoming[2].status.severity, Severity::DueToday);
        assert_eq!(upcoming[4].status.severity, Severity::Upcoming);
    }
}
