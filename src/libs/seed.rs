//! Example data for a journal that has never been saved.

use super::aquarium::{Aquarium, Lighting, NewAquarium, Unit};
use super::record::Record;
use super::task::{NewTask, Task, TaskSchedule};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap_or_default()
}

fn clock(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default()
}

pub fn default_aquariums() -> Vec<Aquarium> {
    let reef = NewAquarium::new("Living Room Reef", 55.0, Unit::GallonsUs, utc(2023, 1, 15, 12)).with_lighting(Lighting {
        brand: "Kessil A360X".to_string(),
        on_time: clock(10),
        off_time: clock(20),
    });
    let betta = NewAquarium::new("Betta's Paradise", 20.0, Unit::Litres, utc(2023, 8, 20, 12)).with_co2("Pressurized, 1 bubble/sec");

    vec![Aquarium::from_new("aq1".to_string(), reef), Aquarium::from_new("aq2".to_string(), betta)]
}

pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::from_new(
            "t1".to_string(),
            NewTask::new("aq1", "Weekly Water Change (25%)", TaskSchedule::recurring(utc(2024, 7, 15, 10), 7)),
        ),
        Task::from_new(
            "t2".to_string(),
            NewTask::new("aq1", "Dose All-in-One Fertilizer", TaskSchedule::recurring(utc(2024, 7, 18, 10), 3)),
        ),
        Task::from_new("t3".to_string(), NewTask::new("aq2", "Clean filter", TaskSchedule::one_off(utc(2024, 7, 30, 11)))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_records_are_valid_and_linked() {
        let aquariums = default_aquariums();
        let tasks = default_tasks();

        assert!(aquariums.iter().all(|aquarium| aquarium.validate().is_ok()));
        assert!(tasks.iter().all(|task| task.validate().is_ok()));
        assert!(tasks.iter().all(|task| aquariums.iter().any(|aquarium| aquarium.id == task.aquarium_id)));
    }
}
