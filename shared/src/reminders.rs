//! Local reminder schedules
//!
//! Reminders fire at a wall-clock time either every day or on one weekday.
//! Times are local and naive; converting to an instant is the notifier's job.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;

/// When a reminder repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum ReminderSchedule {
    Daily { hour: u32, minute: u32 },
    Weekly { weekday: Weekday, hour: u32, minute: u32 },
}

impl ReminderSchedule {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.time().map(|_| ())
    }

    fn time(&self) -> Result<NaiveTime, ScheduleError> {
        let (hour, minute) = match *self {
            ReminderSchedule::Daily { hour, minute } => (hour, minute),
            ReminderSchedule::Weekly { hour, minute, .. } => (hour, minute),
        };
        if hour > 23 {
            return Err(ScheduleError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(ScheduleError::InvalidMinute(minute));
        }
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or(ScheduleError::InvalidHour(hour))
    }

    /// First trigger strictly after `after`
    pub fn next_trigger(&self, after: NaiveDateTime) -> Result<NaiveDateTime, ScheduleError> {
        let time = self.time()?;
        let today = after.date();

        let next = match *self {
            ReminderSchedule::Daily { .. } => {
                let candidate = today.and_time(time);
                if candidate > after {
                    candidate
                } else {
                    candidate + Duration::days(1)
                }
            }
            ReminderSchedule::Weekly { weekday, .. } => {
                let target = weekday.num_days_from_monday() as i64;
                let current = today.weekday().num_days_from_monday() as i64;
                let days_ahead = (target - current).rem_euclid(7);
                let candidate = (today + Duration::days(days_ahead)).and_time(time);
                if candidate > after {
                    candidate
                } else {
                    candidate + Duration::days(7)
                }
            }
        };

        Ok(next)
    }
}

/// A persisted local reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub schedule: ReminderSchedule,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Reminder {
    pub fn new(
        title: impl Into<String>,
        body: Option<String>,
        schedule: ReminderSchedule,
    ) -> Result<Self, ScheduleError> {
        schedule.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body,
            schedule,
            enabled: true,
        })
    }

    /// Next trigger, or `None` while disabled
    pub fn next_trigger(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.enabled {
            return None;
        }
        self.schedule.next_trigger(after).ok()
    }
}
