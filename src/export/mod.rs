//! Calendar export of a derived schedule.
//!
//! A fixed set of six events (three meals, the wind-down block, and the two
//! peak hours) is built from a [`DerivedSchedule`] and written as an
//! iCalendar file named `schedule-YYYY-MM-DD.ics`.

pub mod ics;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, DurationRound, NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::schedule::DerivedSchedule;

pub use ics::render_ics;


/// How an event ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventEnd {
    /// Fixed length from the start, in minutes.
    Minutes(i64),
    /// Explicit end instant.
    Until(DateTime<Utc>),
}

/// A display reminder before the event starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alarm {
    pub minutes_before: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: EventEnd,
    pub alarm: Option<Alarm>,
}

impl CalendarEvent {
    /// Event with its start truncated to the minute.
    fn new(title: &str, start: DateTime<Utc>, end: EventEnd) -> Self {
        Self {
            title: title.to_string(),
            start: truncate_to_minute(start),
            end: match end {
                EventEnd::Until(t) => EventEnd::Until(truncate_to_minute(t)),
                other => other,
            },
            alarm: None,
        }
    }

    fn with_alarm(mut self, minutes_before: i64, description: Option<&str>) -> Self {
        self.alarm = Some(Alarm {
            minutes_before,
            description: description.map(str::to_string),
        });
        self
    }

    /// Instant the event ends.
    pub fn end_time(&self) -> DateTime<Utc> {
        match self.end {
            EventEnd::Minutes(m) => self.start + Duration::minutes(m),
            EventEnd::Until(t) => t,
        }
    }
}

fn truncate_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    t.duration_trunc(Duration::minutes(1)).unwrap_or(t)
}

/// The calendar events for one schedule, in a fixed order.
pub fn calendar_events(schedule: &DerivedSchedule) -> Vec<CalendarEvent> {
    let meal = EventEnd::Minutes(MEAL_EVENT_MINUTES);
    let lunch = EventEnd::Minutes(LUNCH_EVENT_MINUTES);
    let peak = EventEnd::Minutes(PEAK_HOUR_MINUTES);
    let half_peak = Duration::minutes(PEAK_HOUR_MINUTES / 2);

    vec![
        CalendarEvent::new("Breakfast", schedule.breakfast_time, meal),
        CalendarEvent::new("Lunch", schedule.lunch_time, lunch)
            .with_alarm(MEAL_REMINDER_MINUTES, None),
        CalendarEvent::new("Dinner", schedule.dinner_time, meal)
            .with_alarm(MEAL_REMINDER_MINUTES, Some(DINNER_REMINDER_TEXT)),
        CalendarEvent::new(
            "Wind Down",
            schedule.wind_down_time,
            EventEnd::Until(schedule.sleep_start_time),
        ),
        // Peak hours are centred on the peak
        CalendarEvent::new(
            "Morning peak hour",
            schedule.morning_peak - half_peak,
            peak,
        ),
        CalendarEvent::new(
            "Afternoon peak hour",
            schedule.afternoon_peak - half_peak,
            peak,
        ),
    ]
}

/// File name for the schedule of `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("schedule-{}.ics", date.format("%Y-%m-%d"))
}

/// Render `events` and write them to `dir/schedule-YYYY-MM-DD.ics`.
///
/// The directory is created when missing and an existing file for the same
/// date is replaced.
pub fn write_ics(
    dir: &Path,
    date: NaiveDate,
    events: &[CalendarEvent],
    stamp: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(date));
    fs::write(&path, render_ics(events, stamp))
        .with_context(|| format!("Failed to write calendar to {}", path.display()))?;

    Ok(path)
}
