//! Console output for a derived schedule.

use super::{DerivedSchedule, ScheduleConfig, SleepEstimate};
use crate::geo::format_in_tz;

/// Split fractional hours into whole hours and rounded minutes.
pub fn hours_and_minutes(hours: f64) -> (i64, i64) {
    let total_minutes = (hours * 60.0).round() as i64;
    (total_minutes.div_euclid(60), total_minutes.rem_euclid(60))
}

/// Log the full schedule in the configured timezone.
///
/// With `debug` set, the sleep-window adjustments and work-split fallbacks are
/// listed as well.
pub fn log_schedule(
    schedule: &DerivedSchedule,
    estimate: &SleepEstimate,
    config: &ScheduleConfig,
    debug: bool,
) {
    let tz = &config.time_zone;
    let fmt = |t| format_in_tz(t, tz);
    let (sleep_h, sleep_m) = hours_and_minutes(estimate.hours);

    log_block_start!("Sleep");
    log_indented!("Current wake-up time: {}", fmt(schedule.wake_up_time));
    if config.bad_sleep_minutes != 0.0 {
        log_indented!(
            "Bad sleep minutes compensation: {}",
            config.bad_sleep_minutes
        );
    }
    log_indented!("Required sleep today: {sleep_h} hours {sleep_m} minutes");
    log_indented!("Winding down time before sleep: {}", fmt(schedule.wind_down_time));
    log_indented!("Recommended sleep start time: {}", fmt(schedule.sleep_start_time));
    log_indented!("Recommended wake-up time: {}", fmt(schedule.next_wake_up_time));

    log_block_start!("Meals");
    log_indented!("Breakfast: {}", fmt(schedule.breakfast_time));
    log_indented!("Mid-morning snack: {}", fmt(schedule.mid_morning_snack_time));
    log_indented!("Lunch: {}", fmt(schedule.lunch_time));
    log_indented!("Afternoon snack: {}", fmt(schedule.afternoon_snack_time));
    log_indented!("Dinner: {}", fmt(schedule.dinner_time));

    log_block_start!("Peak times");
    log_indented!("Morning peak: {}", fmt(schedule.morning_peak));
    log_indented!("Power nap time: {}", fmt(schedule.power_nap_time));
    log_indented!("Afternoon peak: {}", fmt(schedule.afternoon_peak));

    log_block_start!("Working hours: {}", config.working_hours);
    log_indented!(
        "Most efficient morning work window: {} - {}",
        fmt(schedule.morning_work_start),
        fmt(schedule.morning_work_end)
    );
    log_indented!(
        "Most efficient afternoon work window: {} - {}",
        fmt(schedule.afternoon_work_start),
        fmt(schedule.afternoon_work_end)
    );

    if schedule.work_split.degenerate_span {
        log_pipe!();
        log_warning!("No time between wake-up and wind-down; working hours split evenly");
    }

    let dusk_overridden = schedule.adjustments.iter().any(|c| {
        matches!(c, super::SleepConstraint::DuskFloor(dusk) if schedule.sleep_start_time < *dusk)
    });
    if dusk_overridden {
        log_pipe!();
        log_warning!("Latest wake-up time moves sleep start before civil dusk");
    }

    if debug {
        log_pipe!();
        log_debug!(
            "Day length {:.2} h (normalized {:.3}){}",
            estimate.day_length_hours,
            estimate.normalized_day_length,
            if estimate.degenerate_day_length {
                ", solstice day lengths equal: using baseline sleep"
            } else {
                ""
            }
        );
        log_indented!(
            "Required sleep: {:.1} minutes",
            schedule.required_sleep_minutes
        );
        if schedule.adjustments.is_empty() {
            log_indented!("Sleep window: no constraint applied");
        }
        for constraint in &schedule.adjustments {
            log_indented!(
                "Sleep window moved by {} ({})",
                constraint.label(),
                fmt(constraint.bound())
            );
        }
        log_indented!(
            "Work split: {:.2} h morning, {:.2} h afternoon",
            schedule.work_split.morning_hours,
            schedule.work_split.afternoon_hours
        );
    }
}
