//! Ordered constraints on the night's sleep window.
//!
//! The window starts as "wake at tomorrow's civil dawn, sleep the required
//! duration before it" and is then passed through a fixed list of
//! constraints. Each constraint moves the window as a whole, keeping its
//! duration, and later constraints may undo earlier ones. The list of
//! constraints that actually fired is kept so the outcome can be audited.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// The night between today's sleep start and tomorrow's wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SleepWindow {
    pub sleep_start: DateTime<Utc>,
    pub next_wake_up: DateTime<Utc>,
}

impl SleepWindow {
    /// Window of length `required` that ends at `next_wake_up`.
    pub fn ending_at(next_wake_up: DateTime<Utc>, required: Duration) -> Self {
        Self {
            sleep_start: next_wake_up - required,
            next_wake_up,
        }
    }

    /// Window of length `required` that begins at `sleep_start`.
    pub fn starting_at(sleep_start: DateTime<Utc>, required: Duration) -> Self {
        Self {
            sleep_start,
            next_wake_up: sleep_start + required,
        }
    }

    pub fn duration(&self) -> Duration {
        self.next_wake_up - self.sleep_start
    }
}

/// A single rule applied to the sleep window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "bound", rename_all = "snake_case")]
pub enum SleepConstraint {
    /// Sleep does not start before civil dusk.
    DuskFloor(DateTime<Utc>),
    /// Wake-up is no earlier than this instant.
    EarliestWake(DateTime<Utc>),
    /// Wake-up is no later than this instant.
    LatestWake(DateTime<Utc>),
}

impl SleepConstraint {
    /// Apply to `window`; `None` when the window already satisfies the rule.
    pub fn apply(&self, window: SleepWindow, required: Duration) -> Option<SleepWindow> {
        match *self {
            Self::DuskFloor(dusk) if window.sleep_start < dusk => {
                Some(SleepWindow::starting_at(dusk, required))
            }
            Self::EarliestWake(earliest) if window.next_wake_up < earliest => {
                Some(SleepWindow::ending_at(earliest, required))
            }
            Self::LatestWake(latest) if window.next_wake_up > latest => {
                Some(SleepWindow::ending_at(latest, required))
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DuskFloor(_) => "dusk floor",
            Self::EarliestWake(_) => "earliest wake-up",
            Self::LatestWake(_) => "latest wake-up",
        }
    }

    pub fn bound(&self) -> DateTime<Utc> {
        match *self {
            Self::DuskFloor(t) | Self::EarliestWake(t) | Self::LatestWake(t) => t,
        }
    }
}

/// The constraint list in its fixed order: dusk floor, earliest, latest.
pub fn sleep_constraints(
    dusk: DateTime<Utc>,
    earliest_wake: Option<DateTime<Utc>>,
    latest_wake: Option<DateTime<Utc>>,
) -> Vec<SleepConstraint> {
    let mut constraints = vec![SleepConstraint::DuskFloor(dusk)];
    constraints.extend(earliest_wake.map(SleepConstraint::EarliestWake));
    constraints.extend(latest_wake.map(SleepConstraint::LatestWake));
    constraints
}

/// Run `window` through `constraints` in order.
///
/// Returns the final window and the constraints that changed it.
pub fn apply_constraints(
    window: SleepWindow,
    constraints: &[SleepConstraint],
    required: Duration,
) -> (SleepWindow, Vec<SleepConstraint>) {
    constraints
        .iter()
        .fold((window, Vec::new()), |(current, mut applied), constraint| {
            match constraint.apply(current, required) {
                Some(adjusted) => {
                    applied.push(*constraint);
                    (adjusted, applied)
                }
                None => (current, applied),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, minute, 0).unwrap()
    }

    fn eight_hours() -> Duration {
        Duration::hours(8)
    }

    #[test]
    fn test_dusk_floor_shifts_window_later() {
        let window = SleepWindow::ending_at(at(11, 4, 0), eight_hours());
        let adjusted = SleepConstraint::DuskFloor(at(10, 21, 0))
            .apply(window, eight_hours())
            .unwrap();
        assert_eq!(adjusted.sleep_start, at(10, 21, 0));
        assert_eq!(adjusted.next_wake_up, at(11, 5, 0));
        assert_eq!(adjusted.duration(), eight_hours());
    }

    #[test]
    fn test_satisfied_constraints_do_nothing() {
        let window = SleepWindow::ending_at(at(11, 6, 0), eight_hours());
        assert!(SleepConstraint::DuskFloor(at(10, 21, 0))
            .apply(window, eight_hours())
            .is_none());
        assert!(SleepConstraint::EarliestWake(at(11, 5, 0))
            .apply(window, eight_hours())
            .is_none());
        assert!(SleepConstraint::LatestWake(at(11, 7, 0))
            .apply(window, eight_hours())
            .is_none());
    }

    #[test]
    fn test_earliest_and_latest_snap_wake_up() {
        let window = SleepWindow::ending_at(at(11, 5, 0), eight_hours());

        let later = SleepConstraint::EarliestWake(at(11, 6, 30))
            .apply(window, eight_hours())
            .unwrap();
        assert_eq!(later, SleepWindow::ending_at(at(11, 6, 30), eight_hours()));

        let earlier = SleepConstraint::LatestWake(at(11, 4, 15))
            .apply(window, eight_hours())
            .unwrap();
        assert_eq!(earlier.next_wake_up, at(11, 4, 15));
        assert_eq!(earlier.sleep_start, at(10, 20, 15));
    }

    #[test]
    fn test_constraint_order_is_fixed() {
        let list = sleep_constraints(at(10, 21, 0), Some(at(11, 6, 0)), Some(at(11, 7, 0)));
        assert_eq!(
            list,
            vec![
                SleepConstraint::DuskFloor(at(10, 21, 0)),
                SleepConstraint::EarliestWake(at(11, 6, 0)),
                SleepConstraint::LatestWake(at(11, 7, 0)),
            ]
        );
        assert_eq!(sleep_constraints(at(10, 21, 0), None, None).len(), 1);
    }

    #[test]
    fn test_later_constraint_overrides_dusk_floor() {
        // Dusk pushes the wake-up to 05:00; the latest bound pulls it back to 04:30
        let window = SleepWindow::ending_at(at(11, 4, 0), eight_hours());
        let constraints = sleep_constraints(at(10, 21, 0), None, Some(at(11, 4, 30)));
        let (result, applied) = apply_constraints(window, &constraints, eight_hours());

        assert_eq!(result.next_wake_up, at(11, 4, 30));
        assert_eq!(result.sleep_start, at(10, 20, 30));
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].label(), "dusk floor");
        assert_eq!(applied[1].bound(), at(11, 4, 30));
    }

    #[test]
    fn test_no_constraint_fires() {
        let window = SleepWindow::ending_at(at(11, 6, 0), eight_hours());
        let constraints = sleep_constraints(at(10, 21, 0), Some(at(11, 5, 0)), None);
        let (result, applied) = apply_constraints(window, &constraints, eight_hours());
        assert_eq!(result, window);
        assert!(applied.is_empty());
    }
}
