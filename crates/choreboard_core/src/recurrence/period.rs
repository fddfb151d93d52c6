//! Current-period window computation.
//!
//! # Responsibility
//! - Bound the half-open `[start, end)` window containing a reference
//!   instant for each supported frequency.
//!
//! # Invariants
//! - All boundaries are UTC midnights; weeks start Monday 00:00 UTC
//!   regardless of locale.
//! - `period_for` is pure and side-effect free; it never reads persisted
//!   state.

use crate::model::task::{HouseholdTask, TaskId};
use crate::recurrence::rule::Frequency;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Half-open time window `[start, end)` bounding one recurrence period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// Returns whether the instant falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Period computation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodError {
    /// Task recurrence has no recognized base frequency. Only regular
    /// tasks with a recognized frequency support period-based gating.
    UnsupportedRecurrence(TaskId),
}

impl Display for PeriodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedRecurrence(task_uuid) => write!(
                f,
                "task recurrence has no recognized frequency: {task_uuid}"
            ),
        }
    }
}

impl Error for PeriodError {}

/// Computes the period window containing `now` for a frequency.
pub fn period_for(frequency: Frequency, now: DateTime<Utc>) -> Period {
    let today = now.date_naive();
    match frequency {
        Frequency::Daily => {
            let start = start_of_day(today);
            Period {
                start,
                end: start + Duration::days(1),
            }
        }
        Frequency::Weekly => {
            let monday =
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
            let start = start_of_day(monday);
            Period {
                start,
                end: start + Duration::weeks(1),
            }
        }
        Frequency::Monthly => {
            let (next_year, next_month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            Period {
                start: start_of_day(first_of_month(today.year(), today.month())),
                end: start_of_day(first_of_month(next_year, next_month)),
            }
        }
        Frequency::Yearly => Period {
            start: start_of_day(first_of_month(today.year(), 1)),
            end: start_of_day(first_of_month(today.year() + 1, 1)),
        },
    }
}

/// Computes the task's current period from its own recurrence rule.
///
/// # Errors
/// - `UnsupportedRecurrence` when the task's rule has no recognized base
///   frequency.
pub fn current_period(task: &HouseholdTask, now: DateTime<Utc>) -> Result<Period, PeriodError> {
    match task.recurrence_pattern().frequency() {
        Some(frequency) => Ok(period_for(frequency, now)),
        None => Err(PeriodError::UnsupportedRecurrence(task.uuid)),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 exists in every month")
}
