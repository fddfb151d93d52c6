//! Recurrence rule interpretation.
//!
//! # Responsibility
//! - Parse the supported RRULE subset into structured recurrence patterns.
//! - Build canonical weekly rule text for persistence.
//! - Group auto-assignable tasks by their scheduled weekdays.
//!
//! # Invariants
//! - Parsing is total: malformed text degrades to `Unsupported`, never
//!   panics or errors.
//! - The canonical weekday order is Sunday=0 through Saturday=6 and is
//!   round-tripped through rule text unchanged.

use crate::model::task::HouseholdTask;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

// Supported grammar: FREQ=<base>[;BYDAY=<two-letter code list>].
static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^FREQ=(DAILY|WEEKLY|MONTHLY|YEARLY)(?:;BYDAY=([A-Z]{2}(?:,[A-Z]{2})*))?$")
        .expect("valid recurrence rule regex")
});

/// Weekday in the canonical Sunday-first order used by rule text.
///
/// The numeric order Sunday=0 .. Saturday=6 matches the BYDAY code order
/// SU,MO,TU,WE,TH,FR,SA. Persisted rules round-trip through this mapping,
/// so it must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Canonical index, Sunday=0 through Saturday=6.
    pub fn index(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Resolves a canonical index back to a weekday.
    pub fn from_index(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Two-letter BYDAY code for this weekday.
    pub fn byday_code(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Resolves a BYDAY code to a weekday.
    pub fn from_byday_code(code: &str) -> Option<Self> {
        match code {
            "SU" => Some(Self::Sunday),
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            _ => None,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sunday => Self::Sun,
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.byday_code())
    }
}

/// Base recurrence frequency recognized by period math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Structured recurrence derived from raw rule text.
///
/// Derived, never persisted: recomputed from the task's rule text on every
/// access. The weekday set is populated only for weekly rules with a BYDAY
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    Weekly { weekdays: BTreeSet<Weekday> },
    Monthly,
    Yearly,
    /// Sentinel for malformed or out-of-subset rule text. Predicates on an
    /// unsupported pattern answer false/empty instead of failing.
    Unsupported,
}

impl RecurrencePattern {
    /// Base frequency, when the pattern is recognized.
    pub fn frequency(&self) -> Option<Frequency> {
        match self {
            Self::Daily => Some(Frequency::Daily),
            Self::Weekly { .. } => Some(Frequency::Weekly),
            Self::Monthly => Some(Frequency::Monthly),
            Self::Yearly => Some(Frequency::Yearly),
            Self::Unsupported => None,
        }
    }

    /// Returns whether the pattern is weekly.
    pub fn is_weekly(&self) -> bool {
        matches!(self, Self::Weekly { .. })
    }

    /// BYDAY weekday set for weekly patterns; empty otherwise.
    pub fn weekdays(&self) -> BTreeSet<Weekday> {
        match self {
            Self::Weekly { weekdays } => weekdays.clone(),
            _ => BTreeSet::new(),
        }
    }

    /// Returns whether the pattern is eligible for fair auto-assignment:
    /// weekly with a non-empty weekday set.
    pub fn is_auto_assignable(&self) -> bool {
        matches!(self, Self::Weekly { weekdays } if !weekdays.is_empty())
    }
}

/// Rule construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleBuildError {
    /// Building a weekly rule requires at least one weekday.
    EmptyWeekdaySet,
}

impl Display for RuleBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWeekdaySet => {
                write!(f, "weekly rule requires a non-empty weekday set")
            }
        }
    }
}

impl Error for RuleBuildError {}

/// Parses rule text into a structured pattern.
///
/// Total and tolerant: input is trimmed and uppercased before matching, and
/// anything outside the supported subset yields
/// `RecurrencePattern::Unsupported`. A BYDAY clause on a non-weekly
/// frequency is ignored; an unknown BYDAY code on a weekly rule makes the
/// whole rule unsupported.
pub fn parse_rule(text: &str) -> RecurrencePattern {
    let normalized = text.trim().to_ascii_uppercase();
    let Some(caps) = RULE_RE.captures(&normalized) else {
        return RecurrencePattern::Unsupported;
    };

    let frequency = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    match frequency {
        "DAILY" => RecurrencePattern::Daily,
        "WEEKLY" => {
            let mut weekdays = BTreeSet::new();
            if let Some(list) = caps.get(2) {
                for code in list.as_str().split(',') {
                    match Weekday::from_byday_code(code) {
                        Some(day) => {
                            weekdays.insert(day);
                        }
                        None => return RecurrencePattern::Unsupported,
                    }
                }
            }
            RecurrencePattern::Weekly { weekdays }
        }
        "MONTHLY" => RecurrencePattern::Monthly,
        "YEARLY" => RecurrencePattern::Yearly,
        _ => RecurrencePattern::Unsupported,
    }
}

/// Returns whether rule text describes a weekly recurrence.
pub fn is_weekly(text: &str) -> bool {
    parse_rule(text).is_weekly()
}

/// BYDAY weekday set of weekly rule text; empty for everything else.
pub fn weekdays_of(text: &str) -> BTreeSet<Weekday> {
    parse_rule(text).weekdays()
}

/// Returns whether rule text schedules the task on the given weekday.
pub fn occurs_on(text: &str, day: Weekday) -> bool {
    weekdays_of(text).contains(&day)
}

/// Returns whether rule text is eligible for fair auto-assignment.
pub fn is_auto_assignable(text: &str) -> bool {
    parse_rule(text).is_auto_assignable()
}

/// Builds canonical weekly rule text for a single weekday.
pub fn weekly_rule(day: Weekday) -> String {
    format!("FREQ=WEEKLY;BYDAY={}", day.byday_code())
}

/// Builds canonical weekly rule text from weekdays in the order supplied.
///
/// Duplicate days keep their first occurrence.
///
/// # Errors
/// - `EmptyWeekdaySet` when `days` is empty; an invalid rule is never
///   silently produced.
pub fn weekly_rule_from_days(days: &[Weekday]) -> Result<String, RuleBuildError> {
    if days.is_empty() {
        return Err(RuleBuildError::EmptyWeekdaySet);
    }

    let mut seen = BTreeSet::new();
    let mut codes = Vec::new();
    for day in days {
        if seen.insert(*day) {
            codes.push(day.byday_code());
        }
    }

    Ok(format!("FREQ=WEEKLY;BYDAY={}", codes.join(",")))
}

/// Groups auto-assignable tasks by their scheduled weekdays.
///
/// A task scheduled for several weekdays appears once in each of those
/// groups. Tasks that are not auto-assignable are silently excluded.
pub fn group_tasks_by_weekday(
    tasks: &[HouseholdTask],
) -> BTreeMap<Weekday, Vec<HouseholdTask>> {
    let mut groups: BTreeMap<Weekday, Vec<HouseholdTask>> = BTreeMap::new();
    for task in tasks {
        let pattern = task.recurrence_pattern();
        if !pattern.is_auto_assignable() {
            continue;
        }
        for day in pattern.weekdays() {
            groups.entry(day).or_default().push(task.clone());
        }
    }
    groups
}
