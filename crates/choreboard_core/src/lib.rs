//! Core scheduling logic for Choreboard.
//! This crate is the single source of truth for recurrence and fairness
//! invariants.

pub mod logging;
pub mod model;
pub mod recurrence;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::household::{Household, HouseholdId, HouseholdMember};
pub use model::task::{
    ExecutionId, HouseholdTask, TaskExecution, TaskId, TaskKind, TaskValidationError, UserId,
};
pub use recurrence::period::{current_period, period_for, Period, PeriodError};
pub use recurrence::rule::{
    group_tasks_by_weekday, is_auto_assignable, is_weekly, occurs_on, parse_rule, weekdays_of,
    weekly_rule, weekly_rule_from_days, Frequency, RecurrencePattern, RuleBuildError, Weekday,
};
pub use service::assignment_service::{
    auto_assign_all, build_load_ledger, plan_assignments, preview_auto_assign, reassign_to_next,
    suggest_assignee, LoadLedger,
};
pub use service::completion_service::{
    check_completion, invalidate_current_period, CompletionDecision, CompletionError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
