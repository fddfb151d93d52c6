//! Completion gating for period-based task semantics.
//!
//! # Responsibility
//! - Decide whether a new completion is allowed at a reference instant.
//! - Select counted in-period executions for owner-triggered invalidation.
//!
//! # Invariants
//! - A regular task holds at most one counted execution per period.
//! - Invalidation clears counted flags through the caller; executions are
//!   never deleted here.
//! - Already-uncounted executions are never re-selected.

use crate::model::task::{ExecutionId, HouseholdTask, TaskExecution, TaskId, TaskKind};
use crate::recurrence::period::{current_period, PeriodError};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from completion-gate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionError {
    /// Period invalidation only applies to regular tasks.
    NotRegularTask(TaskId),
    /// Task recurrence has no recognized base frequency.
    UnsupportedRecurrence(TaskId),
    /// No counted execution falls inside the current period.
    NothingToInvalidate(TaskId),
}

impl Display for CompletionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegularTask(task_uuid) => {
                write!(f, "task is not a regular task: {task_uuid}")
            }
            Self::UnsupportedRecurrence(task_uuid) => write!(
                f,
                "task recurrence has no recognized frequency: {task_uuid}"
            ),
            Self::NothingToInvalidate(task_uuid) => write!(
                f,
                "no counted execution in current period: {task_uuid}"
            ),
        }
    }
}

impl Error for CompletionError {}

impl From<PeriodError> for CompletionError {
    fn from(value: PeriodError) -> Self {
        match value {
            PeriodError::UnsupportedRecurrence(task_uuid) => {
                Self::UnsupportedRecurrence(task_uuid)
            }
        }
    }
}

/// Outcome of a completion check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionDecision {
    /// Whether a new completion may be recorded now.
    pub allowed: bool,
    /// Whether the task collaborator must deactivate the task once the
    /// completion is recorded. True only for one-time tasks.
    pub deactivate_on_completion: bool,
}

/// Decides whether the task can be completed at `now`.
///
/// One-time tasks are completable while active, and completing one is
/// terminal. Regular tasks are blocked while a counted execution sits
/// inside the current period; a regular task whose rule has no recognized
/// frequency has no period to gate on and stays completable.
pub fn check_completion(
    task: &HouseholdTask,
    history: &[TaskExecution],
    now: DateTime<Utc>,
) -> CompletionDecision {
    match task.kind {
        TaskKind::OneTime => CompletionDecision {
            allowed: task.is_active,
            deactivate_on_completion: true,
        },
        TaskKind::Regular => {
            let allowed = match current_period(task, now) {
                Ok(period) => !history.iter().any(|execution| {
                    execution.is_counted_for_completion
                        && period.contains(execution.completed_at)
                }),
                Err(PeriodError::UnsupportedRecurrence(_)) => true,
            };
            CompletionDecision {
                allowed,
                deactivate_on_completion: false,
            }
        }
    }
}

/// Selects every counted in-period execution for the caller to uncount.
///
/// Returns the execution IDs whose counted flag must be cleared. Repeating
/// the call after the caller has cleared them fails with
/// `NothingToInvalidate`, never double-uncounts.
///
/// # Errors
/// - `NotRegularTask` when the task is not `TaskKind::Regular`.
/// - `UnsupportedRecurrence` when the task's rule has no recognized
///   frequency.
/// - `NothingToInvalidate` when no counted execution is in the current
///   period.
pub fn invalidate_current_period(
    task: &HouseholdTask,
    history: &[TaskExecution],
    now: DateTime<Utc>,
) -> Result<BTreeSet<ExecutionId>, CompletionError> {
    if task.kind != TaskKind::Regular {
        return Err(CompletionError::NotRegularTask(task.uuid));
    }

    let period = current_period(task, now)?;
    let selected: BTreeSet<ExecutionId> = history
        .iter()
        .filter(|execution| {
            execution.is_counted_for_completion && period.contains(execution.completed_at)
        })
        .map(|execution| execution.uuid)
        .collect();

    if selected.is_empty() {
        return Err(CompletionError::NothingToInvalidate(task.uuid));
    }

    debug!(
        "event=period_invalidated module=completion status=ok task={} selected={}",
        task.uuid,
        selected.len()
    );
    Ok(selected)
}
