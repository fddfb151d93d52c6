//! Task and execution domain models.
//!
//! # Responsibility
//! - Define the canonical records shared by recurrence, gating, and
//!   assignment logic.
//! - Provide lifecycle helpers for activation and completion counting.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another task or execution.
//! - `OneTime` tasks never carry recurrence rule text.
//! - `is_counted_for_completion` starts true and is only ever cleared,
//!   never deleted with its execution.

use crate::recurrence::rule::{parse_rule, RecurrencePattern};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a household task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Stable identifier for a task completion record.
pub type ExecutionId = Uuid;

/// Stable identifier for a household member's user account.
pub type UserId = Uuid;

/// Scheduling category for household tasks.
///
/// Only `Regular` tasks participate in recurrence and period logic.
/// Completing a `OneTime` task is terminal; the task collaborator
/// deactivates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Recurring chore gated to one counted completion per period.
    Regular,
    /// Single-shot task deactivated by its first completion.
    OneTime,
}

/// Validation failures for task and execution records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Record uuid is the nil UUID.
    NilUuid,
    /// Task title is blank after trim.
    BlankTitle,
    /// One-time tasks must not carry recurrence rule text.
    OneTimeWithRecurrence(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "record uuid must not be nil"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::OneTimeWithRecurrence(task_uuid) => write!(
                f,
                "one-time task must not carry a recurrence rule: {task_uuid}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record handed in by the task-management collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdTask {
    /// Stable global ID used for assignment maps and reporting.
    pub uuid: TaskId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Human-readable chore title.
    pub title: String,
    /// Raw rule text in the supported RRULE subset; `None` when unscheduled.
    pub recurrence_rule: Option<String>,
    /// Inactive tasks are excluded from gating and assignment.
    pub is_active: bool,
    /// Current assignee, if any.
    pub assigned_user: Option<UserId>,
}

impl HouseholdTask {
    /// Creates a new active, unassigned task with a generated stable ID.
    pub fn new(kind: TaskKind, title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
            title: title.into(),
            recurrence_rule: None,
            is_active: true,
            assigned_user: None,
        }
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - Rejects the nil UUID; other field invariants are checked by
    ///   `validate()`.
    pub fn with_id(
        uuid: TaskId,
        kind: TaskKind,
        title: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        if uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            kind,
            title: title.into(),
            recurrence_rule: None,
            is_active: true,
            assigned_user: None,
        })
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `NilUuid` when the stable ID is nil.
    /// - `BlankTitle` when the title is empty after trim.
    /// - `OneTimeWithRecurrence` when a one-time task carries rule text.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.kind == TaskKind::OneTime && self.recurrence_rule.is_some() {
            return Err(TaskValidationError::OneTimeWithRecurrence(self.uuid));
        }
        Ok(())
    }

    /// Derives the structured recurrence pattern from raw rule text.
    ///
    /// Recomputed on every access; never cached or mutated.
    pub fn recurrence_pattern(&self) -> RecurrencePattern {
        match self.recurrence_rule.as_deref() {
            Some(text) => parse_rule(text),
            None => RecurrencePattern::Unsupported,
        }
    }

    /// Returns whether this task is eligible for fair auto-assignment.
    ///
    /// True iff the rule is weekly with a non-empty weekday set.
    pub fn is_auto_assignable(&self) -> bool {
        self.recurrence_pattern().is_auto_assignable()
    }

    /// Marks this task inactive.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Marks this task active again.
    pub fn activate(&mut self) {
        self.is_active = true;
    }
}

/// Completion record for one task execution.
///
/// Executions are never deleted by period invalidation; only the counted
/// flag is cleared. Deletion is a separate operation owned by the
/// execution-management collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExecution {
    /// Stable global ID of this completion record.
    pub uuid: ExecutionId,
    /// Task this execution completes.
    pub task_uuid: TaskId,
    /// Member who completed the task.
    pub user_uuid: UserId,
    /// Completion instant, UTC.
    pub completed_at: DateTime<Utc>,
    /// Whether this execution currently satisfies its period's
    /// completion requirement.
    pub is_counted_for_completion: bool,
}

impl TaskExecution {
    /// Creates a counted execution with a generated stable ID.
    pub fn new(task_uuid: TaskId, user_uuid: UserId, completed_at: DateTime<Utc>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            task_uuid,
            user_uuid,
            completed_at,
            is_counted_for_completion: true,
        }
    }

    /// Creates a counted execution with a caller-provided stable ID.
    ///
    /// # Errors
    /// - Rejects the nil UUID.
    pub fn with_id(
        uuid: ExecutionId,
        task_uuid: TaskId,
        user_uuid: UserId,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        if uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            task_uuid,
            user_uuid,
            completed_at,
            is_counted_for_completion: true,
        })
    }

    /// Clears the counted flag after a period invalidation.
    pub fn uncount(&mut self) {
        self.is_counted_for_completion = false;
    }
}
