//! Fair distribution of auto-assignable tasks.
//!
//! # Responsibility
//! - Maintain the per-member load ledger for one assignment run.
//! - Assign and rotate tasks to the least-loaded member with a
//!   deterministic tie-break.
//!
//! # Invariants
//! - Ties are broken by ascending user ID, so repeated runs over the same
//!   snapshot produce identical results.
//! - The ledger is rebuilt per run and threaded through the batch loop;
//!   nothing shared is mutated.
//! - Zero eligible members is a silent no-op, not an error.

use crate::model::household::{Household, HouseholdMember};
use crate::model::task::{HouseholdTask, TaskId, UserId};
use log::debug;
use std::collections::BTreeMap;

/// Working count of active assigned tasks per member, for one run.
pub type LoadLedger = BTreeMap<UserId, u32>;

/// Builds the load ledger from the current member and task snapshot.
///
/// Every member starts at zero; each active task assigned to a known
/// member adds one. Assignments pointing outside the member list are
/// ignored.
pub fn build_load_ledger(members: &[HouseholdMember], tasks: &[HouseholdTask]) -> LoadLedger {
    let mut ledger: LoadLedger = members
        .iter()
        .map(|member| (member.user_uuid, 0))
        .collect();

    for task in tasks {
        if !task.is_active {
            continue;
        }
        if let Some(user_uuid) = task.assigned_user {
            if let Some(count) = ledger.get_mut(&user_uuid) {
                *count += 1;
            }
        }
    }

    ledger
}

/// Picks the least-loaded member; ties go to the ascending user ID.
///
/// Returns `None` when `members` is empty.
pub fn suggest_assignee(members: &[HouseholdMember], ledger: &LoadLedger) -> Option<UserId> {
    pick_least_loaded(members, ledger, None)
}

/// Picks the next member in rotation, excluding the task's current
/// assignee for this call only; otherwise identical to `suggest_assignee`.
///
/// Returns `None` when no other member remains.
pub fn reassign_to_next(
    task: &HouseholdTask,
    members: &[HouseholdMember],
    ledger: &LoadLedger,
) -> Option<UserId> {
    pick_least_loaded(members, ledger, task.assigned_user)
}

/// Plans assignments for every active, unassigned, auto-assignable task.
///
/// Walks the household task list in order, assigning each eligible task to
/// the currently least-loaded member and incrementing the ledger before the
/// next pick, so balance holds across the whole batch rather than against
/// the pre-run snapshot. Already-assigned tasks are left untouched. The
/// plan is returned for the caller to persist; no input is mutated.
pub fn plan_assignments(household: &Household) -> Vec<(TaskId, UserId)> {
    if household.members.is_empty() {
        return Vec::new();
    }

    let mut ledger = build_load_ledger(&household.members, &household.tasks);
    let mut plan = Vec::new();

    for task in &household.tasks {
        if !task.is_active || task.assigned_user.is_some() || !task.is_auto_assignable() {
            continue;
        }
        if let Some(user_uuid) = pick_least_loaded(&household.members, &ledger, None) {
            *ledger.entry(user_uuid).or_insert(0) += 1;
            plan.push((task.uuid, user_uuid));
        }
    }

    debug!(
        "event=auto_assign_planned module=assignment status=ok household={} assigned={}",
        household.uuid,
        plan.len()
    );
    plan
}

/// Assigns every eligible task, returning the full taskId → userId map for
/// the task-management collaborator to persist and report.
pub fn auto_assign_all(household: &Household) -> BTreeMap<TaskId, UserId> {
    plan_assignments(household).into_iter().collect()
}

/// Produces the proposals `auto_assign_all` would make, without any writes.
///
/// Runs the same planning function and returns the pairs as-is; there is no
/// separate code path to drift from the real assignment logic.
pub fn preview_auto_assign(household: &Household) -> Vec<(TaskId, UserId)> {
    plan_assignments(household)
}

fn pick_least_loaded(
    members: &[HouseholdMember],
    ledger: &LoadLedger,
    excluded: Option<UserId>,
) -> Option<UserId> {
    members
        .iter()
        .map(|member| member.user_uuid)
        .filter(|user_uuid| Some(*user_uuid) != excluded)
        .map(|user_uuid| (ledger.get(&user_uuid).copied().unwrap_or(0), user_uuid))
        .min()
        .map(|(_, user_uuid)| user_uuid)
}
