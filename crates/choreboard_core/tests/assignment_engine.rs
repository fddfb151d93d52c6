use choreboard_core::{
    auto_assign_all, build_load_ledger, plan_assignments, preview_auto_assign, reassign_to_next,
    suggest_assignee, Household, HouseholdMember, HouseholdTask, TaskKind, UserId,
};
use std::collections::BTreeMap;
use uuid::Uuid;

#[test]
fn ledger_counts_active_assigned_tasks_per_member() {
    let (alice, bob) = (user(1), user(2));
    let members = vec![member(alice, "Alice"), member(bob, "Bob")];

    let mut chores = vec![
        assigned_weekly_task("vacuum", alice),
        assigned_weekly_task("dishes", alice),
        assigned_weekly_task("laundry", bob),
    ];
    let mut inactive = assigned_weekly_task("old chore", bob);
    inactive.deactivate();
    chores.push(inactive);
    chores.push(weekly_task("unassigned"));

    let ledger = build_load_ledger(&members, &chores);

    assert_eq!(ledger[&alice], 2);
    assert_eq!(ledger[&bob], 1);
}

#[test]
fn ledger_ignores_assignments_outside_the_member_list() {
    let alice = user(1);
    let members = vec![member(alice, "Alice")];
    let chores = vec![assigned_weekly_task("ghost chore", user(9))];

    let ledger = build_load_ledger(&members, &chores);

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[&alice], 0);
}

#[test]
fn suggest_assignee_picks_the_lowest_load() {
    let (alice, bob, carol) = (user(1), user(2), user(3));
    let members = vec![
        member(alice, "Alice"),
        member(bob, "Bob"),
        member(carol, "Carol"),
    ];
    let ledger = ledger_of(&[(alice, 2), (bob, 0), (carol, 1)]);

    assert_eq!(suggest_assignee(&members, &ledger), Some(bob));
}

#[test]
fn suggest_assignee_breaks_ties_by_ascending_user_id() {
    let (alice, bob, carol) = (user(1), user(2), user(3));
    let members = vec![
        member(carol, "Carol"),
        member(bob, "Bob"),
        member(alice, "Alice"),
    ];
    let ledger = ledger_of(&[(alice, 1), (bob, 1), (carol, 1)]);

    // Member list order does not matter; the lowest user ID wins the tie.
    assert_eq!(suggest_assignee(&members, &ledger), Some(alice));
}

#[test]
fn suggest_assignee_with_no_members_returns_none() {
    assert_eq!(suggest_assignee(&[], &BTreeMap::new()), None);
}

#[test]
fn auto_assign_balances_load_across_the_whole_batch() {
    let (alice, bob, carol) = (user(1), user(2), user(3));
    let mut household = Household::new("Maple Street");
    household.members = vec![
        member(alice, "Alice"),
        member(bob, "Bob"),
        member(carol, "Carol"),
    ];
    household.tasks = vec![
        assigned_weekly_task("vacuum", alice),
        assigned_weekly_task("dishes", alice),
        assigned_weekly_task("laundry", carol),
        weekly_task("mop hallway"),
        weekly_task("clean windows"),
    ];

    let assignments = auto_assign_all(&household);

    // Bob starts at zero load and takes the first task; the second pick
    // ties Bob and Carol at one, and the lower user ID wins.
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[&household.tasks[3].uuid], bob);
    assert_eq!(assignments[&household.tasks[4].uuid], bob);
}

#[test]
fn auto_assign_with_no_members_is_a_silent_no_op() {
    let mut household = Household::new("Empty Nest");
    household.tasks = vec![weekly_task("mop hallway")];

    assert!(auto_assign_all(&household).is_empty());
    assert!(preview_auto_assign(&household).is_empty());
}

#[test]
fn auto_assign_leaves_assigned_tasks_untouched() {
    let (alice, bob) = (user(1), user(2));
    let mut household = Household::new("Maple Street");
    household.members = vec![member(alice, "Alice"), member(bob, "Bob")];
    household.tasks = vec![
        assigned_weekly_task("vacuum", alice),
        weekly_task("clean windows"),
    ];

    let assignments = auto_assign_all(&household);

    assert!(!assignments.contains_key(&household.tasks[0].uuid));
    assert_eq!(assignments[&household.tasks[1].uuid], bob);
}

#[test]
fn auto_assign_skips_ineligible_tasks() {
    let alice = user(1);
    let mut household = Household::new("Maple Street");
    household.members = vec![member(alice, "Alice")];

    let mut daily = HouseholdTask::new(TaskKind::Regular, "dishes");
    daily.recurrence_rule = Some("FREQ=DAILY".to_string());
    let mut inactive = weekly_task("retired chore");
    inactive.deactivate();
    let one_time = HouseholdTask::new(TaskKind::OneTime, "fix the fence");
    let eligible = weekly_task("vacuum");

    household.tasks = vec![daily, inactive, one_time, eligible.clone()];

    let assignments = auto_assign_all(&household);

    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[&eligible.uuid], alice);
}

#[test]
fn preview_matches_auto_assign_and_mutates_nothing() {
    let (alice, bob) = (user(1), user(2));
    let mut household = Household::new("Maple Street");
    household.members = vec![member(alice, "Alice"), member(bob, "Bob")];
    household.tasks = vec![
        weekly_task("vacuum"),
        weekly_task("dishes"),
        weekly_task("laundry"),
    ];
    let snapshot = household.clone();

    let proposals = preview_auto_assign(&household);
    let applied = auto_assign_all(&household);

    assert_eq!(household, snapshot);
    assert_eq!(proposals.len(), 3);
    assert_eq!(proposals.into_iter().collect::<BTreeMap<_, _>>(), applied);
}

#[test]
fn plan_keeps_task_list_order() {
    let alice = user(1);
    let mut household = Household::new("Maple Street");
    household.members = vec![member(alice, "Alice")];
    household.tasks = vec![weekly_task("first"), weekly_task("second")];

    let plan = plan_assignments(&household);

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].0, household.tasks[0].uuid);
    assert_eq!(plan[1].0, household.tasks[1].uuid);
}

#[test]
fn reassign_excludes_the_current_assignee() {
    let (alice, bob) = (user(1), user(2));
    let members = vec![member(alice, "Alice"), member(bob, "Bob")];
    let task = assigned_weekly_task("vacuum", alice);
    // Alice carries less load, but she is excluded for this rotation.
    let ledger = ledger_of(&[(alice, 0), (bob, 3)]);

    assert_eq!(reassign_to_next(&task, &members, &ledger), Some(bob));
}

#[test]
fn reassign_with_no_other_member_returns_none() {
    let alice = user(1);
    let members = vec![member(alice, "Alice")];
    let task = assigned_weekly_task("vacuum", alice);
    let ledger = ledger_of(&[(alice, 1)]);

    assert_eq!(reassign_to_next(&task, &members, &ledger), None);
}

#[test]
fn greedy_assignment_never_creates_avoidable_imbalance() {
    let (alice, bob, carol) = (user(1), user(2), user(3));
    let mut household = Household::new("Maple Street");
    household.members = vec![
        member(alice, "Alice"),
        member(bob, "Bob"),
        member(carol, "Carol"),
    ];
    household.tasks = (0..7).map(|i| weekly_task(&format!("chore {i}"))).collect();

    let assignments = auto_assign_all(&household);
    let mut counts: BTreeMap<UserId, u32> = BTreeMap::new();
    for user_uuid in assignments.values() {
        *counts.entry(*user_uuid).or_insert(0) += 1;
    }

    let max = counts.values().max().copied().unwrap();
    let min = counts.values().min().copied().unwrap();
    assert_eq!(assignments.len(), 7);
    assert_eq!(counts.len(), 3);
    assert!(max - min <= 1, "counts should stay balanced: {counts:?}");
}

fn user(n: u128) -> UserId {
    Uuid::from_u128(n)
}

fn member(user_uuid: UserId, name: &str) -> HouseholdMember {
    HouseholdMember::new(user_uuid, name)
}

fn weekly_task(title: &str) -> HouseholdTask {
    let mut task = HouseholdTask::new(TaskKind::Regular, title);
    task.recurrence_rule = Some("FREQ=WEEKLY;BYDAY=MO,TH".to_string());
    task
}

fn assigned_weekly_task(title: &str, user_uuid: UserId) -> HouseholdTask {
    let mut task = weekly_task(title);
    task.assigned_user = Some(user_uuid);
    task
}

fn ledger_of(entries: &[(UserId, u32)]) -> BTreeMap<UserId, u32> {
    entries.iter().copied().collect()
}
