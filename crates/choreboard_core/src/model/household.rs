//! Household and membership records.
//!
//! # Responsibility
//! - Carry the member and task snapshot consumed by batch assignment.
//!
//! # Invariants
//! - Member user IDs are unique within one household snapshot.

use crate::model::task::{HouseholdTask, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a household.
pub type HouseholdId = Uuid;

/// One member of a household, as reported by the membership collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    /// Stable user account ID.
    pub user_uuid: UserId,
    /// Display name shown in assignment reports.
    pub display_name: String,
}

impl HouseholdMember {
    pub fn new(user_uuid: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_uuid,
            display_name: display_name.into(),
        }
    }
}

/// Snapshot of one household's members and tasks.
///
/// Assembled by the calling collaborator per request; the core never
/// mutates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    /// Stable household ID.
    pub uuid: HouseholdId,
    /// Household display name.
    pub name: String,
    /// Current members, in join order.
    pub members: Vec<HouseholdMember>,
    /// Current tasks, in the collaborator's persistence order.
    pub tasks: Vec<HouseholdTask>,
}

impl Household {
    /// Creates an empty household snapshot with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
            tasks: Vec::new(),
        }
    }
}
