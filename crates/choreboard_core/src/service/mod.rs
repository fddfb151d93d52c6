//! Core use-case services.
//!
//! # Responsibility
//! - Gate task completion against the current recurrence period.
//! - Balance auto-assignable tasks across household members.
//!
//! # Invariants
//! - Services are pure over caller-supplied snapshots; persisting results
//!   belongs to collaborators.

pub mod assignment_service;
pub mod completion_service;
