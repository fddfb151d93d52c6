//! Recurrence interpretation and period math.
//!
//! # Responsibility
//! - Parse the supported RRULE subset into structured patterns.
//! - Compute the half-open period window containing a reference instant.
//!
//! # Invariants
//! - Rule parsing is total; only period math may reject unsupported rules.
//! - All period boundaries are UTC, locale-independent.

pub mod period;
pub mod rule;
