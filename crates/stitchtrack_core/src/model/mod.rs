//! Domain model for tracked projects and their counters.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep counter transitions pure and free of persistence concerns.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Counter counts never go negative.

pub mod counter;
pub mod project;
pub mod theme;
