//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for project records and settings.
//! - Isolate SQLite query details from service/controller orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod project_repo;
pub mod settings_repo;
