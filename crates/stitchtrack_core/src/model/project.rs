//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record for a tracked needlework item.
//! - Provide constructors with the default counter values new records carry.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `single`-type projects carry but ignore row fields.
//! - `updated_at` only moves forward; the store's save path enforces it.
//! - `image_paths` entries are unique and keep insertion order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every project record.
pub type ProjectId = Uuid;

/// Counter layout of a project, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// One stitch counter.
    Single,
    /// Stitch counter plus a row counter with an optional row cap.
    Double,
}

/// Canonical persisted record for one tracked project.
///
/// Counter fields mirror the transient `CounterState` pairs; controllers map
/// between the two on load and save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub title: String,
    pub stitch_count: i64,
    pub stitch_step: i64,
    pub row_count: i64,
    pub row_step: i64,
    /// Row cap for `Double` projects; 0 means uncapped.
    pub total_rows: i64,
    /// Absolute paths of attached image files, unique, insertion-ordered.
    pub image_paths: Vec<String>,
    /// Unix epoch milliseconds, immutable after creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped on every persisted write.
    pub updated_at: i64,
}

impl Project {
    /// Creates a record with default zero counters and a generated id.
    pub fn new(kind: ProjectType, now_ms: i64) -> Self {
        Self::with_id(Uuid::new_v4(), kind, now_ms)
    }

    /// Creates a record with a caller-provided id. Used by tests that need
    /// deterministic ordering.
    pub fn with_id(id: ProjectId, kind: ProjectType, now_ms: i64) -> Self {
        Self {
            id,
            kind,
            title: String::new(),
            stitch_count: 0,
            stitch_step: 1,
            row_count: 0,
            row_step: 1,
            total_rows: 0,
            image_paths: Vec::new(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}
