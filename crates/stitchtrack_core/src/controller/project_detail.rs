//! Project detail screen controller.
//!
//! # Responsibility
//! - Edit title, total-rows and image attachments with live validation and
//!   snapshot-based dirty tracking.
//! - Decide the dismissal outcome when the user navigates away.
//!
//! # Invariants
//! - `has_unsaved_changes` is true iff any tracked field differs from its
//!   snapshot taken at load (or at the last save).
//! - Only projects that already exist in the store are autosaved; a new
//!   record is persisted exclusively through `create_project`.
//! - An empty (after trimming) title can never be silently saved away.

use crate::controller::scheduler::AutosaveScheduler;
use crate::model::project::{ProjectId, ProjectType};
use crate::service::project_service::ProjectService;
use std::time::Instant;
use uuid::Uuid;

const TITLE_REQUIRED: &str = "Title is required";
const TOTAL_ROWS_POSITIVE: &str = "Total rows must be greater than 0";
const TOTAL_ROWS_REQUIRED: &str = "Total rows is required";
const TOTAL_ROWS_REQUIRED_POSITIVE: &str = "Total rows is required and must be greater than 0";

/// Outcome of the three-way dismissal protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalResult {
    /// Nothing to lose; leaving is fine.
    Allowed,
    /// Leaving is refused outright.
    Blocked,
    /// Unsaved or invalid data; ask the user before discarding.
    ShowDiscardDialog,
}

/// View-model for the project detail screen.
pub struct ProjectDetailController {
    /// Identifier of the bound store record; `None` while editing a new,
    /// not-yet-created project.
    pub project_id: Option<ProjectId>,
    pub project_type: ProjectType,
    pub title: String,
    /// Total rows as entered, kept as text so partial input survives edits.
    pub total_rows: String,
    pub image_paths: Vec<String>,
    pub has_unsaved_changes: bool,
    pub title_error: Option<String>,
    pub total_rows_error: Option<String>,
    pub dismissal_result: Option<DismissalResult>,
    /// Scope for image files of a new record before it has a store identity.
    image_scope_id: ProjectId,
    original_title: String,
    original_total_rows: String,
    original_image_paths: Vec<String>,
    scheduler: AutosaveScheduler,
}

impl ProjectDetailController {
    pub fn new() -> Self {
        Self {
            project_id: None,
            project_type: ProjectType::Single,
            title: String::new(),
            total_rows: String::new(),
            image_paths: Vec::new(),
            has_unsaved_changes: false,
            title_error: None,
            total_rows_error: None,
            dismissal_result: None,
            image_scope_id: Uuid::new_v4(),
            original_title: String::new(),
            original_total_rows: String::new(),
            original_image_paths: Vec::new(),
            scheduler: AutosaveScheduler::new(),
        }
    }

    /// Unified load entry point: binds to `id` when it resolves, otherwise
    /// starts a fresh record of `kind`.
    pub fn load(&mut self, id: Option<ProjectId>, kind: ProjectType, service: &ProjectService) {
        match id.and_then(|id| service.get_project(id)) {
            Some(project) => self.bind_existing(
                project.id,
                project.kind,
                &project.title,
                project.total_rows,
                project.image_paths,
            ),
            None => self.load_new(kind),
        }
    }

    /// Binds to an existing record by id. No-op when the id does not resolve,
    /// so a stale navigation target cannot wipe current edits.
    pub fn load_existing(&mut self, id: ProjectId, service: &ProjectService) {
        let Some(project) = service.get_project(id) else {
            return;
        };
        self.bind_existing(
            project.id,
            project.kind,
            &project.title,
            project.total_rows,
            project.image_paths,
        );
    }

    /// Starts editing a brand-new record with empty defaults.
    pub fn load_new(&mut self, kind: ProjectType) {
        self.project_id = None;
        self.image_scope_id = Uuid::new_v4();
        self.project_type = kind;
        self.title.clear();
        self.total_rows.clear();
        self.image_paths.clear();
        self.capture_snapshot();
        self.clear_transient_state();
    }

    /// Assigns the title, recomputes dirty state, validates, and schedules
    /// an autosave when the record already exists in the store.
    pub fn update_title(&mut self, new_title: &str, service: &ProjectService) {
        self.title = new_title.to_string();
        self.recompute_dirty();
        self.title_error = if self.title.trim().is_empty() {
            Some(TITLE_REQUIRED.to_string())
        } else {
            None
        };
        self.trigger_autosave(service);
    }

    /// Assigns the total-rows text, recomputes dirty state, validates the
    /// double-mode requirement, and schedules an autosave under the same
    /// existing-record gate.
    pub fn update_total_rows(&mut self, new_total_rows: &str, service: &ProjectService) {
        self.total_rows = new_total_rows.to_string();
        self.recompute_dirty();

        let value = self.total_rows_value();
        let is_double = self.project_type == ProjectType::Double;
        self.total_rows_error = if is_double && value <= 0 && !self.total_rows.is_empty() {
            Some(TOTAL_ROWS_POSITIVE.to_string())
        } else if is_double && self.total_rows.is_empty() {
            Some(TOTAL_ROWS_REQUIRED.to_string())
        } else {
            None
        };

        self.trigger_autosave(service);
    }

    /// Stores image data under this project's scope and appends the
    /// reference. Returns the stored path, `None` when the write failed.
    pub fn add_image(&mut self, data: &[u8], service: &ProjectService) -> Option<String> {
        let index = self.image_paths.len();
        let path = service.save_image(data, self.image_scope_id, index)?;
        self.image_paths.push(path.clone());
        self.has_unsaved_changes = true;
        self.trigger_autosave(service);
        Some(path)
    }

    /// Drops an image reference from the edit buffer. The file itself is
    /// not deleted here; project deletion cleans up referenced files.
    pub fn remove_image_path(&mut self, path: &str, service: &ProjectService) {
        self.image_paths.retain(|p| p != path);
        self.has_unsaved_changes = true;
        self.trigger_autosave(service);
    }

    /// Fires the pending debounced save when due. Returns whether a save ran.
    pub fn poll_autosave(&mut self, now: Instant, service: &mut ProjectService) -> bool {
        if self.scheduler.fire_due(now) {
            self.save(service);
            true
        } else {
            false
        }
    }

    /// Persists the edited fields onto the bound record and re-bases the
    /// dirty-tracking snapshot. No-op for a not-yet-created record.
    pub fn save(&mut self, service: &mut ProjectService) {
        let Some(id) = self.project_id else { return };
        let Some(mut project) = service.get_project(id) else {
            return;
        };

        project.title = self.title.clone();
        project.total_rows = self.total_rows_value().max(0);
        project.image_paths = self.image_paths.clone();
        service.save_project(&mut project);

        self.capture_snapshot();
        self.has_unsaved_changes = false;
    }

    /// Three-outcome dismissal decision:
    /// 1. empty trimmed title -> title error plus discard dialog,
    /// 2. unsaved changes -> discard dialog,
    /// 3. otherwise -> immediate save, dismissal allowed.
    pub fn attempt_dismissal(&mut self, service: &mut ProjectService) -> DismissalResult {
        self.scheduler.cancel_pending();

        let result = if self.title.trim().is_empty() {
            self.title_error = Some(TITLE_REQUIRED.to_string());
            DismissalResult::ShowDiscardDialog
        } else if self.has_unsaved_changes {
            DismissalResult::ShowDiscardDialog
        } else {
            self.save(service);
            DismissalResult::Allowed
        };

        self.dismissal_result = Some(result);
        result
    }

    /// Restores all tracked fields to the load-time snapshot and clears
    /// errors. Touches nothing in the store.
    pub fn discard_changes(&mut self) {
        self.title = self.original_title.clone();
        self.total_rows = self.original_total_rows.clone();
        self.image_paths = self.original_image_paths.clone();
        self.clear_transient_state();
    }

    /// New-record path: validates, then allocates and persists the project.
    ///
    /// On validation failure the corresponding field error is set and no
    /// identifier is returned. On success the controller rebinds to the new
    /// record as its existing target and dirty tracking is re-based.
    pub fn create_project(&mut self, service: &mut ProjectService) -> Option<ProjectId> {
        if self.title.trim().is_empty() {
            self.title_error = Some(TITLE_REQUIRED.to_string());
            return None;
        }

        let value = self.total_rows_value();
        if self.project_type == ProjectType::Double && value <= 0 {
            self.total_rows_error = Some(TOTAL_ROWS_REQUIRED_POSITIVE.to_string());
            return None;
        }

        let mut project = service.create_project(self.project_type);
        project.title = self.title.clone();
        project.total_rows = value.max(0);
        project.image_paths = self.image_paths.clone();
        service.save_project(&mut project);

        self.project_id = Some(project.id);
        self.capture_snapshot();
        self.clear_transient_state();

        Some(project.id)
    }

    fn bind_existing(
        &mut self,
        id: ProjectId,
        kind: ProjectType,
        title: &str,
        total_rows: i64,
        image_paths: Vec<String>,
    ) {
        self.project_id = Some(id);
        self.image_scope_id = id;
        self.project_type = kind;
        self.title = title.to_string();
        self.total_rows = if total_rows > 0 {
            total_rows.to_string()
        } else {
            String::new()
        };
        self.image_paths = image_paths;
        self.capture_snapshot();
        self.clear_transient_state();
    }

    fn capture_snapshot(&mut self) {
        self.original_title = self.title.clone();
        self.original_total_rows = self.total_rows.clone();
        self.original_image_paths = self.image_paths.clone();
    }

    fn clear_transient_state(&mut self) {
        self.has_unsaved_changes = false;
        self.title_error = None;
        self.total_rows_error = None;
        self.dismissal_result = None;
    }

    fn recompute_dirty(&mut self) {
        self.has_unsaved_changes = self.title != self.original_title
            || self.total_rows != self.original_total_rows
            || self.image_paths != self.original_image_paths;
    }

    fn total_rows_value(&self) -> i64 {
        self.total_rows.trim().parse().unwrap_or(0)
    }

    fn trigger_autosave(&mut self, service: &ProjectService) {
        self.scheduler.cancel_pending();

        // New, not-yet-created records are never autosaved; only an explicit
        // create persists them.
        let Some(id) = self.project_id else { return };
        let exists = service.get_project(id).is_some();
        if self.has_unsaved_changes && exists {
            self.scheduler.schedule(Instant::now());
        }
    }
}

impl Default for ProjectDetailController {
    fn default() -> Self {
        Self::new()
    }
}
