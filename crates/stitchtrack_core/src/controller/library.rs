//! Library screen controller.
//!
//! # Responsibility
//! - Track multi-select state and the delete-confirmation flow over the
//!   project list.
//!
//! Deletion always goes through a confirmation step; the store is only
//! touched from `confirm_delete`.

use crate::model::project::{Project, ProjectId};
use crate::service::project_service::ProjectService;
use std::collections::HashSet;

/// View-model for the project library screen.
#[derive(Default)]
pub struct LibraryController {
    pub is_multi_select_mode: bool,
    pub selected_ids: HashSet<ProjectId>,
    pub show_delete_confirmation: bool,
    pub pending_delete: Vec<Project>,
}

impl LibraryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_multi_select_mode(&mut self) {
        self.is_multi_select_mode = !self.is_multi_select_mode;
        if !self.is_multi_select_mode {
            self.selected_ids.clear();
        }
    }

    pub fn toggle_selection(&mut self, id: ProjectId) {
        if !self.selected_ids.remove(&id) {
            self.selected_ids.insert(id);
        }
    }

    pub fn select_all(&mut self, service: &ProjectService) {
        self.selected_ids = service.projects().iter().map(|p| p.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Stages one project for deletion and raises the confirmation prompt.
    pub fn request_delete(&mut self, project: Project) {
        self.pending_delete = vec![project];
        self.show_delete_confirmation = true;
    }

    /// Stages the current selection for deletion. No-op when nothing is
    /// selected.
    pub fn request_bulk_delete(&mut self, service: &ProjectService) {
        let to_delete: Vec<Project> = service
            .projects()
            .iter()
            .filter(|p| self.selected_ids.contains(&p.id))
            .cloned()
            .collect();
        if !to_delete.is_empty() {
            self.pending_delete = to_delete;
            self.show_delete_confirmation = true;
        }
    }

    /// Deletes the staged projects and resets selection state.
    pub fn confirm_delete(&mut self, service: &mut ProjectService) {
        match self.pending_delete.as_slice() {
            [] => {}
            [single] => service.delete_project(single),
            many => service.delete_projects(many),
        }
        self.show_delete_confirmation = false;
        self.pending_delete.clear();
        self.selected_ids.clear();
        self.is_multi_select_mode = false;
    }

    pub fn cancel_delete(&mut self) {
        self.show_delete_confirmation = false;
        self.pending_delete.clear();
    }
}
