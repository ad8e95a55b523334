//! Single-counter screen controller.
//!
//! # Responsibility
//! - Drive one stitch counter against a loaded project.
//! - Debounce persistence of counter edits through the autosave scheduler.
//!
//! # Invariants
//! - Reloading the same project id preserves in-memory counter state, so
//!   view-lifecycle reloads never clobber debounced, unflushed edits.
//! - Dismissal cancels the pending save and writes immediately.

use crate::controller::scheduler::AutosaveScheduler;
use crate::model::counter::{CounterState, StepSize};
use crate::model::project::ProjectId;
use crate::service::project_service::ProjectService;
use std::time::Instant;

/// View-model for the single-counter screen.
#[derive(Default)]
pub struct SingleCounterController {
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub counter: CounterState,
    scheduler: AutosaveScheduler,
}

impl SingleCounterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the controller to a project, or resets it when `id` is absent
    /// or unresolved.
    ///
    /// Same-id reloads refresh the title but keep counter state as-is;
    /// different-id loads replace it from the persisted fields, mapping an
    /// unknown persisted step back to the smallest magnitude.
    pub fn load_project(&mut self, id: Option<ProjectId>, service: &ProjectService) {
        let Some(id) = id else {
            self.reset_state();
            return;
        };
        let Some(project) = service.get_project(id) else {
            self.reset_state();
            return;
        };

        let preserve_counter = self.project_id == Some(project.id);
        self.project_id = Some(project.id);
        self.title = project.title.clone();

        if !preserve_counter {
            self.counter = CounterState::new(
                project.stitch_count,
                StepSize::from_persisted(project.stitch_step),
            );
        }
    }

    pub fn increment(&mut self) {
        self.counter = self.counter.incremented();
        self.trigger_autosave();
    }

    pub fn decrement(&mut self) {
        self.counter = self.counter.decremented();
        self.trigger_autosave();
    }

    pub fn reset_count(&mut self) {
        self.counter = self.counter.reset();
        self.trigger_autosave();
    }

    pub fn change_step(&mut self, step: StepSize) {
        self.counter = self.counter.with_step(step);
        self.trigger_autosave();
    }

    /// Clears the bound project and counter state.
    pub fn reset_state(&mut self) {
        self.project_id = None;
        self.title.clear();
        self.counter = CounterState::default();
        self.scheduler.cancel_pending();
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

    /// Writes the counter back onto the bound project and persists it.
    /// No-op when no project is bound.
    pub fn save(&mut self, service: &mut ProjectService) {
        let Some(id) = self.project_id else { return };
        let Some(mut project) = service.get_project(id) else {
            return;
        };

        project.stitch_count = self.counter.count;
        project.stitch_step = self.counter.step.amount();
        service.save_project(&mut project);
    }

    /// Flushes state on navigation-away: cancels the debounce window and
    /// saves immediately so the last edit is never lost.
    pub fn attempt_dismissal(&mut self, service: &mut ProjectService) {
        self.scheduler.cancel_pending();
        self.save(service);
    }

    fn trigger_autosave(&mut self) {
        // No identified target, nothing to schedule.
        if self.project_id.is_none() {
            return;
        }
        self.scheduler.schedule(Instant::now());
    }
}
