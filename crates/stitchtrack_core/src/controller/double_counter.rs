//! Double-counter screen controller.
//!
//! # Responsibility
//! - Drive a stitch counter and a row counter against one loaded project.
//! - Clamp the row counter to the project's total-rows cap when one is set.
//!
//! # Invariants
//! - Same-id reloads preserve both counters; title and total-rows are still
//!   refreshed from the record.
//! - Row count never exceeds `total_rows` when `total_rows > 0`.

use crate::controller::scheduler::AutosaveScheduler;
use crate::model::counter::{CounterKind, CounterState, StepSize};
use crate::model::project::ProjectId;
use crate::service::project_service::ProjectService;
use std::time::Instant;

/// View-model for the double-counter screen.
#[derive(Default)]
pub struct DoubleCounterController {
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub stitch_counter: CounterState,
    pub row_counter: CounterState,
    pub total_rows: i64,
    scheduler: AutosaveScheduler,
}

impl DoubleCounterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of total rows completed, `None` when no cap is set.
    pub fn row_progress(&self) -> Option<f32> {
        if self.total_rows <= 0 {
            return None;
        }
        Some((self.row_counter.count as f32 / self.total_rows as f32).min(1.0))
    }

    /// Binds the controller to a project, or resets it when `id` is absent
    /// or unresolved. Same-id reloads keep both counters untouched.
    pub fn load_project(&mut self, id: Option<ProjectId>, service: &ProjectService) {
        let Some(id) = id else {
            self.reset_state();
            return;
        };
        let Some(project) = service.get_project(id) else {
            self.reset_state();
            return;
        };

        let preserve_counters = self.project_id == Some(project.id);
        self.project_id = Some(project.id);
        self.title = project.title.clone();
        self.total_rows = project.total_rows;

        if !preserve_counters {
            self.stitch_counter = CounterState::new(
                project.stitch_count,
                StepSize::from_persisted(project.stitch_step),
            );
            self.row_counter = CounterState::new(
                project.row_count,
                StepSize::from_persisted(project.row_step),
            );
        }
    }

    pub fn increment(&mut self, kind: CounterKind) {
        self.update_counter(kind, CounterState::incremented);
    }

    pub fn decrement(&mut self, kind: CounterKind) {
        self.update_counter(kind, CounterState::decremented);
    }

    pub fn reset(&mut self, kind: CounterKind) {
        self.update_counter(kind, CounterState::reset);
    }

    pub fn change_step(&mut self, kind: CounterKind, step: StepSize) {
        self.update_counter(kind, |state| state.with_step(step));
    }

    pub fn reset_all(&mut self) {
        self.reset(CounterKind::Stitch);
        self.reset(CounterKind::Row);
    }

    /// Clears the bound project and both counters.
    pub fn reset_state(&mut self) {
        self.project_id = None;
        self.title.clear();
        self.stitch_counter = CounterState::default();
        self.row_counter = CounterState::default();
        self.total_rows = 0;
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

    /// Writes both counters back onto the bound project and persists it.
    /// No-op when no project is bound.
    pub fn save(&mut self, service: &mut ProjectService) {
        let Some(id) = self.project_id else { return };
        let Some(mut project) = service.get_project(id) else {
            return;
        };

        project.stitch_count = self.stitch_counter.count;
        project.stitch_step = self.stitch_counter.step.amount();
        project.row_count = self.row_counter.count;
        project.row_step = self.row_counter.step.amount();
        service.save_project(&mut project);
    }

    /// Flushes state on navigation-away: cancels the debounce window and
    /// saves immediately.
    pub fn attempt_dismissal(&mut self, service: &mut ProjectService) {
        self.scheduler.cancel_pending();
        self.save(service);
    }

    fn update_counter(&mut self, kind: CounterKind, transform: impl FnOnce(CounterState) -> CounterState) {
        match kind {
            CounterKind::Stitch => {
                self.stitch_counter = transform(self.stitch_counter);
            }
            CounterKind::Row => {
                self.row_counter = transform(self.row_counter).clamped_to(self.total_rows);
            }
        }
        self.trigger_autosave();
    }

    fn trigger_autosave(&mut self) {
        if self.project_id.is_none() {
            return;
        }
        self.scheduler.schedule(Instant::now());
    }
}
