//! Debounced autosave scheduling.
//!
//! # Responsibility
//! - Coalesce bursts of edits into at most one pending save per controller.
//!
//! # Invariants
//! - Rescheduling restarts the full quiet period (debounce, not throttle).
//! - After `cancel_pending`, a later poll observes nothing due and no-ops;
//!   a cancelled save can never fire against stale state.
//!
//! The scheduler holds a deadline rather than a task: controllers arm it on
//! each edit and poll it from their own execution context, so firing always
//! happens on the controller's single logical owner and scheduling never
//! blocks the caller.

use std::time::{Duration, Instant};

/// Quiet period between the last edit and the autosave write.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(1);

/// Per-controller debounce state: at most one pending save at a time.
#[derive(Debug)]
pub struct AutosaveScheduler {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl AutosaveScheduler {
    pub fn new() -> Self {
        Self::with_quiet_period(DEFAULT_QUIET_PERIOD)
    }

    /// Scheduler with a custom quiet period. Tests shorten it.
    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// Arms (or re-arms) the save deadline at `now + quiet_period`.
    ///
    /// Any previously scheduled-but-not-yet-fired save is superseded.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    /// Cancels the pending save, if any, without firing it.
    pub fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    /// Whether a save is scheduled and not yet fired.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Reports whether the pending save became due, clearing it if so.
    ///
    /// Returns `true` at most once per `schedule` call; the caller performs
    /// the actual save when it does.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new()
    }
}
