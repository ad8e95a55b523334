//! Counter value types.
//!
//! # Responsibility
//! - Define the (count, step) pair driving one increment/decrement counter.
//! - Keep counter transitions pure; persistence mapping lives in controllers.
//!
//! # Invariants
//! - `count` never goes negative: decrement clamps at 0.
//! - `step` is always one of the fixed `StepSize` magnitudes.

use serde::{Deserialize, Serialize};

/// Fixed step magnitudes selectable for a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepSize {
    #[default]
    One,
    Five,
    Ten,
}

impl StepSize {
    pub const ALL: [StepSize; 3] = [StepSize::One, StepSize::Five, StepSize::Ten];

    /// Numeric magnitude applied per increment/decrement.
    pub fn amount(self) -> i64 {
        match self {
            Self::One => 1,
            Self::Five => 5,
            Self::Ten => 10,
        }
    }

    /// Maps a persisted step value back to a known magnitude.
    ///
    /// Values that match no variant fall back to the smallest step, so
    /// records written by older builds still load.
    pub fn from_persisted(amount: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|step| step.amount() == amount)
            .unwrap_or_default()
    }
}

/// A single counter's transient state. Not persisted directly; controllers
/// map it to and from `Project` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub count: i64,
    pub step: StepSize,
}

impl CounterState {
    pub fn new(count: i64, step: StepSize) -> Self {
        Self { count, step }
    }

    /// Count advanced by one step.
    pub fn incremented(self) -> Self {
        Self {
            count: self.count + self.step.amount(),
            step: self.step,
        }
    }

    /// Count reduced by one step, clamped at 0.
    pub fn decremented(self) -> Self {
        Self {
            count: (self.count - self.step.amount()).max(0),
            step: self.step,
        }
    }

    /// Count back to 0, step preserved.
    pub fn reset(self) -> Self {
        Self {
            count: 0,
            step: self.step,
        }
    }

    /// Step replaced, count preserved.
    pub fn with_step(self, step: StepSize) -> Self {
        Self {
            count: self.count,
            step,
        }
    }

    /// Count capped at `limit` when `limit > 0`; unlimited otherwise.
    pub fn clamped_to(self, limit: i64) -> Self {
        if limit > 0 && self.count > limit {
            Self {
                count: limit,
                step: self.step,
            }
        } else {
            self
        }
    }
}

/// Which of a double-mode project's two counters an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Stitch,
    Row,
}
