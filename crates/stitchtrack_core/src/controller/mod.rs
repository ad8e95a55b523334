//! Controller (view-model) layer.
//!
//! # Responsibility
//! - Hold transient editable state for one screen each and publish it as
//!   plain fields the presentation layer reads.
//! - Route every persisted mutation through the project store, debounced
//!   via the autosave scheduler.
//!
//! # Invariants
//! - Each controller instance has a single logical owner; nothing here is
//!   shared across threads.
//! - Dismissal paths flush pending debounced saves before handing control
//!   back, so the last edit is never lost to the quiet period.

pub mod double_counter;
pub mod library;
pub mod project_detail;
pub mod scheduler;
pub mod settings;
pub mod single_counter;
pub mod theme;
