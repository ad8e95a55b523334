//! Core domain logic for StitchTrack, a needlework project counter.
//! This crate is the single source of truth for business invariants:
//! counter transitions, autosave coordination, dismissal protocols and
//! the project store contract.

pub mod backup;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use backup::{BackupError, BackupRecord, ImportSummary};
pub use controller::double_counter::DoubleCounterController;
pub use controller::library::LibraryController;
pub use controller::project_detail::{DismissalResult, ProjectDetailController};
pub use controller::scheduler::{AutosaveScheduler, DEFAULT_QUIET_PERIOD};
pub use controller::settings::SettingsController;
pub use controller::single_counter::SingleCounterController;
pub use controller::theme::ThemeController;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::counter::{CounterKind, CounterState, StepSize};
pub use model::project::{Project, ProjectId, ProjectType};
pub use model::theme::AppTheme;
pub use repo::project_repo::{
    ProjectRepository, RepoError, RepoResult, SqliteProjectRepository,
};
pub use service::project_service::ProjectService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
