//! Settings screen controller: backup export/import orchestration.
//!
//! # Responsibility
//! - Run export/import through the backup codec and publish busy flags,
//!   success flags, counts and user-facing error strings.
//!
//! # Invariants
//! - Export and import never run concurrently from one controller; both
//!   entry points gate on the busy flags.
//! - Failures resolve into a short published message, never a panic.

use crate::backup::{self, BackupError};
use crate::service::project_service::ProjectService;
use std::path::{Path, PathBuf};

/// View-model for the settings screen's backup section.
#[derive(Default)]
pub struct SettingsController {
    pub is_exporting: bool,
    pub is_importing: bool,
    pub export_success: bool,
    pub import_success: bool,
    pub export_error: Option<String>,
    pub import_error: Option<String>,
    pub imported_count: usize,
    pub failed_count: usize,
}

impl SettingsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.is_exporting || self.is_importing
    }

    /// Exports the library to a timestamped file under `dir`.
    ///
    /// Returns the written path, or `None` when busy or the export failed
    /// (with `export_error` set).
    pub fn export_library(
        &mut self,
        service: &mut ProjectService,
        dir: &Path,
    ) -> Option<PathBuf> {
        if self.is_busy() {
            return None;
        }
        self.is_exporting = true;
        self.export_success = false;
        self.export_error = None;

        let result = backup::export_library(service, dir);
        self.is_exporting = false;

        match result {
            Ok(path) => {
                self.export_success = true;
                Some(path)
            }
            Err(err) => {
                self.export_error = Some(format!("Export failed: {err}"));
                None
            }
        }
    }

    /// Imports a backup file, publishing imported/failed counts.
    pub fn import_library(&mut self, service: &mut ProjectService, path: &Path) {
        if self.is_busy() {
            return;
        }
        self.is_importing = true;
        self.import_success = false;
        self.import_error = None;
        self.imported_count = 0;
        self.failed_count = 0;

        let result = backup::import_library(service, path);
        self.is_importing = false;

        match result {
            Ok(summary) => {
                self.imported_count = summary.imported;
                self.failed_count = summary.failed;
                self.import_success = true;
            }
            Err(BackupError::InvalidFormat) => {
                self.import_error = Some("Invalid backup format".to_string());
            }
            Err(err) => {
                self.import_error = Some(format!("Import failed: {err}"));
            }
        }
    }

    pub fn clear_export_status(&mut self) {
        self.export_success = false;
        self.export_error = None;
    }

    pub fn clear_import_status(&mut self) {
        self.import_success = false;
        self.import_error = None;
        self.imported_count = 0;
        self.failed_count = 0;
    }
}
