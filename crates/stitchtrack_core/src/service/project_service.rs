//! Project store facade.
//!
//! # Responsibility
//! - Own the SQLite connection, the image storage root and the in-memory
//!   project snapshot.
//! - Provide the only save path through which project records are mutated.
//!
//! # Invariants
//! - The snapshot is ordered most-recently-updated first.
//! - `updated_at` moves strictly forward on every save.
//! - Post-init storage failures are logged; callers proceed on the last
//!   known-good snapshot. Only `open` is allowed to fail hard.
//! - A deleted project's image files are removed (best-effort) before the
//!   record goes away.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::project::{Project, ProjectId, ProjectType};
use crate::model::theme::AppTheme;
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::settings_repo;
use log::{error, info, warn};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

const THEME_SETTING_KEY: &str = "selected_theme";

/// Durable store for project records plus their attached image files.
pub struct ProjectService {
    conn: Connection,
    images_root: PathBuf,
    projects: Vec<Project>,
}

impl ProjectService {
    /// Opens the store at `db_path` with image files rooted at `images_root`.
    ///
    /// # Errors
    /// Fails when the database cannot be opened or migrated. There is no
    /// recovery path from that; callers should abort startup.
    pub fn open(db_path: impl AsRef<Path>, images_root: impl Into<PathBuf>) -> DbResult<Self> {
        let conn = open_db(db_path)?;
        Ok(Self::with_connection(conn, images_root.into()))
    }

    /// Opens an in-memory store, mainly for tests.
    pub fn open_in_memory(images_root: impl Into<PathBuf>) -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::with_connection(conn, images_root.into()))
    }

    fn with_connection(conn: Connection, images_root: PathBuf) -> Self {
        let mut service = Self {
            conn,
            images_root,
            projects: Vec::new(),
        };
        service.refresh();
        service
    }

    /// Refreshes the snapshot and returns it, most-recently-updated first.
    ///
    /// A failed refresh keeps the last known-good snapshot; read failures
    /// are logged, never raised.
    pub fn fetch_projects(&mut self) -> &[Project] {
        self.refresh();
        &self.projects
    }

    /// Last-fetched snapshot without touching storage.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up one project in the last-fetched snapshot.
    ///
    /// Side-effect free; returns a working copy the caller may edit and hand
    /// back through [`ProjectService::save_project`].
    pub fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }

    /// Allocates and persists a new project with default field values.
    pub fn create_project(&mut self, kind: ProjectType) -> Project {
        let project = Project::new(kind, now_ms());
        let repo = SqliteProjectRepository::new(&self.conn);
        if let Err(err) = repo.insert_project(&project) {
            error!(
                "event=project_create module=store status=error id={} error={}",
                project.id, err
            );
        } else {
            info!(
                "event=project_create module=store status=ok id={} type={:?}",
                project.id, project.kind
            );
        }
        self.refresh();
        project
    }

    /// Persists `project`, bumping its `updated_at` to now.
    ///
    /// The caller's working copy is updated in place so it stays canonical
    /// after the write.
    pub fn save_project(&mut self, project: &mut Project) {
        // Strictly increasing keeps recency ordering stable even for saves
        // landing within the same millisecond.
        project.updated_at = now_ms().max(project.updated_at + 1);

        let repo = SqliteProjectRepository::new(&self.conn);
        if let Err(err) = repo.update_project(project) {
            error!(
                "event=project_save module=store status=error id={} error={}",
                project.id, err
            );
        }
        self.refresh();
    }

    /// Deletes one project and its image files.
    pub fn delete_project(&mut self, project: &Project) {
        self.delete_image_files(project);
        let repo = SqliteProjectRepository::new(&self.conn);
        if let Err(err) = repo.delete_project(project.id) {
            error!(
                "event=project_delete module=store status=error id={} error={}",
                project.id, err
            );
        }
        self.refresh();
    }

    /// Deletes a batch of projects and their image files.
    pub fn delete_projects(&mut self, projects: &[Project]) {
        for project in projects {
            self.delete_image_files(project);
            let repo = SqliteProjectRepository::new(&self.conn);
            if let Err(err) = repo.delete_project(project.id) {
                error!(
                    "event=project_delete module=store status=error id={} error={}",
                    project.id, err
                );
            }
        }
        self.refresh();
    }

    /// Writes image data to a project-scoped location.
    ///
    /// Returns the stored path, or `None` when the directory or file could
    /// not be written. Failure is logged, never raised; the caller decides
    /// whether to surface it.
    pub fn save_image(&self, data: &[u8], project_id: ProjectId, index: usize) -> Option<String> {
        let dir = self.images_root.join(project_id.to_string());
        if let Err(err) = fs::create_dir_all(&dir) {
            error!(
                "event=image_save module=store status=error id={project_id} error={err}"
            );
            return None;
        }

        // Index plus timestamp keeps names unique across remove/re-add cycles.
        let file = dir.join(format!("image_{index}_{}.jpg", now_ms()));
        match fs::write(&file, data) {
            Ok(()) => Some(file.to_string_lossy().into_owned()),
            Err(err) => {
                error!(
                    "event=image_save module=store status=error id={project_id} error={err}"
                );
                None
            }
        }
    }

    /// Removes an image file (best-effort) and drops its reference from the
    /// project's list, then persists.
    pub fn remove_image(&mut self, path: &str, project: &mut Project) {
        if let Err(err) = fs::remove_file(path) {
            warn!("event=image_remove module=store status=skip path={path} error={err}");
        }
        project.image_paths.retain(|p| p != path);
        self.save_project(project);
    }

    /// Currently selected theme, defaulting when unset or unreadable.
    pub fn theme(&self) -> AppTheme {
        match settings_repo::get_setting(&self.conn, THEME_SETTING_KEY) {
            Ok(Some(value)) => AppTheme::from_stored(&value),
            Ok(None) => AppTheme::default(),
            Err(err) => {
                error!("event=theme_load module=store status=error error={err}");
                AppTheme::default()
            }
        }
    }

    /// Persists the theme choice.
    pub fn set_theme(&mut self, theme: AppTheme) {
        if let Err(err) = settings_repo::put_setting(&self.conn, THEME_SETTING_KEY, theme.as_str())
        {
            error!("event=theme_save module=store status=error error={err}");
        }
    }

    fn refresh(&mut self) {
        let repo = SqliteProjectRepository::new(&self.conn);
        match repo.list_projects() {
            Ok(projects) => self.projects = projects,
            Err(err) => {
                error!("event=project_fetch module=store status=error error={err}");
            }
        }
    }

    fn delete_image_files(&self, project: &Project) {
        for path in &project.image_paths {
            if let Err(err) = fs::remove_file(path) {
                warn!(
                    "event=image_remove module=store status=skip path={path} error={err}"
                );
            }
        }
    }
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
