//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `projects` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `list_projects` orders most-recently-updated first, uuid as tiebreaker.
//! - Timestamps are stored exactly as given; the service layer owns "now".

use crate::db::DbError;
use crate::model::project::{Project, ProjectId, ProjectType};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    type,
    title,
    stitch_count,
    stitch_step,
    row_count,
    row_step,
    total_rows,
    image_paths,
    created_at,
    updated_at
FROM projects";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ProjectId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    fn insert_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO projects (
                uuid,
                type,
                title,
                stitch_count,
                stitch_step,
                row_count,
                row_step,
                total_rows,
                image_paths,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                project.id.to_string(),
                project_type_to_db(project.kind),
                project.title.as_str(),
                project.stitch_count,
                project.stitch_step,
                project.row_count,
                project.row_step,
                project.total_rows,
                encode_image_paths(&project.image_paths)?,
                project.created_at,
                project.updated_at,
            ],
        )?;

        Ok(project.id)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects
             SET
                title = ?1,
                stitch_count = ?2,
                stitch_step = ?3,
                row_count = ?4,
                row_step = ?5,
                total_rows = ?6,
                image_paths = ?7,
                updated_at = ?8
             WHERE uuid = ?9;",
            params![
                project.title.as_str(),
                project.stitch_count,
                project.stitch_step,
                project.row_count,
                project.row_step,
                project.total_rows,
                encode_image_paths(&project.image_paths)?,
                project.updated_at,
                project.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.id));
        }

        Ok(())
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY updated_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in projects.uuid"))
    })?;

    let type_text: String = row.get("type")?;
    let kind = parse_project_type(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid project type `{type_text}` in projects.type"
        ))
    })?;

    let image_paths_text: String = row.get("image_paths")?;
    let image_paths: Vec<String> = serde_json::from_str(&image_paths_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid image path list in projects.image_paths: {err}"))
    })?;

    Ok(Project {
        id,
        kind,
        title: row.get("title")?,
        stitch_count: row.get("stitch_count")?,
        stitch_step: row.get("stitch_step")?,
        row_count: row.get("row_count")?,
        row_step: row.get("row_step")?,
        total_rows: row.get("total_rows")?,
        image_paths,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn encode_image_paths(paths: &[String]) -> RepoResult<String> {
    serde_json::to_string(paths)
        .map_err(|err| RepoError::InvalidData(format!("unencodable image path list: {err}")))
}

fn project_type_to_db(kind: ProjectType) -> &'static str {
    match kind {
        ProjectType::Single => "single",
        ProjectType::Double => "double",
    }
}

fn parse_project_type(value: &str) -> Option<ProjectType> {
    match value {
        "single" => Some(ProjectType::Single),
        "double" => Some(ProjectType::Double),
        _ => None,
    }
}
