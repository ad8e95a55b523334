//! Library backup codec.
//!
//! # Responsibility
//! - Serialize the full project collection to a portable JSON payload and
//!   parse it back.
//!
//! # Invariants
//! - Import is strictly additive: every imported record gets a freshly
//!   allocated identifier and existing projects are never overwritten.
//! - One malformed record never aborts a batch; it is counted and skipped.

use crate::model::counter::StepSize;
use crate::model::project::{Project, ProjectType};
use crate::service::project_service::ProjectService;
use chrono::{SecondsFormat, TimeZone, Utc};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub type BackupResult<T> = Result<T, BackupError>;

#[derive(Debug)]
pub enum BackupError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
    /// Top-level payload is not a list of records.
    InvalidFormat,
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
            Self::InvalidFormat => write!(f, "payload is not a list of backup records"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidFormat => None,
        }
    }
}

impl From<std::io::Error> for BackupError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// One flat record of the backup format.
///
/// `type` and `title` are required on import; every other field defaults to
/// its zero value (steps to the smallest magnitude) when missing or
/// wrong-typed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub title: String,
    pub stitch_counter_number: i64,
    pub stitch_adjustment: i64,
    pub row_counter_number: i64,
    pub row_adjustment: i64,
    pub total_rows: i64,
    pub image_paths: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn default_step() -> i64 {
    StepSize::default().amount()
}

/// Counts of records accepted and skipped by one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

/// Serializes the whole library to a pretty-printed JSON list.
pub fn export_payload(service: &mut ProjectService) -> BackupResult<String> {
    let records: Vec<BackupRecord> = service
        .fetch_projects()
        .iter()
        .map(record_from_project)
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Exports the library to a timestamped file under `dir`.
pub fn export_library(service: &mut ProjectService, dir: &Path) -> BackupResult<PathBuf> {
    let payload = export_payload(service)?;
    fs::create_dir_all(dir)?;

    // Colons are replaced so the name stays legal on every filesystem.
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace(':', "-");
    let path = dir.join(format!("stitchtrack_backup_{stamp}.json"));
    fs::write(&path, payload)?;

    info!(
        "event=backup_export module=backup status=ok path={}",
        path.display()
    );
    Ok(path)
}

/// Imports a backup payload, creating a fresh project per valid record.
///
/// Records missing a well-formed `type` or `title` are counted as failed and
/// skipped; the batch continues.
pub fn import_payload(service: &mut ProjectService, payload: &str) -> BackupResult<ImportSummary> {
    let values: Vec<Value> =
        serde_json::from_str(payload).map_err(|_| BackupError::InvalidFormat)?;

    let mut summary = ImportSummary::default();
    for value in values {
        let Some(record) = parse_record(&value) else {
            warn!("event=backup_import module=backup status=skip reason=missing_type_or_title");
            summary.failed += 1;
            continue;
        };

        let mut project = service.create_project(record.kind);
        project.title = record.title;
        project.stitch_count = record.stitch_counter_number.max(0);
        project.stitch_step = positive_step(record.stitch_adjustment);
        project.row_count = record.row_counter_number.max(0);
        project.row_step = positive_step(record.row_adjustment);
        project.total_rows = record.total_rows.max(0);
        service.save_project(&mut project);
        summary.imported += 1;
    }

    info!(
        "event=backup_import module=backup status=ok imported={} failed={}",
        summary.imported, summary.failed
    );
    Ok(summary)
}

/// Imports a backup file from `path`.
pub fn import_library(service: &mut ProjectService, path: &Path) -> BackupResult<ImportSummary> {
    let payload = fs::read_to_string(path)?;
    import_payload(service, &payload)
}

/// Decodes one record leniently.
///
/// Only `type` and `title` gate acceptance. Every other field falls back to
/// its default when missing or wrong-typed, so a payload edited by hand or
/// produced by an older build still imports with what it has.
fn parse_record(value: &Value) -> Option<BackupRecord> {
    let kind = match value.get("type")?.as_str()? {
        "single" => ProjectType::Single,
        "double" => ProjectType::Double,
        _ => return None,
    };
    let title = value.get("title")?.as_str()?.to_owned();

    Some(BackupRecord {
        id: string_field(value, "id"),
        kind,
        title,
        stitch_counter_number: int_field(value, "stitchCounterNumber", 0),
        stitch_adjustment: int_field(value, "stitchAdjustment", default_step()),
        row_counter_number: int_field(value, "rowCounterNumber", 0),
        row_adjustment: int_field(value, "rowAdjustment", default_step()),
        total_rows: int_field(value, "totalRows", 0),
        image_paths: Vec::new(),
        created_at: string_field(value, "createdAt"),
        updated_at: string_field(value, "updatedAt"),
    })
}

fn int_field(value: &Value, key: &str, default: i64) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(default)
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn record_from_project(project: &Project) -> BackupRecord {
    BackupRecord {
        id: project.id.to_string(),
        kind: project.kind,
        title: project.title.clone(),
        stitch_counter_number: project.stitch_count,
        stitch_adjustment: project.stitch_step,
        row_counter_number: project.row_count,
        row_adjustment: project.row_step,
        total_rows: project.total_rows,
        image_paths: project.image_paths.clone(),
        created_at: epoch_ms_to_rfc3339(project.created_at),
        updated_at: epoch_ms_to_rfc3339(project.updated_at),
    }
}

fn positive_step(value: i64) -> i64 {
    if value > 0 {
        value
    } else {
        StepSize::default().amount()
    }
}

fn epoch_ms_to_rfc3339(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
