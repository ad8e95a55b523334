use stitchtrack_core::backup::{export_library, export_payload, import_library, import_payload};
use stitchtrack_core::{ProjectService, ProjectType, SettingsController};

fn open_service(dir: &tempfile::TempDir) -> ProjectService {
    ProjectService::open_in_memory(dir.path()).unwrap()
}

#[test]
fn export_payload_is_a_pretty_printed_record_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Double);
    project.title = "blanket".to_string();
    project.stitch_count = 15;
    project.total_rows = 90;
    service.save_project(&mut project);

    let payload = export_payload(&mut service).unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
    assert_eq!(values.len(), 1);

    let record = &values[0];
    assert_eq!(record["id"], project.id.to_string());
    assert_eq!(record["type"], "double");
    assert_eq!(record["title"], "blanket");
    assert_eq!(record["stitchCounterNumber"], 15);
    assert_eq!(record["stitchAdjustment"], 1);
    assert_eq!(record["totalRows"], 90);
    assert!(record["createdAt"].as_str().unwrap().contains('T'));
    assert!(payload.contains('\n'), "payload should be pretty-printed");
}

#[test]
fn import_tolerates_malformed_records_and_counts_them() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let payload = r#"[
        {
            "id": "3f97b085-3b6c-4efd-9f2f-0f0c3d8285a9",
            "type": "single",
            "title": "washcloth",
            "stitchCounterNumber": 21,
            "stitchAdjustment": 5
        },
        {
            "title": "record without a type tag"
        }
    ]"#;

    let summary = import_payload(&mut service, payload).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.failed, 1);

    let projects = service.fetch_projects();
    assert_eq!(projects.len(), 1);
    let imported = &projects[0];
    assert_eq!(imported.title, "washcloth");
    assert_eq!(imported.stitch_count, 21);
    assert_eq!(imported.stitch_step, 5);
    // Freshly allocated identity, never the exported one.
    assert_ne!(
        imported.id.to_string(),
        "3f97b085-3b6c-4efd-9f2f-0f0c3d8285a9"
    );
}

#[test]
fn import_defaults_missing_numeric_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let payload = r#"[{"type": "double", "title": "bare minimum"}]"#;
    let summary = import_payload(&mut service, payload).unwrap();
    assert_eq!(summary.imported, 1);

    let imported = &service.fetch_projects()[0];
    assert_eq!(imported.stitch_count, 0);
    assert_eq!(imported.stitch_step, 1);
    assert_eq!(imported.row_count, 0);
    assert_eq!(imported.row_step, 1);
    assert_eq!(imported.total_rows, 0);
}

#[test]
fn import_defaults_wrong_typed_optional_fields_instead_of_skipping() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    // A record with a sound type and title imports even when other fields
    // carry the wrong JSON type; those fall back to their defaults.
    let payload = r#"[{
        "type": "single",
        "title": "washcloth",
        "stitchCounterNumber": "21",
        "stitchAdjustment": null,
        "totalRows": 40
    }]"#;

    let summary = import_payload(&mut service, payload).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.failed, 0);

    let imported = &service.fetch_projects()[0];
    assert_eq!(imported.title, "washcloth");
    assert_eq!(imported.stitch_count, 0);
    assert_eq!(imported.stitch_step, 1);
    assert_eq!(imported.total_rows, 40);
}

#[test]
fn import_rejects_unknown_type_tags_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let payload = r#"[{"type": "triple", "title": "bad"}, {"type": "single", "title": "good"}]"#;
    let summary = import_payload(&mut service, payload).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn import_of_non_list_payload_is_an_invalid_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    assert!(import_payload(&mut service, r#"{"not": "a list"}"#).is_err());
    assert!(service.fetch_projects().is_empty());
}

#[test]
fn import_is_strictly_additive() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut existing = service.create_project(ProjectType::Single);
    existing.title = "existing".to_string();
    service.save_project(&mut existing);

    let payload = r#"[{"type": "single", "title": "imported"}]"#;
    import_payload(&mut service, payload).unwrap();

    let projects = service.fetch_projects();
    assert_eq!(projects.len(), 2);
    let kept = service.get_project(existing.id).unwrap();
    assert_eq!(kept.title, "existing");
}

#[test]
fn round_trip_preserves_counters_titles_and_total_rows() {
    let source_dir = tempfile::tempdir().unwrap();
    let mut source = open_service(&source_dir);

    let mut single = source.create_project(ProjectType::Single);
    single.title = "socks".to_string();
    single.stitch_count = 48;
    single.stitch_step = 5;
    source.save_project(&mut single);

    let mut double = source.create_project(ProjectType::Double);
    double.title = "sweater".to_string();
    double.stitch_count = 102;
    double.stitch_step = 10;
    double.row_count = 17;
    double.row_step = 5;
    double.total_rows = 200;
    source.save_project(&mut double);

    let payload = export_payload(&mut source).unwrap();

    let fresh_dir = tempfile::tempdir().unwrap();
    let mut fresh = open_service(&fresh_dir);
    let summary = import_payload(&mut fresh, &payload).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 0);

    let projects = fresh.fetch_projects();
    let socks = projects.iter().find(|p| p.title == "socks").unwrap();
    assert_eq!(socks.kind, ProjectType::Single);
    assert_eq!(socks.stitch_count, 48);
    assert_eq!(socks.stitch_step, 5);

    let sweater = projects.iter().find(|p| p.title == "sweater").unwrap();
    assert_eq!(sweater.kind, ProjectType::Double);
    assert_eq!(sweater.stitch_count, 102);
    assert_eq!(sweater.stitch_step, 10);
    assert_eq!(sweater.row_count, 17);
    assert_eq!(sweater.row_step, 5);
    assert_eq!(sweater.total_rows, 200);
}

#[test]
fn export_then_import_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "coaster".to_string();
    service.save_project(&mut project);

    let export_dir = tempfile::tempdir().unwrap();
    let path = export_library(&mut service, export_dir.path()).unwrap();
    assert!(path.exists());

    let fresh_dir = tempfile::tempdir().unwrap();
    let mut fresh = open_service(&fresh_dir);
    let summary = import_library(&mut fresh, &path).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(fresh.fetch_projects()[0].title, "coaster");
}

#[test]
fn settings_controller_publishes_counts_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "bookmark".to_string();
    service.save_project(&mut project);

    let export_dir = tempfile::tempdir().unwrap();
    let mut settings = SettingsController::new();

    let path = settings
        .export_library(&mut service, export_dir.path())
        .unwrap();
    assert!(settings.export_success);
    assert!(settings.export_error.is_none());
    assert!(!settings.is_exporting);

    settings.import_library(&mut service, &path);
    assert!(settings.import_success);
    assert_eq!(settings.imported_count, 1);
    assert_eq!(settings.failed_count, 0);

    settings.clear_import_status();
    assert_eq!(settings.imported_count, 0);
    assert!(!settings.import_success);
}

#[test]
fn settings_controller_reports_invalid_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let bad = dir.path().join("not-a-backup.json");
    std::fs::write(&bad, "{}").unwrap();

    let mut settings = SettingsController::new();
    settings.import_library(&mut service, &bad);

    assert!(!settings.import_success);
    assert_eq!(settings.import_error.as_deref(), Some("Invalid backup format"));
}

#[test]
fn settings_controller_reports_missing_file_as_import_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut settings = SettingsController::new();
    settings.import_library(&mut service, dir.path().join("missing.json").as_path());

    let message = settings.import_error.unwrap();
    assert!(message.starts_with("Import failed:"));
}
