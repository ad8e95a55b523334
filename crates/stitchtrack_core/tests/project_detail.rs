use std::time::{Duration, Instant};
use stitchtrack_core::{
    DismissalResult, ProjectDetailController, ProjectService, ProjectType,
};

fn open_service(dir: &tempfile::TempDir) -> ProjectService {
    ProjectService::open_in_memory(dir.path()).unwrap()
}

fn after_quiet_period() -> Instant {
    Instant::now() + Duration::from_secs(2)
}

#[test]
fn load_existing_captures_snapshot_and_clears_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Double);
    project.title = "blanket".to_string();
    project.total_rows = 120;
    service.save_project(&mut project);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);

    assert_eq!(vm.project_id, Some(project.id));
    assert_eq!(vm.project_type, ProjectType::Double);
    assert_eq!(vm.title, "blanket");
    assert_eq!(vm.total_rows, "120");
    assert!(!vm.has_unsaved_changes);
    assert!(vm.title_error.is_none());
    assert!(vm.total_rows_error.is_none());
}

#[test]
fn load_new_starts_with_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);

    let mut vm = ProjectDetailController::new();
    vm.load(None, ProjectType::Single, &service);

    assert!(vm.project_id.is_none());
    assert_eq!(vm.project_type, ProjectType::Single);
    assert!(vm.title.is_empty());
    assert!(vm.total_rows.is_empty());
    assert!(vm.image_paths.is_empty());
    assert!(!vm.has_unsaved_changes);
}

#[test]
fn zero_total_rows_loads_as_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    let project = service.create_project(ProjectType::Single);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);
    assert_eq!(vm.total_rows, "");
}

#[test]
fn title_edits_track_dirty_state_against_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "socks".to_string();
    service.save_project(&mut project);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);

    vm.update_title("mittens", &service);
    assert!(vm.has_unsaved_changes);

    // Back to the original value clears dirty again.
    vm.update_title("socks", &service);
    assert!(!vm.has_unsaved_changes);
}

#[test]
fn empty_title_surfaces_a_required_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    let project = service.create_project(ProjectType::Single);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);

    vm.update_title("   ", &service);
    assert_eq!(vm.title_error.as_deref(), Some("Title is required"));

    vm.update_title("scarf", &service);
    assert!(vm.title_error.is_none());
}

#[test]
fn total_rows_validation_applies_to_double_projects_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let double = service.create_project(ProjectType::Double);
    let mut vm = ProjectDetailController::new();
    vm.load_existing(double.id, &service);

    vm.update_total_rows("0", &service);
    assert_eq!(
        vm.total_rows_error.as_deref(),
        Some("Total rows must be greater than 0")
    );

    vm.update_total_rows("", &service);
    assert_eq!(vm.total_rows_error.as_deref(), Some("Total rows is required"));

    vm.update_total_rows("25", &service);
    assert!(vm.total_rows_error.is_none());

    let single = service.create_project(ProjectType::Single);
    let mut vm = ProjectDetailController::new();
    vm.load_existing(single.id, &service);
    vm.update_total_rows("", &service);
    assert!(vm.total_rows_error.is_none());
}

#[test]
fn existing_project_edits_autosave_after_the_quiet_period() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "hat".to_string();
    service.save_project(&mut project);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);
    vm.update_title("beanie", &service);

    assert!(vm.poll_autosave(after_quiet_period(), &mut service));
    assert_eq!(service.get_project(project.id).unwrap().title, "beanie");
    assert!(!vm.has_unsaved_changes);
}

#[test]
fn new_projects_are_never_autosaved() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut vm = ProjectDetailController::new();
    vm.load_new(ProjectType::Single);
    vm.update_title("cowl", &service);

    assert!(!vm.poll_autosave(after_quiet_period(), &mut service));
    assert!(service.fetch_projects().is_empty());
}

#[test]
fn reverting_an_edit_disarms_the_scheduled_autosave() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "hat".to_string();
    service.save_project(&mut project);
    let saved_at = service.get_project(project.id).unwrap().updated_at;

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);
    vm.update_title("beanie", &service);
    vm.update_title("hat", &service);

    assert!(!vm.poll_autosave(after_quiet_period(), &mut service));
    assert_eq!(service.get_project(project.id).unwrap().updated_at, saved_at);
}

#[test]
fn dismissal_with_empty_title_shows_discard_dialog_and_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    let project = service.create_project(ProjectType::Single);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);

    let result = vm.attempt_dismissal(&mut service);
    assert_eq!(result, DismissalResult::ShowDiscardDialog);
    assert_eq!(vm.title_error.as_deref(), Some("Title is required"));
    assert_eq!(vm.dismissal_result, Some(DismissalResult::ShowDiscardDialog));
}

#[test]
fn dismissal_with_unsaved_changes_shows_discard_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "shawl".to_string();
    service.save_project(&mut project);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);
    vm.update_title("wrap", &service);

    let result = vm.attempt_dismissal(&mut service);
    assert_eq!(result, DismissalResult::ShowDiscardDialog);
    // The edit is not written behind the user's back.
    assert_eq!(service.get_project(project.id).unwrap().title, "shawl");
}

#[test]
fn clean_dismissal_saves_and_allows() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "shawl".to_string();
    service.save_project(&mut project);
    let before = service.get_project(project.id).unwrap().updated_at;

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);

    let result = vm.attempt_dismissal(&mut service);
    assert_eq!(result, DismissalResult::Allowed);
    assert!(service.get_project(project.id).unwrap().updated_at > before);
}

#[test]
fn discard_changes_restores_the_snapshot_without_touching_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Double);
    project.title = "vest".to_string();
    project.total_rows = 60;
    service.save_project(&mut project);
    let saved_at = service.get_project(project.id).unwrap().updated_at;

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);
    vm.update_title("", &service);
    vm.update_total_rows("0", &service);

    vm.discard_changes();

    assert_eq!(vm.title, "vest");
    assert_eq!(vm.total_rows, "60");
    assert!(!vm.has_unsaved_changes);
    assert!(vm.title_error.is_none());
    assert!(vm.total_rows_error.is_none());
    assert_eq!(service.get_project(project.id).unwrap().updated_at, saved_at);
}

#[test]
fn create_project_requires_a_title() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut vm = ProjectDetailController::new();
    vm.load_new(ProjectType::Single);

    assert!(vm.create_project(&mut service).is_none());
    assert_eq!(vm.title_error.as_deref(), Some("Title is required"));
    assert!(service.fetch_projects().is_empty());
}

#[test]
fn create_double_project_requires_positive_total_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut vm = ProjectDetailController::new();
    vm.load_new(ProjectType::Double);
    vm.update_title("sweater", &service);

    assert!(vm.create_project(&mut service).is_none());
    assert_eq!(
        vm.total_rows_error.as_deref(),
        Some("Total rows is required and must be greater than 0")
    );
    assert!(service.fetch_projects().is_empty());
}

#[test]
fn create_project_persists_fields_and_rebinds_the_controller() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut vm = ProjectDetailController::new();
    vm.load_new(ProjectType::Double);
    vm.update_title("sweater", &service);
    vm.update_total_rows("80", &service);

    let id = vm.create_project(&mut service).unwrap();
    assert_eq!(vm.project_id, Some(id));
    assert!(!vm.has_unsaved_changes);

    let saved = service.get_project(id).unwrap();
    assert_eq!(saved.title, "sweater");
    assert_eq!(saved.total_rows, 80);
    assert_eq!(saved.kind, ProjectType::Double);

    // Bound now: subsequent edits autosave.
    vm.update_title("cardigan", &service);
    assert!(vm.poll_autosave(after_quiet_period(), &mut service));
    assert_eq!(service.get_project(id).unwrap().title, "cardigan");
}

#[test]
fn add_and_remove_image_track_dirty_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let mut project = service.create_project(ProjectType::Single);
    project.title = "pillow".to_string();
    service.save_project(&mut project);

    let mut vm = ProjectDetailController::new();
    vm.load_existing(project.id, &service);

    let path = vm.add_image(b"raw image", &service).unwrap();
    assert!(vm.has_unsaved_changes);
    assert_eq!(vm.image_paths, vec![path.clone()]);

    assert!(vm.poll_autosave(after_quiet_period(), &mut service));
    assert_eq!(service.get_project(project.id).unwrap().image_paths, vec![path.clone()]);

    vm.remove_image_path(&path, &service);
    assert!(vm.has_unsaved_changes);
    assert!(vm.image_paths.is_empty());
}
