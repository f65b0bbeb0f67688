use chrono::{TimeZone, Utc};
use racesheet::domain::{JobId, StoragePath};

#[test]
fn given_plain_filename_when_creating_upload_path_then_prefixed_with_uploads_and_uuid() {
    let path = StoragePath::upload("derby.pdf");

    assert!(path.as_str().starts_with("uploads/"));
    assert!(path.as_str().ends_with("-derby.pdf"));
}

#[test]
fn given_filename_with_directories_and_spaces_when_creating_upload_path_then_sanitized() {
    let path = StoragePath::upload("../../etc/race results (final).pdf");

    let name = path.as_str().trim_start_matches("uploads/");
    assert!(!name.contains('/'));
    assert!(name.ends_with("-race_results__final_.pdf"));
}

#[test]
fn given_empty_filename_when_creating_upload_path_then_falls_back_to_default_name() {
    let path = StoragePath::upload("");
    assert!(path.as_str().ends_with("-document.pdf"));
}

#[test]
fn given_same_filename_twice_when_creating_upload_paths_then_paths_differ() {
    assert_ne!(StoragePath::upload("a.pdf"), StoragePath::upload("a.pdf"));
}

#[test]
fn given_job_and_timestamp_when_creating_csv_path_then_matches_layout() {
    let job_id = JobId::new();
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();

    let path = StoragePath::csv_output(job_id, at);

    assert_eq!(
        path.as_str(),
        format!("csvs/job-{}-20250309140507.csv", job_id)
    );
}

#[test]
fn given_storage_path_when_displayed_then_matches_as_str() {
    let path = StoragePath::from_raw("uploads/x.pdf");
    assert_eq!(format!("{}", path), path.as_str());
}
