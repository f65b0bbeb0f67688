use chrono::Utc;
use racesheet::domain::{Job, JobStatus, JobTransitionError, StoragePath};

fn new_job() -> Job {
    Job::new(
        "Derby Results".to_string(),
        StoragePath::from_raw("uploads/derby.pdf"),
    )
}

#[test]
fn given_new_job_when_created_then_is_processing_without_completion_fields() {
    let job = new_job();

    assert_eq!(job.status, JobStatus::Processing);
    assert!(job.download_url.is_none());
    assert!(job.completed_at.is_none());
    assert!(!job.is_terminal());
}

#[test]
fn given_processing_job_when_completed_then_carries_url_and_timestamp() {
    let mut job = new_job();
    let at = Utc::now();

    job.complete("csvs/job-1.csv".to_string(), at).unwrap();

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.download_url.as_deref(), Some("csvs/job-1.csv"));
    assert_eq!(job.completed_at, Some(at));
}

#[test]
fn given_processing_job_when_failed_then_has_timestamp_but_no_url() {
    let mut job = new_job();

    job.fail(Utc::now()).unwrap();

    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.download_url.is_none());
    assert!(job.completed_at.is_some());
}

#[test]
fn given_failed_job_when_completing_then_transition_is_rejected_and_job_unchanged() {
    let mut job = new_job();
    job.fail(Utc::now()).unwrap();
    let before = job.clone();

    let result = job.complete("csvs/late.csv".to_string(), Utc::now());

    assert_eq!(
        result,
        Err(JobTransitionError::IllegalTransition {
            from: JobStatus::Failed,
            to: JobStatus::Completed,
        })
    );
    assert_eq!(job, before);
}

#[test]
fn given_completion_without_url_when_settling_then_rejected() {
    let mut job = new_job();

    let result = job.settle(JobStatus::Completed, None, Utc::now());

    assert_eq!(result, Err(JobTransitionError::MissingDownloadUrl));
    assert_eq!(job.status, JobStatus::Processing);
}

#[test]
fn given_failure_with_url_when_settling_then_rejected() {
    let mut job = new_job();

    let result = job.settle(JobStatus::Failed, Some("csvs/x.csv".to_string()), Utc::now());

    assert_eq!(result, Err(JobTransitionError::UnexpectedDownloadUrl));
}

#[test]
fn given_new_job_when_created_then_timestamp_has_microsecond_precision() {
    for _ in 0..20 {
        let job = new_job();
        assert_eq!(job.created_at.timestamp_subsec_nanos() % 1_000, 0);
    }
}
