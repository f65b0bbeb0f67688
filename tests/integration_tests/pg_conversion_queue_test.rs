use racesheet::application::ports::{ConversionQueue, JobDispatcher, JobRepository};
use racesheet::domain::{ConversionRequest, Job, StoragePath};

use crate::helpers::TestPostgres;

async fn enqueue_job(pg: &TestPostgres, title: &str) -> ConversionRequest {
    let job = Job::new(title.to_string(), StoragePath::from_raw("uploads/derby.pdf"));
    pg.job_repository.insert(&job).await.unwrap();
    let request = ConversionRequest {
        job_id: job.id,
        pdf_path: job.pdf_path,
    };
    pg.queue.dispatch(request.clone()).await.unwrap();
    request
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_enqueued_requests_when_claiming_then_fifo_and_each_delivered_once() {
    let pg = TestPostgres::new().await;
    let first = enqueue_job(&pg, "Heat 1").await;
    let second = enqueue_job(&pg, "Heat 2").await;

    assert_eq!(pg.queue.claim_next().await.unwrap(), Some(first));
    assert_eq!(pg.queue.claim_next().await.unwrap(), Some(second));
    assert_eq!(pg.queue.claim_next().await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_concurrent_claimers_when_claiming_then_no_request_is_shared() {
    let pg = TestPostgres::new().await;
    for i in 0..4 {
        enqueue_job(&pg, &format!("Heat {i}")).await;
    }

    let claims = futures::future::join_all((0..6).map(|_| pg.queue.claim_next())).await;
    let mut claimed: Vec<_> = claims
        .into_iter()
        .filter_map(|c| c.unwrap())
        .map(|r| r.job_id)
        .collect();
    while let Some(request) = pg.queue.claim_next().await.unwrap() {
        claimed.push(request.job_id);
    }
    let total = claimed.len();
    claimed.sort();
    claimed.dedup();

    assert_eq!(total, 4);
    assert_eq!(claimed.len(), 4);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_deleted_job_when_claiming_then_queue_row_was_cascaded() {
    let pg = TestPostgres::new().await;
    let request = enqueue_job(&pg, "Heat 1").await;

    pg.job_repository.delete(request.job_id).await.unwrap();

    assert_eq!(pg.queue.claim_next().await.unwrap(), None);
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM conversion_queue")
        .fetch_one(&pg.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
