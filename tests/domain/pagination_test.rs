use racesheet::domain::{Job, JobPage, PageRequest, StoragePath};

fn jobs(n: usize) -> Vec<Job> {
    (0..n)
        .map(|i| Job::new(format!("job {i}"), StoragePath::from_raw("uploads/a.pdf")))
        .collect()
}

#[test]
fn given_zero_page_or_limit_when_building_request_then_rejected() {
    assert!(PageRequest::new(0, 10).is_none());
    assert!(PageRequest::new(1, 0).is_none());
}

#[test]
fn given_third_page_of_two_when_computing_offset_then_skips_four() {
    let request = PageRequest::new(3, 2).unwrap();
    assert_eq!(request.offset(), 4);
}

#[test]
fn given_lookahead_row_when_building_page_then_truncates_and_flags_next_page() {
    let page = JobPage::from_lookahead(jobs(3), 2);

    assert_eq!(page.items.len(), 2);
    assert!(page.has_next_page);
}

#[test]
fn given_exactly_limit_rows_when_building_page_then_no_next_page() {
    let page = JobPage::from_lookahead(jobs(2), 2);

    assert_eq!(page.items.len(), 2);
    assert!(!page.has_next_page);
}
