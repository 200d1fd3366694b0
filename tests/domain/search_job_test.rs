use std::time::Duration;

use reelsearch::domain::{
    ComputationOutcome, ComputationState, Entry, JobTimings, JobView, SearchJob, SearchReference,
    Timestamp, VisibleState,
};

fn job_submitted_at(millis: u64) -> SearchJob {
    SearchJob::new(
        SearchReference::new(),
        "love".to_string(),
        Timestamp::from_millis(millis),
        &JobTimings::new(Duration::from_millis(500), Duration::from_secs(60)),
    )
}

fn entries() -> Vec<Entry> {
    vec![Entry::new("Coupling"), Entry::new("Love Hina")]
}

fn at(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

#[test]
fn given_new_job_when_created_then_windows_follow_timings() {
    let job = job_submitted_at(1_000);

    assert_eq!(job.submitted_at, at(1_000));
    assert_eq!(job.ready_at, at(1_500));
    assert_eq!(job.expires_at, at(61_500));
    assert_eq!(job.computation_state(), ComputationState::Running);
    assert!(job.entries().is_empty());
}

#[test]
fn given_huge_timings_when_created_then_windows_saturate_in_order() {
    let job = SearchJob::new(
        SearchReference::new(),
        "q".to_string(),
        at(u64::MAX - 10),
        &JobTimings::new(Duration::from_millis(100), Duration::MAX),
    );

    assert!(job.submitted_at <= job.ready_at);
    assert!(job.ready_at <= job.expires_at);
    assert_eq!(job.expires_at, at(u64::MAX));
}

#[test]
fn given_time_before_ready_when_viewing_then_pending_whatever_the_outcome() {
    let running = job_submitted_at(0);
    let completed = job_submitted_at(0);
    completed
        .complete(ComputationOutcome::completed(entries()))
        .unwrap();
    let failed = job_submitted_at(0);
    failed
        .complete(ComputationOutcome::Failed("boom".to_string()))
        .unwrap();

    for now in [0, 1, 250, 499] {
        assert_eq!(running.visible_state(at(now)), JobView::Pending);
        assert_eq!(completed.visible_state(at(now)), JobView::Pending);
        assert_eq!(failed.visible_state(at(now)), JobView::Pending);
    }
}

#[test]
fn given_completed_job_inside_window_when_viewing_then_ready_with_entries_in_order() {
    let job = job_submitted_at(0);
    job.complete(ComputationOutcome::completed(entries()))
        .unwrap();

    for now in [500, 30_000, 60_499] {
        let view = job.visible_state(at(now));
        assert_eq!(view.state(), VisibleState::Ready);
        assert_eq!(view.entries().unwrap(), entries().as_slice());
    }
}

#[test]
fn given_running_job_inside_window_when_viewing_then_still_computing() {
    let job = job_submitted_at(0);

    assert_eq!(job.visible_state(at(500)), JobView::StillComputing);
    assert_eq!(job.visible_state(at(60_499)), JobView::StillComputing);
}

#[test]
fn given_failed_job_inside_window_when_viewing_then_failed_with_message() {
    let job = job_submitted_at(0);
    job.complete(ComputationOutcome::Failed("index unavailable".to_string()))
        .unwrap();

    assert_eq!(
        job.visible_state(at(700)),
        JobView::Failed("index unavailable".to_string())
    );
    assert!(job.entries().is_empty());
}

#[test]
fn given_time_at_or_after_expiry_when_viewing_then_gone_whatever_the_outcome() {
    let running = job_submitted_at(0);
    let completed = job_submitted_at(0);
    completed
        .complete(ComputationOutcome::completed(entries()))
        .unwrap();

    for now in [60_500, 60_501, 30 * 60 * 1000, u64::MAX] {
        assert_eq!(running.visible_state(at(now)), JobView::Gone);
        assert_eq!(completed.visible_state(at(now)), JobView::Gone);
    }
}

#[test]
fn given_zero_ttl_when_viewing_at_ready_time_then_gone() {
    let job = SearchJob::new(
        SearchReference::new(),
        "q".to_string(),
        at(10),
        &JobTimings::new(Duration::from_millis(5), Duration::ZERO),
    );

    assert_eq!(job.visible_state(at(14)), JobView::Pending);
    assert_eq!(job.visible_state(at(15)), JobView::Gone);
}

#[test]
fn given_increasing_time_when_viewing_then_state_never_regresses() {
    let job = job_submitted_at(100);
    let mut previous = VisibleState::Pending;

    for now in (0..70_000).step_by(97) {
        if now == 3_000 {
            job.complete(ComputationOutcome::completed(entries()))
                .unwrap();
        }
        let state = job.visible_state(at(now)).state();
        assert!(
            state >= previous,
            "state went from {} back to {} at {}",
            previous,
            state,
            now
        );
        previous = state;
    }
    assert_eq!(previous, VisibleState::Gone);
}

#[test]
fn given_same_time_when_viewing_twice_then_results_are_identical() {
    let job = job_submitted_at(0);
    job.complete(ComputationOutcome::completed(entries()))
        .unwrap();

    assert_eq!(job.visible_state(at(800)), job.visible_state(at(800)));
    assert_eq!(job.visible_state(at(100)), job.visible_state(at(100)));
}

#[test]
fn given_completed_job_when_completing_again_then_second_outcome_is_rejected() {
    let job = job_submitted_at(0);
    job.complete(ComputationOutcome::completed(entries()))
        .unwrap();

    let rejected = job.complete(ComputationOutcome::Failed("late".to_string()));

    assert_eq!(
        rejected,
        Err(ComputationOutcome::Failed("late".to_string()))
    );
    assert_eq!(job.computation_state(), ComputationState::Completed);
    assert_eq!(job.entries(), entries().as_slice());
}
