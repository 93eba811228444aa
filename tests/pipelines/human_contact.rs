use chrono::NaiveDate;
use dais::core::human_contact::HumanContactStore;
use dais::core::json_store::load_human_contact_store;
use dais::pipelines::human_contact::{ContactState, build_contact_radar};
use std::path::Path;

fn fixture_store() -> HumanContactStore {
    let path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/human-contact-store.json");
    load_human_contact_store(&path).expect("load human-contact fixture")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

#[test]
fn test_contact_radar() {
    let radar = build_contact_radar(&fixture_store(), monday());
    assert_eq!(radar.summary.total_people, 4);
    assert!(radar.overdue.iter().any(|s| s.person_id == "person-dora"));
    assert!(radar.due_today.iter().any(|s| s.person_id == "person-ben"));
    assert!(radar.upcoming.iter().any(|s| s.person_id == "person-anna"));
}

#[test]
fn test_summary_counts_assignments_not_persons() {
    let radar = build_contact_radar(&fixture_store(), monday());
    // Anna carries two assignments and lands in the upcoming bucket twice.
    assert_eq!(radar.summary.upcoming_assignments, 2);
    assert_eq!(radar.summary.due_today, 2);
    assert_eq!(radar.summary.overdue_assignments, 1);
    assert_eq!(radar.overdue.len(), 1);
    assert_eq!(radar.due_today.len(), 2);
    assert_eq!(radar.upcoming.len(), 2);
}

#[test]
fn test_buckets_partition_by_sign() {
    let radar = build_contact_radar(&fixture_store(), monday());
    for status in &radar.overdue {
        assert!(status.due_in_days < 0);
        assert_eq!(status.status, ContactState::Overdue);
    }
    for status in &radar.due_today {
        assert_eq!(status.due_in_days, 0);
        assert_eq!(status.status, ContactState::Due);
    }
    for status in &radar.upcoming {
        assert!(status.due_in_days > 0);
        assert_eq!(status.status, ContactState::Upcoming);
    }
}

#[test]
fn test_dora_due_date_uses_latest_visit_log() {
    let radar = build_contact_radar(&fixture_store(), monday());
    let dora = &radar.overdue[0];
    assert_eq!(dora.person_id, "person-dora");
    // Latest visit log 2024-11-20 + monthly (30 days) = 2024-12-20.
    assert_eq!(dora.due_in_days, -17);
    assert_eq!(dora.cadence, "monthly");
}

#[test]
fn test_unknown_cadence_resolves_to_weekly() {
    let radar = build_contact_radar(&fixture_store(), monday());
    let letter = radar
        .upcoming
        .iter()
        .find(|s| s.activity == "letter")
        .expect("letter assignment present");
    // Created 2025-01-04 with an unrecognized cadence: 7-day default.
    assert_eq!(letter.cadence, "sometimes");
    assert_eq!(letter.due_in_days, 5);
    assert_eq!(letter.last_touch, None);
}

#[test]
fn test_no_log_falls_back_to_assignment_creation() {
    let radar = build_contact_radar(&fixture_store(), monday());
    let chris = radar
        .due_today
        .iter()
        .find(|s| s.person_id == "person-chris")
        .expect("chris assignment present");
    assert_eq!(chris.due_in_days, 0);
    assert_eq!(chris.last_touch, None);
}

#[test]
fn test_dangling_assignment_is_ignored() {
    let radar = build_contact_radar(&fixture_store(), monday());
    let all = radar
        .overdue
        .iter()
        .chain(&radar.due_today)
        .chain(&radar.upcoming);
    assert!(all.into_iter().all(|s| s.person_id != "person-ghost"));
    assert_eq!(radar.summary.total_people, 4);
}

#[test]
fn test_bucket_sort_orders() {
    let radar = build_contact_radar(&fixture_store(), monday());
    let due_today_names: Vec<&str> = radar.due_today.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(due_today_names, vec!["Ben", "Chris"]);
    let upcoming_days: Vec<i64> = radar.upcoming.iter().map(|s| s.due_in_days).collect();
    assert_eq!(upcoming_days, vec![4, 5]);
}

#[test]
fn test_radar_is_idempotent() {
    let store = fixture_store();
    let first = build_contact_radar(&store, monday());
    let second = build_contact_radar(&store, monday());
    assert_eq!(first, second);
}
