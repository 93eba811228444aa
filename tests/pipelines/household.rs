use chrono::NaiveDate;
use dais::core::household::HouseholdStore;
use dais::core::json_store::load_household_store;
use dais::pipelines::household::{DEFAULT_STALE_AFTER_DAYS, build_daily_briefing};
use std::path::Path;

fn fixture_store() -> HouseholdStore {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/household-store.json");
    load_household_store(&path).expect("load household fixture")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

#[test]
fn test_daily_briefing_focus() {
    let briefing = build_daily_briefing(&fixture_store(), monday(), DEFAULT_STALE_AFTER_DAYS);
    assert_eq!(briefing.weekday, 1);
    assert_eq!(briefing.stats.total_cards, 1);
    assert_eq!(briefing.stats.total_tasks, 2);
    assert_eq!(briefing.stats.completed_tasks, 1);
    assert!((briefing.stats.completion_ratio - 0.5).abs() < 1e-9);
}

#[test]
fn test_focus_card_grades_against_latest_entry() {
    let briefing = build_daily_briefing(&fixture_store(), monday(), DEFAULT_STALE_AFTER_DAYS);
    let kitchen = &briefing.focus_cards[0];
    assert_eq!(kitchen.card_id, "card-monday-kitchen");
    // The dangling "task-retired" reference is dropped from the checklist.
    assert_eq!(kitchen.tasks.len(), 2);
    assert!(kitchen.tasks.iter().any(|t| t.task_id == "task-dishes" && t.completed));
    assert!(kitchen.tasks.iter().any(|t| t.task_id == "task-floor" && !t.completed));
    assert_eq!(kitchen.staleness_days, Some(0));
    assert!(kitchen.last_run_at.is_some());
}

#[test]
fn test_overdue_cards() {
    let briefing = build_daily_briefing(&fixture_store(), monday(), DEFAULT_STALE_AFTER_DAYS);
    let overdue_ids: Vec<&str> = briefing
        .overdue_cards
        .iter()
        .map(|card| card.card_id.as_str())
        .collect();
    assert_eq!(overdue_ids, vec!["card-wednesday-garden"]);
    assert_eq!(briefing.overdue_cards[0].staleness_days, Some(12));
    assert!(
        briefing
            .recommendations
            .iter()
            .any(|note| note.contains("ueberfaellig") && note.contains("Garten Mittwoch"))
    );
}

#[test]
fn test_overdue_never_contains_todays_cards() {
    let store = fixture_store();
    for day in 1..=31 {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        let briefing = build_daily_briefing(&store, date, DEFAULT_STALE_AFTER_DAYS);
        assert!(briefing.overdue_cards.len() <= 3);
        for card in &briefing.overdue_cards {
            assert_ne!(card.weekday, i64::from(briefing.weekday));
        }
    }
}

#[test]
fn test_completion_ratio_stays_in_unit_interval() {
    let store = fixture_store();
    let briefing = build_daily_briefing(&store, monday(), DEFAULT_STALE_AFTER_DAYS);
    for card in briefing.focus_cards.iter().chain(&briefing.overdue_cards) {
        assert!((0.0..=1.0).contains(&card.completion_ratio));
        match card.staleness_days {
            Some(days) => assert!(days >= 0),
            None => assert!(card.last_run_at.is_none()),
        }
    }
}

#[test]
fn test_raised_threshold_clears_overdue_list() {
    let briefing = build_daily_briefing(&fixture_store(), monday(), 30);
    assert!(briefing.overdue_cards.is_empty());
    // With nothing overdue, only the completion note remains.
    assert_eq!(briefing.recommendations.len(), 1);
    assert!(briefing.recommendations[0].contains("25-Minuten-Block"));
}

#[test]
fn test_briefing_is_idempotent() {
    let store = fixture_store();
    let first = build_daily_briefing(&store, monday(), DEFAULT_STALE_AFTER_DAYS);
    let second = build_daily_briefing(&store, monday(), DEFAULT_STALE_AFTER_DAYS);
    assert_eq!(first, second);
}
