use chrono::NaiveDate;
use dais::coordinator::{generate_briefing, render_briefing_text};
use dais::core::household::HouseholdStore;
use dais::core::human_contact::HumanContactStore;
use dais::core::json_store::{load_household_store, load_human_contact_store};
use dais::pipelines::household::DEFAULT_STALE_AFTER_DAYS;
use std::path::Path;

fn fixture_stores() -> (HouseholdStore, HumanContactStore) {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    (
        load_household_store(&base.join("household-store.json")).unwrap(),
        load_human_contact_store(&base.join("human-contact-store.json")).unwrap(),
    )
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

#[test]
fn test_briefing_document_shape() {
    let (household, contacts) = fixture_stores();
    let briefing =
        generate_briefing(&household, &contacts, Some(monday()), DEFAULT_STALE_AFTER_DAYS);
    let payload = briefing.to_value().unwrap();

    assert_eq!(payload["target_date"], "2025-01-06");
    assert!(payload["generated_at"].as_str().unwrap().contains('T'));

    let household = &payload["household"];
    assert_eq!(household["weekday"], 1);
    assert_eq!(household["stats"]["total_tasks"], 2);
    assert_eq!(household["stats"]["completed_tasks"], 1);
    assert_eq!(household["focus_cards"][0]["card_id"], "card-monday-kitchen");
    assert_eq!(
        household["focus_cards"][0]["tasks"][0]["task_id"],
        "task-dishes"
    );
    assert_eq!(household["overdue_cards"][0]["staleness_days"], 12);

    let contacts = &payload["human_contacts"];
    assert_eq!(contacts["summary"]["total_people"], 4);
    assert_eq!(contacts["overdue"][0]["person_id"], "person-dora");
    assert_eq!(contacts["overdue"][0]["status"], "overdue");
    assert_eq!(contacts["due_today"][0]["status"], "due");
    assert!(contacts["due_today"][0]["last_touch"].is_string());
    assert_eq!(contacts["upcoming"][1]["note"], serde_json::Value::Null);
}

#[test]
fn test_json_document_is_sorted_and_parsable() {
    let (household, contacts) = fixture_stores();
    let briefing =
        generate_briefing(&household, &contacts, Some(monday()), DEFAULT_STALE_AFTER_DAYS);
    let rendered = briefing.to_json_pretty().unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(reparsed, briefing.to_value().unwrap());

    let keys: Vec<&String> = reparsed.as_object().unwrap().keys().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_explicit_date_overrides_today() {
    let (household, contacts) = fixture_stores();
    let wednesday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
    let briefing =
        generate_briefing(&household, &contacts, Some(wednesday), DEFAULT_STALE_AFTER_DAYS);
    assert_eq!(briefing.target_date, wednesday);
    assert_eq!(briefing.household.weekday, 3);
    assert_eq!(
        briefing.household.focus_cards[0].card_id,
        "card-wednesday-garden"
    );
}

#[test]
fn test_text_report_names_cards_and_people() {
    let (household, contacts) = fixture_stores();
    let briefing =
        generate_briefing(&household, &contacts, Some(monday()), DEFAULT_STALE_AFTER_DAYS);
    let report = render_briefing_text(&briefing);
    assert!(report.contains("Kueche Montag"));
    assert!(report.contains("Garten Mittwoch"));
    assert!(report.contains("Dora"));
    assert!(report.contains("2025-01-06"));
}
