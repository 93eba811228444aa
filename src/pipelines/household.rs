//! Daily briefing derivation for household routines.
//!
//! `build_daily_briefing` is a pure function over an already-loaded store:
//! it selects the cards scheduled for the reference weekday, grades their
//! completion against the latest entries, surfaces stale cards from the rest
//! of the week and derives short textual recommendations.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::household::{HouseholdCard, HouseholdStore, Task};
use crate::core::time;

/// Days without a completion before a card counts as stale.
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 7;

/// How many overdue candidates a briefing surfaces at most.
const OVERDUE_LIMIT: usize = 3;

/// One resolved task of a card, graded against the latest entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatus {
    pub task_id: String,
    pub label: String,
    pub completed: bool,
}

/// Per-card view: resolved tasks, last completion and staleness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardBriefing {
    pub card_id: String,
    pub title: String,
    pub summary: String,
    pub weekday: i64,
    pub last_run_at: Option<DateTime<Utc>>,
    /// Days since the last completion, floored at zero. `None` when the
    /// card has never been completed.
    pub staleness_days: Option<i64>,
    pub completion_ratio: f64,
    pub tasks: Vec<TaskStatus>,
}

/// Aggregates over the focus cards only; overdue cards do not count here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub total_cards: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBriefing {
    pub weekday: u32,
    pub focus_cards: Vec<CardBriefing>,
    pub overdue_cards: Vec<CardBriefing>,
    pub stats: DailyStats,
    pub recommendations: Vec<String>,
}

/// Derive the daily briefing for `reference_date`.
pub fn build_daily_briefing(
    store: &HouseholdStore,
    reference_date: NaiveDate,
    stale_after_days: i64,
) -> DailyBriefing {
    let weekday = time::iso_weekday(reference_date);
    let tasks_by_id = store.task_lookup();

    let mut focus = store.cards_for_weekday(weekday);
    focus.sort_by(|a, b| a.title.cmp(&b.title));
    let focus_cards: Vec<CardBriefing> = focus
        .into_iter()
        .map(|card| build_card_briefing(card, store, &tasks_by_id, reference_date))
        .collect();

    let overdue_cards: Vec<CardBriefing> =
        overdue_candidates(store, weekday, reference_date, stale_after_days)
            .into_iter()
            .map(|card| build_card_briefing(card, store, &tasks_by_id, reference_date))
            .collect();

    let stats = build_stats(&focus_cards);
    let recommendations = build_recommendations(&stats, &overdue_cards);

    DailyBriefing {
        weekday,
        focus_cards,
        overdue_cards,
        stats,
        recommendations,
    }
}

fn build_card_briefing(
    card: &HouseholdCard,
    store: &HouseholdStore,
    tasks_by_id: &FxHashMap<&str, &Task>,
    reference_date: NaiveDate,
) -> CardBriefing {
    let entry = store.latest_entry_for_card(&card.id);
    let completed_ids: HashSet<&str> = entry
        .map(|e| e.completed_task_ids.iter().map(String::as_str).collect())
        .unwrap_or_default();

    // Task ids with no matching task are skipped, not errors.
    let tasks: Vec<TaskStatus> = card
        .task_ids
        .iter()
        .filter_map(|task_id| tasks_by_id.get(task_id.as_str()))
        .map(|task| TaskStatus {
            task_id: task.id.clone(),
            label: task.label.clone(),
            completed: completed_ids.contains(task.id.as_str()),
        })
        .collect();

    let last_run_at = entry.map(|e| e.created_at);
    let staleness_days = staleness_days(last_run_at, reference_date);

    CardBriefing {
        card_id: card.id.clone(),
        title: card.title.clone(),
        summary: card.summary.clone(),
        weekday: card.weekday,
        last_run_at,
        staleness_days,
        completion_ratio: completion_ratio(&tasks),
        tasks,
    }
}

fn completion_ratio(tasks: &[TaskStatus]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    completed as f64 / tasks.len() as f64
}

fn staleness_days(last_run_at: Option<DateTime<Utc>>, reference_date: NaiveDate) -> Option<i64> {
    last_run_at.map(|run| time::days_since(run.date_naive(), reference_date))
}

fn build_stats(cards: &[CardBriefing]) -> DailyStats {
    let total_tasks: usize = cards.iter().map(|card| card.tasks.len()).sum();
    let completed_tasks: usize = cards
        .iter()
        .map(|card| card.tasks.iter().filter(|task| task.completed).count())
        .sum();
    let completion_ratio = if total_tasks == 0 {
        0.0
    } else {
        completed_tasks as f64 / total_tasks as f64
    };
    DailyStats {
        total_cards: cards.len(),
        total_tasks,
        completed_tasks,
        completion_ratio,
    }
}

fn build_recommendations(stats: &DailyStats, overdue_cards: &[CardBriefing]) -> Vec<String> {
    let mut notes = Vec::new();
    if stats.total_tasks == 0 {
        notes.push("Keine Karten geplant. Nutze das Zeitfenster fuer Planung oder Backlog.".to_string());
    } else if stats.completion_ratio < 0.75 {
        notes.push(
            "Plane mindestens einen fokussierten 25-Minuten-Block, da weniger als 75% abgeschlossen wurden."
                .to_string(),
        );
    }

    if let Some(top_card) = overdue_cards.first() {
        notes.push(format!(
            "Karte '{}' ist ueberfaellig - ziehe sie als erstes in den heutigen Fokus.",
            top_card.title
        ));
    }

    notes
}

/// Cards not scheduled today that are stale enough to warrant attention,
/// ranked most-stale first, capped at [`OVERDUE_LIMIT`].
///
/// A card with no history scores `stale_after_days + 1`, which can rank it
/// below a card that is stale by more than the threshold.
fn overdue_candidates(
    store: &HouseholdStore,
    weekday: u32,
    reference_date: NaiveDate,
    stale_after_days: i64,
) -> Vec<&HouseholdCard> {
    let mut results: Vec<(i64, &HouseholdCard)> = Vec::new();
    for card in &store.cards {
        if card.weekday == i64::from(weekday) {
            continue;
        }
        let last_run_at = store.latest_entry_for_card(&card.id).map(|e| e.created_at);
        let days = staleness_days(last_run_at, reference_date);
        match days {
            None => results.push((stale_after_days + 1, card)),
            Some(days) if days >= stale_after_days => results.push((days, card)),
            Some(_) => {}
        }
    }

    results.sort_by(|a, b| b.0.cmp(&a.0));
    results
        .into_iter()
        .take(OVERDUE_LIMIT)
        .map(|(_, card)| card)
        .collect()
}
