//! Immutable household records and their aggregate store.
//!
//! A store is constructed once from a JSON asset and never mutated. Records
//! reference each other only by string identifier; references that resolve
//! to nothing are tolerated here and ignored by the pipelines.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::core::error::DaisError;
use crate::core::fields::{
    Record, bool_or, int_or, nullable_str, records_in, required_str, str_list, str_or,
};
use crate::core::time;

/// A single reusable chore step referenced by cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub label: String,
    pub order: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        Ok(Self {
            id: required_str(record, "task", "id")?,
            label: required_str(record, "task", "label")?,
            order: int_or(record, "order", 0),
            active: bool_or(record, "active", true),
            created_at: time::parse_timestamp(record.get("createdAt")),
            updated_at: time::parse_timestamp(record.get("updatedAt")),
        })
    }
}

/// A weekday-scheduled chore routine referencing tasks by id.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdCard {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// ISO weekday the card is scheduled for (1 = Monday .. 7 = Sunday).
    pub weekday: i64,
    pub task_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HouseholdCard {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        Ok(Self {
            id: required_str(record, "card", "id")?,
            title: required_str(record, "card", "title")?,
            summary: str_or(record, "summary", ""),
            weekday: int_or(record, "weekday", 1),
            task_ids: str_list(record, "taskIds"),
            created_at: time::parse_timestamp(record.get("createdAt")),
            updated_at: time::parse_timestamp(record.get("updatedAt")),
        })
    }
}

/// One task row inside a card snapshot. Identity comes from the embedded
/// `task` object when present, falling back to the row's `taskId`.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSnapshotTask {
    pub id: String,
    pub label: String,
    pub order: i64,
}

impl CardSnapshotTask {
    pub fn from_value(record: &Record) -> Self {
        let task = record.get("task").and_then(Value::as_object);
        let id = task
            .map(|t| str_or(t, "id", ""))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| str_or(record, "taskId", ""));
        let label = task.map(|t| str_or(t, "label", "")).unwrap_or_default();
        let order = match task {
            Some(t) => int_or(record, "order", int_or(t, "order", 0)),
            None => int_or(record, "order", 0),
        };
        Self { id, label, order }
    }
}

/// Frozen copy of a card captured at completion time, independent of later
/// edits to the live card.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdCardSnapshot {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub weekday: i64,
    pub task_ids: Vec<String>,
    pub tasks: Vec<CardSnapshotTask>,
}

impl HouseholdCardSnapshot {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        Ok(Self {
            id: str_or(record, "id", ""),
            title: str_or(record, "title", ""),
            summary: str_or(record, "summary", ""),
            weekday: int_or(record, "weekday", 1),
            task_ids: str_list(record, "taskIds"),
            tasks: records_in(record, "card snapshot", "tasks")?
                .into_iter()
                .map(CardSnapshotTask::from_value)
                .collect(),
        })
    }
}

/// One completion event for one card.
///
/// `completed_task_ids` keeps the sequence as recorded; duplicates are not
/// collapsed here.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdEntry {
    pub id: String,
    pub card_id: String,
    pub user_id: String,
    pub program_run_id: Option<String>,
    pub completed_task_ids: Vec<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub card_snapshot: Option<HouseholdCardSnapshot>,
}

impl HouseholdEntry {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        let card_snapshot = match record.get("cardSnapshot").and_then(Value::as_object) {
            Some(snapshot) => Some(HouseholdCardSnapshot::from_value(snapshot)?),
            None => None,
        };
        Ok(Self {
            id: str_or(record, "id", ""),
            card_id: str_or(record, "cardId", ""),
            user_id: str_or(record, "userId", ""),
            program_run_id: nullable_str(record, "programRunId"),
            completed_task_ids: str_list(record, "completedTaskIds"),
            note: nullable_str(record, "note"),
            created_at: time::parse_timestamp(record.get("createdAt")),
            card_snapshot,
        })
    }
}

/// The household asset: all tasks, cards and completion entries.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdStore {
    pub version: i64,
    pub tasks: Vec<Task>,
    pub cards: Vec<HouseholdCard>,
    pub entries: Vec<HouseholdEntry>,
}

impl HouseholdStore {
    pub fn from_value(root: &Value) -> Result<Self, DaisError> {
        let record = root.as_object().ok_or_else(|| {
            DaisError::MalformedRecord("household store root must be an object".to_string())
        })?;
        Ok(Self {
            version: int_or(record, "version", 1),
            tasks: records_in(record, "household store", "tasks")?
                .into_iter()
                .map(Task::from_value)
                .collect::<Result<_, _>>()?,
            cards: records_in(record, "household store", "cards")?
                .into_iter()
                .map(HouseholdCard::from_value)
                .collect::<Result<_, _>>()?,
            entries: records_in(record, "household store", "entries")?
                .into_iter()
                .map(HouseholdEntry::from_value)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Cards scheduled for the given ISO weekday, in store order.
    pub fn cards_for_weekday(&self, weekday: u32) -> Vec<&HouseholdCard> {
        self.cards
            .iter()
            .filter(|card| card.weekday == i64::from(weekday))
            .collect()
    }

    /// Most recent completion entry for a card by `created_at`. Behavior on
    /// exact-duplicate timestamps is unspecified.
    pub fn latest_entry_for_card(&self, card_id: &str) -> Option<&HouseholdEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.card_id == card_id)
            .max_by_key(|entry| entry.created_at)
    }

    /// Index from task id to task.
    pub fn task_lookup(&self) -> FxHashMap<&str, &Task> {
        self.tasks
            .iter()
            .map(|task| (task.id.as_str(), task))
            .collect()
    }
}
