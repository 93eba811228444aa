//! Contact radar derivation for the human-contact ledger.
//!
//! Every assignment resolves to a due date from its cadence and the most
//! recent matching log (falling back to the assignment's creation date),
//! then lands in exactly one of three buckets based on the sign of
//! `due_in_days`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::core::human_contact::{Cadence, HumanContactStore};

/// Classification of a single assignment relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactState {
    Overdue,
    Due,
    Upcoming,
}

impl ContactState {
    pub fn from_due_in_days(due_in_days: i64) -> Self {
        if due_in_days < 0 {
            ContactState::Overdue
        } else if due_in_days == 0 {
            ContactState::Due
        } else {
            ContactState::Upcoming
        }
    }
}

/// One assignment graded against the reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactStatus {
    pub person_id: String,
    pub name: String,
    pub relation: String,
    pub activity: String,
    pub cadence: String,
    pub due_in_days: i64,
    pub last_touch: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub status: ContactState,
}

/// Counts per bucket. Bucket counts are over assignments, so one person
/// with two assignments counts twice; `total_people` is over persons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSummary {
    pub total_people: usize,
    pub overdue_assignments: usize,
    pub due_today: usize,
    pub upcoming_assignments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRadar {
    pub overdue: Vec<ContactStatus>,
    pub due_today: Vec<ContactStatus>,
    pub upcoming: Vec<ContactStatus>,
    pub summary: ContactSummary,
}

/// Derive the three-bucket contact radar for `reference_date`.
pub fn build_contact_radar(store: &HumanContactStore, reference_date: NaiveDate) -> ContactRadar {
    let persons = store.person_lookup();

    let mut overdue = Vec::new();
    let mut due_today = Vec::new();
    let mut upcoming = Vec::new();

    for assignment in &store.assignments {
        // Assignments pointing at unknown persons are dropped silently.
        let Some(person) = persons.get(assignment.person_id.as_str()) else {
            continue;
        };
        let last_log = store.latest_log_for(&assignment.person_id, &assignment.activity);
        let cadence_days = Cadence::from_cadence_str(&assignment.cadence).days();
        let base = last_log
            .map(|log| log.created_at.date_naive())
            .unwrap_or_else(|| assignment.created_at.date_naive());
        let next_due = base + Duration::days(cadence_days);
        let due_in_days = (next_due - reference_date).num_days();

        let status = ContactStatus {
            person_id: person.id.clone(),
            name: person.name.clone(),
            relation: person.relation.clone(),
            activity: assignment.activity.clone(),
            cadence: assignment.cadence.clone(),
            due_in_days,
            last_touch: last_log.map(|log| log.created_at),
            note: person.note.clone(),
            status: ContactState::from_due_in_days(due_in_days),
        };

        match status.status {
            ContactState::Overdue => overdue.push(status),
            ContactState::Due => due_today.push(status),
            ContactState::Upcoming => upcoming.push(status),
        }
    }

    overdue.sort_by_key(|status| status.due_in_days);
    due_today.sort_by(|a, b| a.name.cmp(&b.name));
    upcoming.sort_by_key(|status| status.due_in_days);

    let summary = ContactSummary {
        total_people: persons.len(),
        overdue_assignments: overdue.len(),
        due_today: due_today.len(),
        upcoming_assignments: upcoming.len(),
    };

    ContactRadar {
        overdue,
        due_today,
        upcoming,
        summary,
    }
}
