//! Immutable human-contact records and their aggregate store.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::core::error::DaisError;
use crate::core::fields::{Record, int_or, nullable_str, records_in, required_str, str_or};
use crate::core::time;

/// Recurrence interval for contacting a person about an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    EveryOtherDay,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
}

impl Cadence {
    /// Lenient parse of a stored cadence string. Unknown values resolve to
    /// weekly; the raw string is kept on the assignment for output.
    pub fn from_cadence_str(s: &str) -> Self {
        match s {
            "daily" => Cadence::Daily,
            "every_other_day" => Cadence::EveryOtherDay,
            "biweekly" => Cadence::Biweekly,
            "monthly" => Cadence::Monthly,
            "quarterly" => Cadence::Quarterly,
            _ => Cadence::Weekly,
        }
    }

    /// Expected days between touches.
    pub fn days(self) -> i64 {
        match self {
            Cadence::Daily => 1,
            Cadence::EveryOtherDay => 2,
            Cadence::Weekly => 7,
            Cadence::Biweekly => 14,
            Cadence::Monthly => 30,
            Cadence::Quarterly => 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub relation: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        Ok(Self {
            id: required_str(record, "person", "id")?,
            name: required_str(record, "person", "name")?,
            relation: str_or(record, "relation", "unknown"),
            note: nullable_str(record, "note"),
            created_at: time::parse_timestamp(record.get("createdAt")),
            updated_at: time::parse_timestamp(record.get("updatedAt")),
        })
    }
}

/// A recurring outreach obligation: contact person X about activity Y every
/// cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactAssignment {
    pub id: String,
    pub person_id: String,
    pub activity: String,
    pub cadence: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactAssignment {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        Ok(Self {
            id: required_str(record, "assignment", "id")?,
            person_id: required_str(record, "assignment", "personId")?,
            activity: str_or(record, "activity", ""),
            cadence: str_or(record, "cadence", "weekly"),
            created_at: time::parse_timestamp(record.get("createdAt")),
            updated_at: time::parse_timestamp(record.get("updatedAt")),
        })
    }
}

/// One instance of outreach actually performed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactLog {
    pub id: String,
    pub person_id: String,
    pub activity: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContactLog {
    pub fn from_value(record: &Record) -> Result<Self, DaisError> {
        Ok(Self {
            id: required_str(record, "log", "id")?,
            person_id: required_str(record, "log", "personId")?,
            activity: str_or(record, "activity", ""),
            note: nullable_str(record, "note"),
            created_at: time::parse_timestamp(record.get("createdAt")),
        })
    }
}

/// The human-contact asset: persons, outreach assignments and touch logs.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanContactStore {
    pub version: i64,
    pub persons: Vec<Person>,
    pub assignments: Vec<ContactAssignment>,
    pub logs: Vec<ContactLog>,
}

impl HumanContactStore {
    pub fn from_value(root: &Value) -> Result<Self, DaisError> {
        let record = root.as_object().ok_or_else(|| {
            DaisError::MalformedRecord("human-contact store root must be an object".to_string())
        })?;
        Ok(Self {
            version: int_or(record, "version", 1),
            persons: records_in(record, "human-contact store", "persons")?
                .into_iter()
                .map(Person::from_value)
                .collect::<Result<_, _>>()?,
            assignments: records_in(record, "human-contact store", "assignments")?
                .into_iter()
                .map(ContactAssignment::from_value)
                .collect::<Result<_, _>>()?,
            logs: records_in(record, "human-contact store", "logs")?
                .into_iter()
                .map(ContactLog::from_value)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Index from person id to person. Duplicate ids collapse to one slot.
    pub fn person_lookup(&self) -> FxHashMap<&str, &Person> {
        self.persons
            .iter()
            .map(|person| (person.id.as_str(), person))
            .collect()
    }

    /// Most recent log for a (person, activity) pair by `created_at`.
    /// Behavior on exact-duplicate timestamps is unspecified.
    pub fn latest_log_for(&self, person_id: &str, activity: &str) -> Option<&ContactLog> {
        self.logs
            .iter()
            .filter(|log| log.person_id == person_id && log.activity == activity)
            .max_by_key(|log| log.created_at)
    }
}
