//! Derivation pipelines: pure functions from a loaded store and a reference
//! date to an aggregate briefing value.

pub mod household;
pub mod human_contact;
