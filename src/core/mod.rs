//! Core modules: the immutable data model and shared primitives.
//!
//! Everything here is loaded once per run and read-only afterwards. The
//! derivation logic that consumes these types lives in [`crate::pipelines`].

pub mod error;
pub mod fields;
pub mod household;
pub mod human_contact;
pub mod json_store;
pub mod output;
pub mod time;
