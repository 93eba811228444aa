//! Reading the JSON asset stores from disk.
//!
//! Paths always come in as parameters; there is no process-relative default
//! layout. A missing file surfaces before any parsing starts.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::error::DaisError;
use crate::core::household::HouseholdStore;
use crate::core::human_contact::HumanContactStore;

fn load_json(path: &Path) -> Result<Value, DaisError> {
    if !path.exists() {
        return Err(DaisError::StoreNotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn load_household_store(path: &Path) -> Result<HouseholdStore, DaisError> {
    HouseholdStore::from_value(&load_json(path)?)
}

pub fn load_human_contact_store(path: &Path) -> Result<HumanContactStore, DaisError> {
    HumanContactStore::from_value(&load_json(path)?)
}
