use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaisError {
    #[error("Store not found: {}", .0.display())]
    StoreNotFound(PathBuf),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
