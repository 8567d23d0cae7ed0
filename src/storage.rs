use std::path::PathBuf;

use thiserror::Error;

use crate::models::task::Task;

pub mod json;

/// The fixed key the task collection lives under in the persistence medium.
pub const STORE_KEY: &str = "tasks";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read tasks from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tasks from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write tasks to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize tasks to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create backup at '{path}': {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clean up old backups in '{dir}': {source}")]
    CleanupFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable key-value medium for the task collection.
///
/// `load` yields an empty collection when nothing has been stored yet; a
/// stored value that no longer parses surfaces as `ParseFailed` and is
/// downgraded by the caller. `save` overwrites the whole value every time.
pub trait Storage {
    fn load(&self) -> Result<Vec<Task>, StorageError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}
