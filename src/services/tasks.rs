use jiff::civil::{Date, Time};
use thiserror::Error;

use crate::{
    models::{
        store::TaskStore,
        task::{Category, Task},
    },
    storage::{Storage, StorageError},
};

/// Loads the persisted collection, exactly once, before any mutation runs.
///
/// An empty medium is a normal first run. A stored value that no longer
/// parses is reported to the log and downgraded to an empty collection so
/// startup always succeeds with whatever can be read.
pub fn load_tasks(storage: &impl Storage) -> Result<TaskStore, StorageError> {
    match storage.load() {
        Ok(tasks) => Ok(TaskStore::from_tasks(tasks)),
        Err(err @ StorageError::ParseFailed { .. }) => {
            log::warn!("stored tasks are unreadable, starting with an empty list: {err}");
            Ok(TaskStore::new())
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, Error)]
pub enum DueInputError {
    #[error("Invalid due date '{0}': {1}")]
    InvalidDate(String, String),

    #[error("Invalid due time '{0}': {1}")]
    InvalidTime(String, String),
}

/// Empty or whitespace-only input means "no due date".
fn parse_due_date(input: Option<String>) -> Result<Option<Date>, DueInputError> {
    match input.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<Date>()
            .map(Some)
            .map_err(|e| DueInputError::InvalidDate(value.to_owned(), e.to_string())),
    }
}

fn parse_due_time(input: Option<String>) -> Result<Option<Time>, DueInputError> {
    match input.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Time::strptime("%H:%M", value)
            .map(Some)
            .map_err(|e| DueInputError::InvalidTime(value.to_owned(), e.to_string())),
    }
}

#[derive(Debug, Error)]
pub enum AddTaskError {
    #[error(transparent)]
    DueInput(#[from] DueInputError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct AddTaskParameters {
    pub text: String,
    pub category: Option<Category>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
}

/// Appends a new task and saves the collection.
///
/// Returns `Ok(None)` without touching anything when the text trims to
/// empty; the caller decides how to surface that.
pub fn add_task(
    store: &mut TaskStore,
    storage: &impl Storage,
    parameters: AddTaskParameters,
) -> Result<Option<Task>, AddTaskError> {
    let due_date = parse_due_date(parameters.due_date)?;
    let due_time = parse_due_time(parameters.due_time)?;
    let category = parameters.category.unwrap_or_default();

    let Some(task) = store.add(parameters.text, category, due_date, due_time) else {
        return Ok(None);
    };
    let task = task.clone();

    storage.save(store.tasks())?;

    Ok(Some(task))
}

#[derive(Debug, Error)]
pub enum ToggleTaskError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Flips a task between done and pending, saving on a match.
/// An unknown id is a no-op and nothing is written.
pub fn toggle_task(
    store: &mut TaskStore,
    storage: &impl Storage,
    id: u64,
) -> Result<Option<Task>, ToggleTaskError> {
    if !store.toggle(id) {
        return Ok(None);
    }

    storage.save(store.tasks())?;

    Ok(store.get(id).cloned())
}

#[derive(Debug, Error)]
pub enum UpdateTaskError {
    #[error(transparent)]
    DueInput(#[from] DueInputError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct UpdateTaskParameters {
    pub id: u64,
    pub text: String,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
}

/// Replaces a task's text and due date/time, saving on success.
///
/// Returns `Ok(None)` when the text trims to empty or no task matches; the
/// task keeps its old values and nothing is written.
pub fn update_task(
    store: &mut TaskStore,
    storage: &impl Storage,
    parameters: UpdateTaskParameters,
) -> Result<Option<Task>, UpdateTaskError> {
    let due_date = parse_due_date(parameters.due_date)?;
    let due_time = parse_due_time(parameters.due_time)?;

    if !store.update(parameters.id, parameters.text, due_date, due_time) {
        return Ok(None);
    }

    storage.save(store.tasks())?;

    Ok(store.get(parameters.id).cloned())
}

#[derive(Debug, Error)]
pub enum DeleteTaskError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Removes a task and rewrites the collection.
/// The save happens even when nothing matched; the persisted value is
/// unchanged in that case.
pub fn delete_task(
    store: &mut TaskStore,
    storage: &impl Storage,
    id: u64,
) -> Result<bool, DeleteTaskError> {
    let removed = store.delete(id);

    storage.save(store.tasks())?;

    Ok(removed)
}
