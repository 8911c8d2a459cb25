//! Progress tracking for background upload jobs.
//!
//! The web layer and the job worker may run in different processes, so
//! progress lives on disk rather than in memory: one JSON file per task,
//! overwritten whole on every update. Writes go to a temp file first and
//! are renamed into place, so a concurrent reader sees either the old
//! record or the new one, never a torn write.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug)]
pub enum ProgressError {
    /// Task IDs become file names, so we refuse anything outside a
    /// conservative charset rather than sanitizing silently.
    InvalidTaskId(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ProgressError {
    fn from(e: std::io::Error) -> Self {
        ProgressError::Io(e)
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(e: serde_json::Error) -> Self {
        ProgressError::Json(e)
    }
}

impl std::fmt::Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressError::InvalidTaskId(id) => write!(f, "Invalid task ID: {:?}", id),
            ProgressError::Io(e) => write!(f, "Progress I/O error: {}", e),
            ProgressError::Json(e) => write!(f, "Progress serialization error: {}", e),
        }
    }
}

impl std::error::Error for ProgressError {}

/// Records the state of in-progress tasks, keyed by an opaque task ID.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    dir: PathBuf,
}

impl ProgressTracker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ProgressTracker { dir: dir.into() }
    }

    fn path_for(&self, task_id: &str) -> Result<PathBuf, ProgressError> {
        let valid = !task_id.is_empty()
            && task_id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.');

        if !valid || task_id.starts_with('.') {
            return Err(ProgressError::InvalidTaskId(task_id.to_string()));
        }

        Ok(self.dir.join(format!("{task_id}.json")))
    }

    /// Record the state of an in-progress task, replacing whatever was
    /// stored before.
    pub async fn record_progress<T: Serialize>(
        &self,
        task_id: &str,
        data: &T,
    ) -> Result<(), ProgressError> {
        let path = self.path_for(task_id)?;
        let body = serde_json::to_vec(data)?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp_path = self
            .dir
            .join(format!("{task_id}.json.tmp{}", rand::random::<u64>()));
        tokio::fs::write(&tmp_path, &body).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        Ok(())
    }

    /// Retrieve the most recently recorded state of a task.
    ///
    /// A missing record is a normal state -- the job hasn't started, or
    /// the record has been cleaned up -- so it returns `None` rather
    /// than an error.
    pub async fn get_progress(&self, task_id: &str) -> Result<Option<Value>, ProgressError> {
        let path = self.path_for(task_id)?;

        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&body)?))
    }

    /// Best-effort cleanup once a task's record is no longer needed.
    pub async fn clear_progress(&self, task_id: &str) -> Result<(), ProgressError> {
        let path = self.path_for(task_id)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
