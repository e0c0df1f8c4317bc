use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::Expense;

use super::{StorageError, DEFAULT_FILE_NAME};

/// Repository persisting the whole expense collection as one JSON document.
/// Every save rewrites the file in full.
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Create a repository backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location of the data file: next to the running executable,
    /// or in the current directory when the executable path is unknown.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default()
            .join(DEFAULT_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all expenses.
    /// A missing file is an empty collection. Unreadable or malformed files
    /// are reported and also treated as empty; the file is left as is.
    pub async fn load(&self) -> Vec<Expense> {
        match self.try_load().await {
            Ok(expenses) => expenses,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Could not load expenses, starting empty");
                Vec::new()
            }
        }
    }

    /// Load all expenses, returning read and parse failures to the caller.
    /// A missing file is still an empty collection.
    pub async fn try_load(&self) -> Result<Vec<Expense>, StorageError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No expenses file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        // A `null` document is an empty collection
        let expenses: Option<Vec<Expense>> =
            serde_json::from_str(&json).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let expenses = expenses.unwrap_or_default();

        debug!(path = %self.path.display(), count = expenses.len(), "Loaded expenses");
        Ok(expenses)
    }

    /// Replace the file contents with the given expenses, pretty-printed.
    pub async fn save(&self, expenses: &[Expense]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(expenses).map_err(StorageError::Serialize)?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), count = expenses.len(), "Saved expenses");
        Ok(())
    }
}
