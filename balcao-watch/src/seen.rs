//! Persisted seen-set
//!
//! Durable record of order ids the notification/print pipeline has already
//! handled. Insert-only during normal operation; `clear` exists for the
//! logout-style cache reset. The file is a plain JSON array of ids so the
//! set survives restarts.
//!
//! Persistence never fails the pipeline: read and write errors are logged
//! and the in-memory set stays authoritative.

use std::collections::HashSet;
use std::path::PathBuf;

/// Set of order ids already handled, mirrored to a JSON file
#[derive(Debug)]
pub struct SeenSet {
    ids: HashSet<i64>,
    path: PathBuf,
}

impl SeenSet {
    /// Load the set from disk. Missing or corrupt data yields an empty set,
    /// never an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<i64>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Seen-set file corrupt, starting empty"
                    );
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read seen-set file, starting empty"
                );
                HashSet::new()
            }
        };

        Self { ids, path }
    }

    /// Write the set back to disk. Failures are logged, not propagated, so
    /// polling continues on the in-memory state.
    pub fn persist(&self) {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();

        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(&ids)?;
            std::fs::write(&self.path, json)
        };

        if let Err(e) = write() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to persist seen-set, continuing in memory"
            );
        }
    }

    /// Insert an id. Returns false when it was already present.
    pub fn add(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Logout-style reset: empties the set and the file
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
