//! Persisted pairing history.
//!
//! Records every within-team pair ever produced when repeat-avoidance
//! is enabled. The set grows monotonically and is cleared only by
//! explicit user action. Failed generations never write back.

use crate::error::AppError;
use crate::names::PairKey;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// On-disk schema: `{ "pairs": [["a","b"], ...], "updated": "..." }`.
/// Pairs are stored folded and sorted so the file diffs cleanly.
#[derive(Debug, Serialize, Deserialize, Default)]
struct HistoryFile {
    #[serde(default)]
    pairs: Vec<PairKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated: Option<String>,
}

/// File-backed pairing-history store.
///
/// Injected into the CLI flow; the generator itself only ever sees the
/// loaded `HashSet<PairKey>`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: String,
}

impl HistoryStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<String>) -> Self {
        HistoryStore { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Loads the recorded pair set. A missing file is an empty history,
    /// not an error.
    pub async fn load(&self) -> Result<HashSet<PairKey>, AppError> {
        if !Path::new(&self.path).exists() {
            return Ok(HashSet::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        let file: HistoryFile = serde_json::from_str(&content)?;
        Ok(file.pairs.into_iter().collect())
    }

    /// Persists the full pair set, replacing the previous contents.
    /// Creates the parent directory if needed.
    pub async fn save(&self, pairs: &HashSet<PairKey>) -> Result<(), AppError> {
        if let Some(parent) = Path::new(&self.path).parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }

        let mut sorted: Vec<PairKey> = pairs.iter().cloned().collect();
        sorted.sort();
        let file = HistoryFile {
            pairs: sorted,
            updated: Some(Utc::now().to_rfc3339()),
        };

        let content = serde_json::to_string_pretty(&file)?;
        let mut out = fs::File::create(&self.path).await?;
        out.write_all(content.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    /// Removes the history file entirely. Clearing a history that was
    /// never written is a no-op.
    pub async fn clear(&self) -> Result<(), AppError> {
        if Path::new(&self.path).exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
