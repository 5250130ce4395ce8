//! Per-problem score persistence.
//!
//! A single JSON object maps `score_<sanitized title>` to the latest
//! assessment. Writes replace the file through a temp file and rename, so two
//! racing writers leave one complete file behind (last writer wins).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::types::{ScoreAssessment, ScoreBreakdown};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read score store {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write score store {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score store {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage key for a problem title: non-alphanumerics become `_`.
pub fn score_key(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("score_{sanitized}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScore {
    pub title: String,
    pub overall: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    pub updated_at: DateTime<Utc>,
}

impl StoredScore {
    pub fn assessment(&self) -> ScoreAssessment {
        ScoreAssessment {
            overall: self.overall,
            breakdown: self.breakdown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save `score` for `title`, replacing any previous entry.
    pub fn record(&self, title: &str, score: &ScoreAssessment) -> Result<StoredScore, StoreError> {
        let mut entries = self.load()?;
        let stored = StoredScore {
            title: title.to_string(),
            overall: score.overall,
            breakdown: score.breakdown,
            updated_at: Utc::now(),
        };
        let key = score_key(title);
        entries.insert(key.clone(), stored.clone());
        self.persist(&entries)?;

        info!(key = key.as_str(), overall = score.overall, "Score recorded");
        Ok(stored)
    }

    pub fn get(&self, title: &str) -> Result<Option<StoredScore>, StoreError> {
        let mut entries = self.load()?;
        Ok(entries.remove(&score_key(title)))
    }

    /// All entries ordered by key.
    pub fn list(&self) -> Result<Vec<StoredScore>, StoreError> {
        Ok(self.load()?.into_values().collect())
    }

    fn load(&self) -> Result<BTreeMap<String, StoredScore>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Score store not created yet");
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self, entries: &BTreeMap<String, StoredScore>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| write_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        let tmp = self.path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4()));
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            write_err(source)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> ScoreAssessment {
        ScoreAssessment::with_breakdown(
            65,
            ScoreBreakdown {
                conceptual: 18,
                implementation: 15,
                optimization: 16,
                testing: 16,
            },
        )
    }

    #[test]
    fn key_replaces_non_alphanumerics() {
        assert_eq!(score_key("1. Two Sum"), "score_1__Two_Sum");
        assert_eq!(score_key("N/A"), "score_N_A");
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().expect("tempdir");
        let store = ScoreStore::new(dir.path().join("scores.json"));
        assert_eq!(store.get("1. Two Sum").expect("get"), None);
        assert!(store.list().expect("list").is_empty());
    }

    #[test]
    fn record_then_get_returns_latest() {
        let dir = tempdir().expect("tempdir");
        let store = ScoreStore::new(dir.path().join("nested").join("scores.json"));

        store.record("1. Two Sum", &ScoreAssessment::overall_only(20)).expect("record");
        store.record("1. Two Sum", &sample()).expect("record");
        store.record("2. Add Two Numbers", &ScoreAssessment::overall_only(45)).expect("record");

        let stored = store.get("1. Two Sum").expect("get").expect("present");
        assert_eq!(stored.assessment(), sample());
        assert_eq!(stored.title, "1. Two Sum");
        assert_eq!(store.list().expect("list").len(), 2);
    }

    #[test]
    fn file_layout_matches_key_value_shape() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("scores.json");
        let store = ScoreStore::new(&path);
        store.record("Two Sum", &sample()).expect("record");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(value["score_Two_Sum"]["overall"], 65);
        assert_eq!(value["score_Two_Sum"]["breakdown"]["testing"], 16);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("scores.json");
        fs::write(&path, "{not json").expect("write");

        let err = ScoreStore::new(&path).list().expect_err("corrupt");
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
