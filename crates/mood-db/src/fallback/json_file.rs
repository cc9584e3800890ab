//! Append-only JSON file store
//!
//! The file holds a single pretty-printed JSON array. Appends read the whole
//! array, push the new entry and replace the file, serialized by an async
//! mutex so concurrent submissions in one process never lose each other.
//! Each append runs as its own task, so a caller that gives up waiting never
//! leaves the file half written.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::instrument;

use mood_core::entities::{MoodRecord, StoredMood};
use mood_core::error::DomainError;
use mood_core::text::sanitize_reason;
use mood_core::traits::{FallbackStore, RepoResult};
use mood_core::value_objects::normalize_country;

/// One entry of the fallback file
///
/// Fields are optional because the file may hold entries written by older
/// versions or edited by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMood {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl FileMood {
    fn from_record(id: String, record: &MoodRecord) -> Self {
        Self {
            id: Some(id),
            emoji: Some(record.emoji.clone()),
            label: record.label.clone(),
            timestamp: Some(record.timestamp.to_rfc3339()),
            country: record.country.clone(),
            region: record.region.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            reason: record.reason.clone(),
        }
    }

    /// Normalize into a record, or `None` when the entry has no emoji.
    ///
    /// Missing or unparseable timestamps become `now`. Countries and reasons
    /// go through the same normalization as live submissions.
    pub fn into_record(self, now: DateTime<Utc>) -> Option<MoodRecord> {
        let emoji = self.emoji.map(|e| e.trim().to_string()).filter(|e| !e.is_empty())?;
        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map_or(now, |ts| ts.with_timezone(&Utc));

        Some(MoodRecord {
            emoji,
            label: self.label.filter(|l| !l.trim().is_empty()),
            timestamp,
            country: normalize_country(self.country.as_deref()),
            region: self.region.filter(|r| !r.trim().is_empty()),
            latitude: self.latitude.filter(|v| v.is_finite()),
            longitude: self.longitude.filter(|v| v.is_finite()),
            reason: sanitize_reason(self.reason.as_deref()),
        })
    }
}

/// Fallback store backed by a local JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read the raw entries. A missing or empty file is an empty array.
async fn read_entries(path: &Path) -> RepoResult<Vec<FileMood>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(storage_error(path, &e)),
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&raw).map_err(|e| storage_error(path, &e))
}

/// Replace the file with `entries`.
///
/// The array goes to a sibling `.tmp` file first and is renamed over the
/// target, so readers only ever see the old or the new array.
async fn write_entries(path: &Path, entries: &[FileMood]) -> RepoResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| storage_error(path, &e))?;
    }

    let json = serde_json::to_vec_pretty(entries).map_err(|e| storage_error(path, &e))?;
    let tmp = staging_path(path);

    let written = async {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(storage_error(path, &e));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("moods.json"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn storage_error(path: &Path, err: &dyn std::fmt::Display) -> DomainError {
    DomainError::StorageError(format!("{}: {err}", path.display()))
}

#[async_trait]
impl FallbackStore for JsonFileStore {
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    async fn append(&self, record: &MoodRecord) -> RepoResult<StoredMood> {
        let path = self.path.clone();
        let lock = Arc::clone(&self.lock);
        let id = uuid::Uuid::new_v4().to_string();
        let entry = FileMood::from_record(id.clone(), record);

        // Detached: dropping this future must not stop a rewrite that holds the lock
        let task = tokio::spawn(async move {
            let _guard = lock.lock_owned().await;
            let mut entries = read_entries(&path).await?;
            entries.push(entry);
            write_entries(&path, &entries).await?;
            Ok::<_, DomainError>(entries.len())
        });

        let total = task
            .await
            .map_err(|e| DomainError::InternalError(format!("fallback append task failed: {e}")))??;

        tracing::debug!(id = %id, total, "Appended mood to fallback file");
        Ok(StoredMood {
            id,
            record: record.clone(),
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_all(&self) -> RepoResult<Vec<MoodRecord>> {
        let entries = {
            let _guard = self.lock.lock().await;
            read_entries(&self.path).await?
        };

        let now = Utc::now();
        let total = entries.len();
        let records: Vec<MoodRecord> = entries
            .into_iter()
            .filter_map(|entry| entry.into_record(now))
            .collect();

        if records.len() < total {
            tracing::warn!(
                skipped = total - records.len(),
                "Skipped fallback entries without an emoji"
            );
        }
        Ok(records)
    }
}
