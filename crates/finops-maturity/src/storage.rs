use crate::assessment::exchange::ExportMeta;
use crate::assessment::AnswerStore;
use crate::config::StorageConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SNAPSHOTS_FILE: &str = "snapshots.json";
const BRANDING_FILE: &str = "branding.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access local data store: {0}")]
    Io(#[from] std::io::Error),
    #[error("local data store holds invalid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("snapshot {0} not found")]
    SnapshotNotFound(String),
}

/// One saved session, restorable without the original export file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub customer: String,
    pub assessor: String,
    pub selected_caps: Vec<String>,
    pub answers_by_cap: AnswerStore,
    pub meta: ExportMeta,
}

impl SnapshotRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        model_version: String,
        selected_caps: Vec<String>,
        answers_by_cap: AnswerStore,
        meta: ExportMeta,
    ) -> Self {
        Self {
            id: format!("snap-{}", timestamp.timestamp_millis()),
            timestamp,
            version: model_version,
            customer: meta.customer.clone(),
            assessor: meta.assessor.clone(),
            selected_caps,
            answers_by_cap,
            meta,
        }
    }
}

/// Branding applied to the printable report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub logo_data_url: Option<String>,
}

/// JSON-file persistence under the configured data directory. The files are
/// small and rewritten whole on every save.
#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
        }
    }

    pub fn load_snapshots(&self) -> Result<Vec<SnapshotRecord>, StorageError> {
        self.load_or_default(SNAPSHOTS_FILE)
    }

    pub fn save_snapshot(&self, record: SnapshotRecord) -> Result<(), StorageError> {
        let mut snapshots = self.load_snapshots()?;
        snapshots.push(record);
        self.write(SNAPSHOTS_FILE, &snapshots)
    }

    pub fn delete_snapshot(&self, id: &str) -> Result<(), StorageError> {
        let mut snapshots = self.load_snapshots()?;
        let before = snapshots.len();
        snapshots.retain(|snapshot| snapshot.id != id);
        if snapshots.len() == before {
            return Err(StorageError::SnapshotNotFound(id.to_string()));
        }
        self.write(SNAPSHOTS_FILE, &snapshots)
    }

    pub fn load_branding(&self) -> Result<Branding, StorageError> {
        self.load_or_default(BRANDING_FILE)
    }

    pub fn save_branding(&self, branding: &Branding) -> Result<(), StorageError> {
        self.write(BRANDING_FILE, branding)
    }

    fn load_or_default<T>(&self, file: &str) -> Result<T, StorageError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let path = self.data_dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(file);
        std::fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}
