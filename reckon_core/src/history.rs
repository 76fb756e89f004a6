//! # Calculation History
//!
//! An injected history store rather than global mutable state: calculators
//! never touch storage, the frontend appends an entry after each successful
//! run. `MemoryHistory` backs tests and single-session use; `FileHistory`
//! persists an append-only JSON list with atomic writes (write to .tmp,
//! fsync, rename) and a schema-version check on load.
//!
//! ## Example
//!
//! ```rust
//! use reckon_core::history::{HistoryEntry, HistoryStore, MemoryHistory};
//!
//! let mut store = MemoryHistory::new();
//! store.append(HistoryEntry::new("Bmi", "70 / 175 (Metric)", "BMI 22.9 (Normal)")).unwrap();
//! assert_eq!(store.list().unwrap().len(), 1);
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Current schema version for history files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One saved calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique entry id
    pub id: Uuid,

    /// When the calculation ran
    pub date: DateTime<Utc>,

    /// Calculator type (e.g., "Loan", "Bmi")
    pub calc_type: String,

    /// Short parameter summary
    pub params: String,

    /// Short result summary
    pub result: String,
}

impl HistoryEntry {
    /// Create a new entry timestamped now.
    pub fn new(
        calc_type: impl Into<String>,
        params: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            date: Utc::now(),
            calc_type: calc_type.into(),
            params: params.into(),
            result: result.into(),
        }
    }
}

/// Append-only store of calculation history.
pub trait HistoryStore {
    /// Append an entry.
    fn append(&mut self, entry: HistoryEntry) -> CalcResult<()>;

    /// List all entries, oldest first.
    fn list(&self) -> CalcResult<Vec<HistoryEntry>>;

    /// Remove all entries.
    fn clear(&mut self) -> CalcResult<()>;
}

/// In-memory history for tests and single-session frontends.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        MemoryHistory::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, entry: HistoryEntry) -> CalcResult<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn list(&self) -> CalcResult<Vec<HistoryEntry>> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) -> CalcResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// On-disk history file: a versioned JSON document.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: String,
    entries: Vec<HistoryEntry>,
}

/// File-backed history with atomic writes.
#[derive(Debug)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    /// Open (or lazily create) a history file at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHistory { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CalcResult<HistoryFile> {
        if !self.path.exists() {
            return Ok(HistoryFile {
                version: SCHEMA_VERSION.to_string(),
                entries: Vec::new(),
            });
        }

        let mut file = File::open(&self.path).map_err(|e| {
            CalcError::file_error("open", self.path.display().to_string(), e.to_string())
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            CalcError::file_error("read", self.path.display().to_string(), e.to_string())
        })?;

        let history: HistoryFile =
            serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", self.path.display(), e),
            })?;

        validate_version(&history.version)?;
        Ok(history)
    }

    /// Save with atomic write semantics: write to .tmp, fsync, rename.
    fn save(&self, history: &HistoryFile) -> CalcResult<()> {
        let json =
            serde_json::to_string_pretty(history).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;

        let tmp_path = self.path.with_extension("json.tmp");

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            CalcError::file_error(
                "create temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        tmp_file.write_all(json.as_bytes()).map_err(|e| {
            CalcError::file_error(
                "write temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        tmp_file.sync_all().map_err(|e| {
            CalcError::file_error(
                "sync temp file",
                tmp_path.display().to_string(),
                e.to_string(),
            )
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error(
                "rename to final",
                self.path.display().to_string(),
                e.to_string(),
            )
        })?;

        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn append(&mut self, entry: HistoryEntry) -> CalcResult<()> {
        let mut history = self.load()?;
        history.entries.push(entry);
        self.save(&history)
    }

    fn list(&self) -> CalcResult<Vec<HistoryEntry>> {
        Ok(self.load()?.entries)
    }

    fn clear(&mut self) -> CalcResult<()> {
        self.save(&HistoryFile {
            version: SCHEMA_VERSION.to_string(),
            entries: Vec::new(),
        })
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor is also incompatible
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_history_path(name: &str) -> PathBuf {
        temp_dir().join(format!("reckon_test_{}.json", name))
    }

    #[test]
    fn test_memory_history_append_and_list() {
        let mut store = MemoryHistory::new();
        store
            .append(HistoryEntry::new("Bmi", "70 / 175", "BMI 22.9"))
            .unwrap();
        store
            .append(HistoryEntry::new("Root", "root(16, 2)", "4"))
            .unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].calc_type, "Bmi");
        assert_eq!(entries[1].calc_type, "Root");

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_file_history_roundtrip() {
        let path = temp_history_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut store = FileHistory::new(&path);
        assert!(store.list().unwrap().is_empty());

        store
            .append(HistoryEntry::new("Loan", "$25,000.00 at 6.5% for 60 months", "$489.15/mo"))
            .unwrap();
        store
            .append(HistoryEntry::new("Bmi", "70 / 175", "BMI 22.9"))
            .unwrap();

        // Re-open and verify persistence
        let reopened = FileHistory::new(&path);
        let entries = reopened.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].calc_type, "Loan");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_history_path("atomic");
        let _ = fs::remove_file(&path);

        let mut store = FileHistory::new(&path);
        store
            .append(HistoryEntry::new("Root", "root(2, 2)", "1.414214"))
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_file_rejected() {
        let path = temp_history_path("newer");
        fs::write(
            &path,
            r#"{"version": "9.0.0", "entries": []}"#,
        )
        .unwrap();

        let store = FileHistory::new(&path);
        let err = store.list().unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = HistoryEntry::new("Expression", "2 + 2", "4");
        let json = serde_json::to_string(&entry).unwrap();
        let roundtrip: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.id, entry.id);
        assert_eq!(roundtrip.params, "2 + 2");
    }
}
