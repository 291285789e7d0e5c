//! File-backed record store.
//!
//! The JSON file at the storage path is the single source of truth: every
//! operation reloads the whole collection and every mutation writes the whole
//! collection back. Nothing is cached between calls.

use crate::domain::{Collection, Fields, IdGenerator, Record};
use crate::storage::error::StoreError;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// What the store does when the storage file cannot be read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return the storage error to the caller.
    #[default]
    Propagate,
    /// Log the error, then behave as if the collection were empty (on load)
    /// or as if the write had succeeded (on save).
    FailOpen,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "propagate" | "strict" => Ok(FailurePolicy::Propagate),
            "fail_open" | "fail-open" | "lenient" => Ok(FailurePolicy::FailOpen),
            other => Err(format!("unknown storage failure policy '{}'", other)),
        }
    }
}

/// Sole owner of the on-disk proverb collection.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    policy: FailurePolicy,
    ids: IdGenerator,
}

impl RecordStore {
    /// Creates a store over `path`, creating its parent directory if needed.
    /// The storage file itself is not touched until the first mutation.
    pub fn open(path: impl AsRef<Path>, policy: FailurePolicy) -> Result<Self, StoreError> {
        Self::with_id_generator(path, policy, IdGenerator::default())
    }

    pub fn with_id_generator(
        path: impl AsRef<Path>,
        policy: FailurePolicy,
        ids: IdGenerator,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        info!(storage_path = %path.display(), ?policy, "opened record store");
        Ok(Self { path, policy, ids })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Reads the full collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<Collection, StoreError> {
        match self.read_collection() {
            Ok(records) => Ok(records),
            Err(err) => match self.policy {
                FailurePolicy::FailOpen => {
                    warn!(storage_path = %self.path.display(), error = %err, "load failed, using empty collection");
                    Ok(Collection::new())
                }
                FailurePolicy::Propagate => {
                    error!(storage_path = %self.path.display(), error = %err, "load failed");
                    Err(err)
                }
            },
        }
    }

    /// Replaces the stored document with `records`, pretty-printed.
    pub fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        match self.write_collection(records) {
            Ok(()) => {
                debug!(storage_path = %self.path.display(), records = records.len(), "saved collection");
                Ok(())
            }
            Err(err) => {
                error!(storage_path = %self.path.display(), error = %err, "save failed");
                match self.policy {
                    FailurePolicy::FailOpen => Ok(()),
                    FailurePolicy::Propagate => Err(err),
                }
            }
        }
    }

    pub fn list(&self) -> Result<Collection, StoreError> {
        self.load()
    }

    pub fn get(&self, id: i64) -> Result<Record, StoreError> {
        self.load()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Appends a new record built from `fields`. The id is always generated
    /// here; an `id` key in `fields` is dropped.
    pub fn create(&self, fields: Fields) -> Result<Record, StoreError> {
        let mut records = self.load()?;
        let id = match self.ids.next_id(&records) {
            Some(id) => id,
            None => return Err(StoreError::IdsExhausted(i64::MAX)),
        };
        let record = Record::new(id, fields);
        records.push(record.clone());
        self.save(&records)?;
        info!(id, total = records.len(), "created record");
        Ok(record)
    }

    /// Shallow-merges `fields` into the record with `id`. The record keeps its
    /// id even if `fields` carries a different one.
    pub fn update(&self, id: i64, fields: Fields) -> Result<Record, StoreError> {
        let mut records = self.load()?;
        let Some(index) = records.iter().position(|record| record.id() == id) else {
            return Err(StoreError::NotFound(id));
        };
        records[index].merge(fields);
        let updated = records[index].clone();
        self.save(&records)?;
        info!(id, "updated record");
        Ok(updated)
    }

    /// Removes every record with `id`. Nothing is written when no record matches.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let records = self.load()?;
        let before = records.len();
        let remaining: Collection = records
            .into_iter()
            .filter(|record| record.id() != id)
            .collect();
        if remaining.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.save(&remaining)?;
        info!(id, total = remaining.len(), "deleted record");
        Ok(())
    }

    fn read_collection(&self) -> Result<Collection, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(storage_path = %self.path.display(), "storage file missing, starting empty");
                return Ok(Collection::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Collection::new());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes to a sibling temp file and renames it over the target.
    fn write_collection(&self, records: &[Record]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, body).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("collection"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
