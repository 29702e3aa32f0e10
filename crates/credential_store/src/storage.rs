use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::CredentialStoreError;
use crate::schema::{CredentialRecord, CREDENTIAL_SCHEMA_VERSION};

/// Persistence port for the single session credential.
///
/// Implementations hold at most one token. `store` overwrites any previous
/// value and `erase` is idempotent.
pub trait CredentialStorage {
    fn load(&self) -> Result<Option<String>, CredentialStoreError>;
    fn store(&mut self, access_token: &str) -> Result<(), CredentialStoreError>;
    fn erase(&mut self) -> Result<(), CredentialStoreError>;
}

/// File-backed storage holding one versioned JSON credential record.
#[derive(Debug, Clone)]
pub struct FileCredentialStorage {
    path: PathBuf,
}

impl FileCredentialStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn validate(&self, record: &CredentialRecord) -> Result<(), CredentialStoreError> {
        if record.version != CREDENTIAL_SCHEMA_VERSION {
            return Err(CredentialStoreError::UnsupportedVersion {
                path: self.path.clone(),
                found: record.version,
            });
        }

        if OffsetDateTime::parse(&record.saved_at, &Rfc3339).is_err() {
            return Err(CredentialStoreError::InvalidTimestamp {
                path: self.path.clone(),
                value: record.saved_at.clone(),
            });
        }

        if record.access_token.trim().is_empty() {
            return Err(CredentialStoreError::EmptyToken {
                path: self.path.clone(),
            });
        }

        Ok(())
    }
}

impl CredentialStorage for FileCredentialStorage {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CredentialStoreError::io(
                    "reading credential file",
                    &self.path,
                    source,
                ));
            }
        };

        let record = serde_json::from_str::<CredentialRecord>(&raw)
            .map_err(|source| CredentialStoreError::json_parse(&self.path, source))?;
        self.validate(&record)?;

        Ok(Some(record.access_token))
    }

    fn store(&mut self, access_token: &str) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                CredentialStoreError::io("creating credential directory", parent, source)
            })?;
        }

        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(CredentialStoreError::ClockFormat)?;
        let record = CredentialRecord::v1(access_token, saved_at);
        let raw = serde_json::to_string_pretty(&record)
            .map_err(|source| CredentialStoreError::json_serialize(&self.path, source))?;

        fs::write(&self.path, raw)
            .map_err(|source| CredentialStoreError::io("writing credential file", &self.path, source))
    }

    fn erase(&mut self) -> Result<(), CredentialStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CredentialStoreError::io(
                "removing credential file",
                &self.path,
                source,
            )),
        }
    }
}

/// In-memory storage for tests and embedding without a filesystem.
#[derive(Debug, Default, Clone)]
pub struct MemoryCredentialStorage {
    token: Option<String>,
}

impl MemoryCredentialStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl CredentialStorage for MemoryCredentialStorage {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.token.clone())
    }

    fn store(&mut self, access_token: &str) -> Result<(), CredentialStoreError> {
        self.token = Some(access_token.to_string());
        Ok(())
    }

    fn erase(&mut self) -> Result<(), CredentialStoreError> {
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{CredentialStorage, FileCredentialStorage};

    #[test]
    fn load_from_missing_file_is_absent_not_error() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let storage = FileCredentialStorage::new(dir.path().join("credential.json"));

        assert!(storage.load().expect("missing file loads as None").is_none());
    }

    #[test]
    fn store_then_load_returns_the_same_token() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let mut storage = FileCredentialStorage::new(dir.path().join("credential.json"));

        storage.store("tok1").expect("store should succeed");
        assert_eq!(storage.load().expect("load should succeed").as_deref(), Some("tok1"));
    }

    #[test]
    fn store_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join(".relic_chat").join("credential.json");
        let mut storage = FileCredentialStorage::new(&path);

        storage.store("tok1").expect("store should succeed");
        assert!(path.exists());
    }

    #[test]
    fn erase_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let mut storage = FileCredentialStorage::new(dir.path().join("credential.json"));

        storage.store("tok1").expect("store should succeed");
        storage.erase().expect("first erase should succeed");
        storage.erase().expect("second erase should also succeed");
        assert!(storage.load().expect("load should succeed").is_none());
    }

    #[test]
    fn unsupported_record_version_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("credential.json");
        fs::write(
            &path,
            r#"{"version":2,"access_token":"tok1","saved_at":"2026-08-30T12:00:00Z"}"#,
        )
        .expect("fixture write should succeed");

        let storage = FileCredentialStorage::new(&path);
        let error = storage.load().expect_err("version 2 should be rejected");
        assert!(error.to_string().contains("unsupported version 2"));
    }

    #[test]
    fn malformed_saved_at_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("credential.json");
        fs::write(
            &path,
            r#"{"version":1,"access_token":"tok1","saved_at":"yesterday"}"#,
        )
        .expect("fixture write should succeed");

        let storage = FileCredentialStorage::new(&path);
        let error = storage.load().expect_err("bad timestamp should be rejected");
        assert!(error.to_string().contains("invalid RFC3339"));
    }
}
