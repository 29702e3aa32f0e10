use crate::error::CredentialStoreError;
use crate::storage::CredentialStorage;

/// Holder of the current session credential.
///
/// The in-memory value and the persisted copy move together: `set` writes
/// through the storage port before replacing the held value, so a
/// persistence failure never leaves a credential that would not survive a
/// restart. Rehydration happens exactly once, at `open`.
pub struct TokenStore {
    storage: Box<dyn CredentialStorage>,
    current: Option<String>,
}

impl TokenStore {
    /// Opens the store, rehydrating any persisted credential.
    pub fn open(storage: Box<dyn CredentialStorage>) -> Result<Self, CredentialStoreError> {
        let current = storage.load()?;
        Ok(Self { storage, current })
    }

    /// Returns the current credential, if one is held. Pure read.
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Derived presence flag gating protected operations.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the held credential as a whole value.
    ///
    /// `Some(token)` persists first, then replaces the in-memory value.
    /// `None` erases the persisted copy and always clears the in-memory
    /// value, even when the erase fails — a credential that cannot be
    /// erased from disk must not keep gating the session.
    pub fn set(&mut self, credential: Option<String>) -> Result<(), CredentialStoreError> {
        match credential {
            Some(token) => {
                self.storage.store(&token)?;
                self.current = Some(token);
                Ok(())
            }
            None => {
                let result = self.storage.erase();
                self.current = None;
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{CredentialStorage, FileCredentialStorage, MemoryCredentialStorage};
    use crate::CredentialStoreError;

    use super::TokenStore;

    #[test]
    fn open_rehydrates_persisted_credential() {
        let storage = MemoryCredentialStorage::with_token("tok1");
        let store = TokenStore::open(Box::new(storage)).expect("open should succeed");

        assert!(store.is_present());
        assert_eq!(store.get(), Some("tok1"));
    }

    #[test]
    fn set_then_fresh_open_round_trips_through_a_file() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("credential.json");

        let mut store = TokenStore::open(Box::new(FileCredentialStorage::new(&path)))
            .expect("open should succeed");
        assert!(!store.is_present());

        store.set(Some("tok1".to_string())).expect("set should succeed");

        let rehydrated = TokenStore::open(Box::new(FileCredentialStorage::new(&path)))
            .expect("reopen should succeed");
        assert_eq!(rehydrated.get(), Some("tok1"));
    }

    #[test]
    fn clearing_erases_the_persisted_copy() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("credential.json");

        let mut store = TokenStore::open(Box::new(FileCredentialStorage::new(&path)))
            .expect("open should succeed");
        store.set(Some("tok1".to_string())).expect("set should succeed");
        store.set(None).expect("clear should succeed");

        assert!(!store.is_present());
        let rehydrated = TokenStore::open(Box::new(FileCredentialStorage::new(&path)))
            .expect("reopen should succeed");
        assert!(rehydrated.get().is_none());
    }

    #[test]
    fn replacement_is_whole_value() {
        let mut store = TokenStore::open(Box::new(MemoryCredentialStorage::new()))
            .expect("open should succeed");

        store.set(Some("tok1".to_string())).expect("set should succeed");
        store.set(Some("tok2".to_string())).expect("set should succeed");

        assert_eq!(store.get(), Some("tok2"));
    }

    struct FailingStorage;

    impl CredentialStorage for FailingStorage {
        fn load(&self) -> Result<Option<String>, CredentialStoreError> {
            Ok(None)
        }

        fn store(&mut self, _access_token: &str) -> Result<(), CredentialStoreError> {
            Err(CredentialStoreError::io(
                "writing credential file",
                "/nowhere/credential.json",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }

        fn erase(&mut self) -> Result<(), CredentialStoreError> {
            Ok(())
        }
    }

    #[test]
    fn failed_persistence_leaves_no_partial_credential() {
        let mut store =
            TokenStore::open(Box::new(FailingStorage)).expect("open should succeed");

        let result = store.set(Some("tok1".to_string()));

        assert!(result.is_err());
        assert!(!store.is_present());
    }
}
