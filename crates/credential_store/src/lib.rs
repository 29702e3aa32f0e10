//! Credential persistence for the agent chat client.
//!
//! Owns exactly one value: the opaque bearer token of the active session.
//! The token is replaced whole or erased, never partially updated, and the
//! persisted copy is read once at startup to rehydrate the in-memory store.
//!
//! Persistence is behind the [`CredentialStorage`] port so the store's state
//! transitions stay testable without a filesystem.

mod error;
mod paths;
mod schema;
mod storage;
mod store;

pub use error::CredentialStoreError;
pub use paths::{credential_file_name, credential_path};
pub use schema::{CredentialRecord, CREDENTIAL_SCHEMA_VERSION};
pub use storage::{CredentialStorage, FileCredentialStorage, MemoryCredentialStorage};
pub use store::TokenStore;
