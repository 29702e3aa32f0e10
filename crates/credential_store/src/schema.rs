use serde::{Deserialize, Serialize};

/// Current on-disk credential record version.
pub const CREDENTIAL_SCHEMA_VERSION: u32 = 1;

/// Persisted credential record.
///
/// The whole record is rewritten on every `set`; partial updates never
/// happen. `saved_at` is an RFC 3339 UTC timestamp recorded at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialRecord {
    pub version: u32,
    pub access_token: String,
    pub saved_at: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn v1(access_token: impl Into<String>, saved_at: impl Into<String>) -> Self {
        Self {
            version: CREDENTIAL_SCHEMA_VERSION,
            access_token: access_token.into(),
            saved_at: saved_at.into(),
        }
    }
}
