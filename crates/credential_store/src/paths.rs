use std::path::{Path, PathBuf};

pub const CREDENTIAL_DIR: &str = ".relic_chat";
pub const CREDENTIAL_FILE: &str = "credential.json";

#[must_use]
pub fn credential_file_name() -> &'static str {
    CREDENTIAL_FILE
}

/// Application-defined location of the persisted credential under a root
/// directory (typically the user's home directory).
#[must_use]
pub fn credential_path(root: &Path) -> PathBuf {
    root.join(CREDENTIAL_DIR).join(CREDENTIAL_FILE)
}
