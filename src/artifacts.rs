use agent_api::Artifact;

/// Last-fetched artifact collection.
///
/// Server-authoritative: the client never edits an artifact in place, it
/// replaces the whole collection on a successful fetch or save. A failed
/// refresh leaves the previous collection untouched — stale-but-consistent
/// beats a mix of stale and fresh entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtifactCache {
    items: Vec<Artifact>,
}

impl ArtifactCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertion-ordered collection as last received from the server.
    #[must_use]
    pub fn items(&self) -> &[Artifact] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Atomically substitutes the whole collection.
    pub fn replace(&mut self, items: Vec<Artifact>) {
        self.items = items;
    }
}
