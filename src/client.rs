use agent_api::{AgentApiError, Artifact, AuthGrant, QueryRequest};
use credential_store::TokenStore;

use crate::artifacts::ArtifactCache;
use crate::auth::{validate_registration, AuthManager, RegistrationError, UserIdentity};
use crate::chat::ConversationManager;
use crate::gateway::AgentGateway;

/// Session driver: one constructible container per session, injected into
/// the view layer instead of hidden process-wide singletons.
///
/// Owns the token store and the three managers, and exposes exactly one
/// method per UI-level action. Each method updates state synchronously
/// where possible, issues at most one network call, and converts every
/// gateway failure into manager state — callers never see a panic or an
/// unhandled error from here.
///
/// Managers own disjoint state: an auth attempt, a query cycle, and an
/// artifact refresh may be in flight simultaneously, while per-manager busy
/// flags serialize same-kind cycles.
pub struct ChatClient<G> {
    gateway: G,
    tokens: TokenStore,
    auth: AuthManager,
    conversation: ConversationManager,
    artifacts: ArtifactCache,
}

impl<G: AgentGateway> ChatClient<G> {
    #[must_use]
    pub fn new(gateway: G, tokens: TokenStore) -> Self {
        Self {
            gateway,
            tokens,
            auth: AuthManager::new(),
            conversation: ConversationManager::new(),
            artifacts: ArtifactCache::new(),
        }
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn conversation(&self) -> &ConversationManager {
        &self.conversation
    }

    pub fn artifacts(&self) -> &ArtifactCache {
        &self.artifacts
    }

    /// Current bearer credential, if one is held.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.tokens.get()
    }

    /// Presence of a credential gates the protected views.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_present()
    }

    /// Attempts a login. No-op while an auth attempt is already in flight;
    /// outcome lands in [`Self::auth`] state.
    pub async fn login(&mut self, email: &str, password: &str) {
        if !self.auth.begin_attempt() {
            return;
        }

        match self.gateway.login(email, password).await {
            Ok(grant) => self.finish_grant(grant, email),
            Err(error) => self.auth.fail(error.user_message()),
        }
    }

    /// Attempts a registration.
    ///
    /// Validation failures are returned synchronously and issue no network
    /// call and touch no busy/error state. Remote outcomes land in
    /// [`Self::auth`] state, as with login.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), RegistrationError> {
        validate_registration(password, confirmation)?;

        if !self.auth.begin_attempt() {
            return Ok(());
        }

        match self.gateway.register(email, password).await {
            Ok(grant) => self.finish_grant(grant, email),
            Err(error) => self.auth.fail(error.user_message()),
        }

        Ok(())
    }

    /// Clears credential, identity, error, and the conversation log.
    /// Synchronous, cannot fail; a persisted-copy erase failure is logged
    /// and never blocks the logout.
    pub fn logout(&mut self) {
        if let Err(error) = self.tokens.set(None) {
            log::warn!("failed to erase persisted credential on logout: {error}");
        }
        self.auth.reset();
        self.conversation.clear();
    }

    /// Runs one query cycle for `text`.
    ///
    /// No-op for blank input or while a cycle is in flight. The user turn
    /// is appended before the call and stays in the log even when the call
    /// fails; the history payload never includes the turn that triggered
    /// it.
    pub async fn send(&mut self, text: &str) {
        let Some(history) = self.conversation.begin_send(text) else {
            return;
        };

        let request = QueryRequest::new(text.trim(), history);
        match self.gateway.query(self.tokens.get(), &request).await {
            Ok(reply) => self.conversation.complete(reply.response),
            Err(error) => self.conversation.fail(error.user_message()),
        }
    }

    /// Empties the conversation log and error banner.
    pub fn clear_chat(&mut self) {
        self.conversation.clear();
    }

    /// Fetches the remote artifact collection and replaces the cache
    /// wholesale. On failure the cache keeps its pre-call value.
    pub async fn refresh_artifacts(&mut self) -> Result<(), AgentApiError> {
        let fetched = self.gateway.fetch_artifacts(self.tokens.get()).await?;
        self.artifacts.replace(fetched);
        Ok(())
    }

    /// Pushes a client-held collection to the remote store (wholesale
    /// replace there too); on success the cache adopts it. On failure the
    /// cache keeps its pre-call value.
    pub async fn save_artifacts(&mut self, collection: Vec<Artifact>) -> Result<(), AgentApiError> {
        self.gateway
            .save_artifacts(self.tokens.get(), &collection)
            .await?;
        self.artifacts.replace(collection);
        Ok(())
    }

    /// Token first: dependents gate on credential presence, so the store
    /// is written before the identity. A grant that cannot be persisted is
    /// a failed attempt — no partial login state.
    fn finish_grant(&mut self, grant: AuthGrant, email: &str) {
        match self.tokens.set(Some(grant.access_token)) {
            Ok(()) => self.auth.complete(UserIdentity {
                id: grant.user_id,
                email: email.to_string(),
            }),
            Err(error) => {
                log::warn!("failed to persist credential after grant: {error}");
                self.auth.fail(format!("Failed to persist credential: {error}"));
            }
        }
    }
}
