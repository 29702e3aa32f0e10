use std::future::Future;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AgentApiConfig;
use crate::error::{parse_error_message, AgentApiError};
use crate::payload::{
    Artifact, AuthGrant, LoginRequest, QueryReply, QueryRequest, RegisterRequest,
    SaveArtifactsRequest, UserRecord,
};
use crate::url::endpoint_url;

/// Optional cancellation signal shared between a caller and an in-flight call.
pub type CancellationSignal = Arc<AtomicBool>;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Single-shot HTTP adapter for the agent service.
///
/// Holds no credential state: protected calls receive the current bearer
/// token per invocation, and a missing token is forwarded as an unadorned
/// request rather than rejected here.
#[derive(Debug)]
pub struct AgentApiClient {
    http: Client,
    config: AgentApiConfig,
}

impl AgentApiClient {
    pub fn new(config: AgentApiConfig) -> Result<Self, AgentApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent.as_deref() {
            builder = builder.user_agent(user_agent.to_owned());
        }
        let http = builder.build().map_err(AgentApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AgentApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.config.base_url, path)
    }

    /// `POST /auth/register`
    pub async fn register(
        &self,
        request: &RegisterRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<AuthGrant, AgentApiError> {
        self.post_json("/auth/register", None, request, cancellation)
            .await
    }

    /// `POST /auth/login`
    pub async fn login(
        &self,
        request: &LoginRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<AuthGrant, AgentApiError> {
        self.post_json("/auth/login", None, request, cancellation)
            .await
    }

    /// `GET /auth/me`
    pub async fn current_user(
        &self,
        bearer: Option<&str>,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<UserRecord, AgentApiError> {
        self.get_json("/auth/me", bearer, cancellation).await
    }

    /// `POST /agent/query`
    pub async fn query(
        &self,
        bearer: Option<&str>,
        request: &QueryRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<QueryReply, AgentApiError> {
        self.post_json("/agent/query", bearer, request, cancellation)
            .await
    }

    /// `GET /agent/artifacts`
    pub async fn artifacts(
        &self,
        bearer: Option<&str>,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Vec<Artifact>, AgentApiError> {
        self.get_json("/agent/artifacts", bearer, cancellation).await
    }

    /// `POST /agent/artifacts` — wholesale replace on the server.
    ///
    /// The acknowledgment body is not relied upon beyond its status code.
    pub async fn save_artifacts(
        &self,
        bearer: Option<&str>,
        artifacts: &[Artifact],
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), AgentApiError> {
        let body = SaveArtifactsRequest {
            artifacts: artifacts.to_vec(),
        };
        let builder = self.http.post(self.endpoint("/agent/artifacts")).json(&body);
        let builder = apply_bearer(builder, bearer)?;
        log::debug!("POST /agent/artifacts ({} artifacts)", body.artifacts.len());
        self.execute_ack(builder, cancellation).await
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &B,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<T, AgentApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let builder = self.http.post(self.endpoint(path)).json(body);
        let builder = apply_bearer(builder, bearer)?;
        log::debug!("POST {path}");
        self.execute(builder, cancellation).await
    }

    async fn get_json<T>(
        &self,
        path: &str,
        bearer: Option<&str>,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<T, AgentApiError>
    where
        T: DeserializeOwned,
    {
        let builder = self.http.get(self.endpoint(path));
        let builder = apply_bearer(builder, bearer)?;
        log::debug!("GET {path}");
        self.execute(builder, cancellation).await
    }

    async fn execute<T>(
        &self,
        builder: RequestBuilder,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<T, AgentApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute_text(builder, cancellation).await?;
        serde_json::from_str(&body).map_err(AgentApiError::from)
    }

    async fn execute_ack(
        &self,
        builder: RequestBuilder,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), AgentApiError> {
        self.execute_text(builder, cancellation).await.map(|_| ())
    }

    /// Sends exactly one attempt and returns the success body text.
    ///
    /// Non-2xx responses are normalized into [`AgentApiError::Status`] with
    /// the server detail message extracted.
    async fn execute_text(
        &self,
        builder: RequestBuilder,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<String, AgentApiError> {
        if is_cancelled(cancellation) {
            return Err(AgentApiError::Cancelled);
        }

        let response = await_or_cancel(builder.send(), cancellation)
            .await?
            .map_err(AgentApiError::from)?;
        let status = response.status();
        let body = await_or_cancel(response.text(), cancellation)
            .await?
            .unwrap_or_default();

        if status.is_success() {
            Ok(body)
        } else {
            let message = parse_error_message(status, &body);
            log::warn!("agent service rejected request: HTTP {status} {message}");
            Err(AgentApiError::Status(status, message))
        }
    }
}

fn apply_bearer(
    builder: RequestBuilder,
    bearer: Option<&str>,
) -> Result<RequestBuilder, AgentApiError> {
    let Some(token) = bearer.map(str::trim).filter(|token| !token.is_empty()) else {
        return Ok(builder);
    };

    let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        AgentApiError::InvalidBearerToken("token contains non-header characters".to_string())
    })?;
    Ok(builder.header(AUTHORIZATION, value))
}

fn is_cancelled(cancel: Option<&CancellationSignal>) -> bool {
    cancel.is_some_and(|token| token.load(Ordering::Acquire))
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancellationSignal>,
) -> Result<F::Output, AgentApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(AgentApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(AgentApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
