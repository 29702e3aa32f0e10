use agent_api::{
    AgentApiClient, AgentApiError, Artifact, AuthGrant, LoginRequest, QueryReply, QueryRequest,
    RegisterRequest,
};

/// Seam between the session driver and the remote agent service.
///
/// Protected calls receive the current bearer credential per invocation;
/// absence of a credential is forwarded, not rejected, so authorization
/// failures surface as ordinary error results. Implementations make exactly
/// one attempt per call.
#[allow(async_fn_in_trait)]
pub trait AgentGateway {
    async fn register(&self, email: &str, password: &str) -> Result<AuthGrant, AgentApiError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, AgentApiError>;

    async fn query(
        &self,
        bearer: Option<&str>,
        request: &QueryRequest,
    ) -> Result<QueryReply, AgentApiError>;

    async fn fetch_artifacts(&self, bearer: Option<&str>) -> Result<Vec<Artifact>, AgentApiError>;

    async fn save_artifacts(
        &self,
        bearer: Option<&str>,
        artifacts: &[Artifact],
    ) -> Result<(), AgentApiError>;
}

impl AgentGateway for AgentApiClient {
    async fn register(&self, email: &str, password: &str) -> Result<AuthGrant, AgentApiError> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        AgentApiClient::register(self, &request, None).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, AgentApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        AgentApiClient::login(self, &request, None).await
    }

    async fn query(
        &self,
        bearer: Option<&str>,
        request: &QueryRequest,
    ) -> Result<QueryReply, AgentApiError> {
        AgentApiClient::query(self, bearer, request, None).await
    }

    async fn fetch_artifacts(&self, bearer: Option<&str>) -> Result<Vec<Artifact>, AgentApiError> {
        AgentApiClient::artifacts(self, bearer, None).await
    }

    async fn save_artifacts(
        &self,
        bearer: Option<&str>,
        artifacts: &[Artifact],
    ) -> Result<(), AgentApiError> {
        AgentApiClient::save_artifacts(self, bearer, artifacts, None).await
    }
}
