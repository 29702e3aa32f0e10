use std::time::Duration;

use crate::url::DEFAULT_AGENT_BASE_URL;

/// Transport configuration for agent service requests.
#[derive(Debug, Clone)]
pub struct AgentApiConfig {
    /// Base URL for agent service endpoints.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Optional request timeout applied to every call.
    pub timeout: Option<Duration>,
}

impl Default for AgentApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AGENT_BASE_URL.to_string(),
            user_agent: None,
            timeout: None,
        }
    }
}

impl AgentApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
