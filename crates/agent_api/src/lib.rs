//! Transport-only client primitives for the agent service API.
//!
//! This crate owns request building, response parsing, and error
//! normalization for the remote agent endpoints only. It holds no session
//! state and no credential lifecycle: callers pass the current bearer token
//! (when one is held) into each protected call, and interpret authorization
//! failures like any other error result.
//!
//! Every call is single-shot. There is no retry policy at this layer;
//! callers decide whether a failed request is worth re-submitting.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use client::AgentApiClient;
pub use client::CancellationSignal;
pub use config::AgentApiConfig;
pub use error::{parse_error_message, AgentApiError};
pub use payload::{
    Artifact, ArtifactDetails, AuthGrant, HistoryMessage, HistoryRole, LoginRequest, QueryReply,
    QueryRequest, RegisterRequest, SaveArtifactsRequest, UserRecord,
};
pub use url::{endpoint_url, normalize_base_url, DEFAULT_AGENT_BASE_URL};

pub use reqwest::StatusCode;
