//! Client-side session and conversation state core for the archaeologist
//! agent chat client.
//!
//! The rendering layer is a passive collaborator: it reads state and
//! dispatches commands, nothing else. Everything with consistency concerns
//! lives here:
//!
//! - credential lifecycle ([`credential_store::TokenStore`])
//! - transport calls and error normalization ([`agent_api::AgentApiClient`])
//! - login/register/logout state ([`auth::AuthManager`])
//! - the message log and its send cycle ([`chat::ConversationManager`])
//! - the artifact collection ([`artifacts::ArtifactCache`])
//!
//! Managers are pure state machines with explicit transitions; the
//! [`client::ChatClient`] driver composes them around [`gateway::AgentGateway`]
//! calls, one outstanding request of a given kind at a time. All network
//! failures become manager state at that boundary — nothing is fatal to the
//! process.

pub mod artifacts;
pub mod auth;
pub mod chat;
pub mod client;
pub mod gateway;

pub use artifacts::ArtifactCache;
pub use auth::{validate_registration, AuthManager, RegistrationError, UserIdentity};
pub use chat::{ConversationManager, Message, Role, FALLBACK_ASSISTANT_REPLY};
pub use client::ChatClient;
pub use gateway::AgentGateway;
