use agent_api::{HistoryMessage, HistoryRole};
use time::OffsetDateTime;

/// Assistant reply appended when a query fails, so the log never shows a
/// user turn with no visible response. Coexists with the error banner.
pub const FALLBACK_ASSISTANT_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

/// Owner of the ordered message log and the send cycle.
///
/// One query cycle at a time: Idle → Sending → (Appended | Failed) → Idle.
/// The busy flag serializes cycles, so no concurrent send can interleave
/// its append between another cycle's optimistic user append and its
/// completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversationManager {
    messages: Vec<Message>,
    busy: bool,
    error: Option<String>,
}

impl ConversationManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered log, oldest first. Append-only within a session.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a send cycle for `text`.
    ///
    /// Returns `None` (a silent no-op) for empty/whitespace-only input or
    /// while a cycle is already in flight. Otherwise snapshots the
    /// conversation history as it stood *before* this turn, appends the
    /// user message optimistically (it stays visible even if the call
    /// fails), clears the error, sets busy, and returns the snapshot for
    /// the query payload. The triggering message is never part of its own
    /// history.
    pub fn begin_send(&mut self, text: &str) -> Option<Vec<HistoryMessage>> {
        let prompt = text.trim();
        if prompt.is_empty() || self.busy {
            return None;
        }

        let history = self.history_snapshot();
        self.error = None;
        self.busy = true;
        self.push(Role::User, prompt.to_string());

        Some(history)
    }

    /// Finishes the in-flight cycle with the assistant's reply.
    ///
    /// Tolerates stale completions: a no-op unless a cycle is in flight.
    pub fn complete(&mut self, reply: String) {
        if !self.busy {
            return;
        }
        self.push(Role::Assistant, reply);
        self.busy = false;
    }

    /// Finishes the in-flight cycle after a failed query.
    ///
    /// Sets the error banner and appends the fallback assistant reply, so
    /// every user turn has a visible response. No-op unless in flight.
    pub fn fail(&mut self, message: String) {
        if !self.busy {
            return;
        }
        self.error = Some(message);
        self.push(Role::Assistant, FALLBACK_ASSISTANT_REPLY.to_string());
        self.busy = false;
    }

    /// Empties the log and error. Busy is left untouched; callers should
    /// only clear while idle.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = None;
    }

    fn history_snapshot(&self) -> Vec<HistoryMessage> {
        self.messages
            .iter()
            .map(|message| HistoryMessage {
                role: match message.role {
                    Role::User => HistoryRole::User,
                    Role::Assistant => HistoryRole::Assistant,
                },
                content: message.content.clone(),
            })
            .collect()
    }

    fn push(&mut self, role: Role, content: String) {
        self.messages.push(Message {
            role,
            content,
            timestamp: OffsetDateTime::now_utc(),
        });
    }
}
