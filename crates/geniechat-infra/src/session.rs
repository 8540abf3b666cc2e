//! In-memory session store.
//!
//! Implements `SessionStore` from `geniechat-core` with a dashmap keyed
//! by session id. Entries are created empty on first write and dropped
//! when the session ends; nothing survives process restart, matching
//! the lifetime of UI session state.

use dashmap::DashMap;

use geniechat_core::store::{SessionId, SessionStore};
use geniechat_types::message::StoredMessage;

#[derive(Debug, Default, Clone)]
struct SessionEntry {
    messages: Vec<StoredMessage>,
    conversation_id: Option<String>,
}

/// Process-local, per-session chat state.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn push_message(&self, session: SessionId, record: StoredMessage) {
        self.sessions.entry(session).or_default().messages.push(record);
    }

    fn messages(&self, session: SessionId) -> Vec<StoredMessage> {
        self.sessions
            .get(&session)
            .map(|entry| entry.messages.clone())
            .unwrap_or_default()
    }

    fn conversation_id(&self, session: SessionId) -> Option<String> {
        self.sessions
            .get(&session)
            .and_then(|entry| entry.conversation_id.clone())
    }

    fn set_conversation_id(&self, session: SessionId, conversation_id: &str) {
        self.sessions.entry(session).or_default().conversation_id =
            Some(conversation_id.to_string());
    }

    fn end_session(&self, session: SessionId) {
        self.sessions.remove(&session);
    }
}
