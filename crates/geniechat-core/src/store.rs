//! SessionStore trait definition.
//!
//! The original design kept chat history in framework-managed ambient
//! session state. Here the store is an explicit handle passed into
//! history operations, so the core stays testable without any UI
//! framework. Implementations live in `geniechat-infra`
//! (e.g. `InMemorySessionStore`).

use geniechat_types::message::StoredMessage;
use uuid::Uuid;

/// Handle identifying one user session.
pub type SessionId = Uuid;

/// Per-session storage for chat history and the Genie conversation id.
///
/// A session entry is auto-initialized empty on first use and holds
/// only JSON-like scalars: the serialized message records and an
/// optional conversation id. Messages are append-only; insertion
/// order is chronological and preserved.
pub trait SessionStore: Send + Sync {
    /// Append one serialized message to the session's history.
    fn push_message(&self, session: SessionId, record: StoredMessage);

    /// All stored messages for the session, in insertion order.
    /// Empty for a session that has never been written.
    fn messages(&self, session: SessionId) -> Vec<StoredMessage>;

    /// The Genie conversation handle, `None` before the first turn.
    fn conversation_id(&self, session: SessionId) -> Option<String>;

    /// Record the Genie conversation handle for this session.
    fn set_conversation_id(&self, session: SessionId, conversation_id: &str);

    /// Drop all state for the session.
    fn end_session(&self, session: SessionId);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SessionState {
        messages: Vec<StoredMessage>,
        conversation_id: Option<String>,
    }

    /// Minimal mutex-backed store for core tests.
    #[derive(Default)]
    pub struct TestStore {
        sessions: Mutex<HashMap<SessionId, SessionState>>,
    }

    impl TestStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl SessionStore for TestStore {
        fn push_message(&self, session: SessionId, record: StoredMessage) {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.entry(session).or_default().messages.push(record);
        }

        fn messages(&self, session: SessionId) -> Vec<StoredMessage> {
            let sessions = self.sessions.lock().unwrap();
            sessions
                .get(&session)
                .map(|s| s.messages.clone())
                .unwrap_or_default()
        }

        fn conversation_id(&self, session: SessionId) -> Option<String> {
            let sessions = self.sessions.lock().unwrap();
            sessions.get(&session).and_then(|s| s.conversation_id.clone())
        }

        fn set_conversation_id(&self, session: SessionId, conversation_id: &str) {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.entry(session).or_default().conversation_id =
                Some(conversation_id.to_string());
        }

        fn end_session(&self, session: SessionId) {
            self.sessions.lock().unwrap().remove(&session);
        }
    }
}
