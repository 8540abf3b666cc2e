//! Conversation history: an append-only log of chat messages scoped
//! to one session.
//!
//! The history owns no storage itself -- it borrows a [`SessionStore`]
//! handle and a session id, so replay and append work the same against
//! any store implementation.

use geniechat_types::error::MessageError;
use geniechat_types::message::Message;

use crate::sink::{ChatSink, render_message};
use crate::store::{SessionId, SessionStore};

/// Ordered, append-only log of messages for one session, plus the
/// session-scoped Genie conversation handle.
pub struct ConversationHistory<'a, S: SessionStore> {
    store: &'a S,
    session_id: SessionId,
}

impl<'a, S: SessionStore> ConversationHistory<'a, S> {
    pub fn new(store: &'a S, session_id: SessionId) -> Self {
        Self { store, session_id }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Serialize and append one message to the end of the history.
    pub fn append(&self, message: &Message) -> Result<(), MessageError> {
        let record = message.to_stored()?;
        self.store.push_message(self.session_id, record);
        Ok(())
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.store.messages(self.session_id).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deserialize and render every stored message in original order.
    ///
    /// Safe to call on every UI refresh: the store is never mutated. A
    /// record that fails to decode is surfaced as a sink warning and
    /// skipped; the rest of the history still renders.
    pub fn replay<K: ChatSink>(&self, sink: &mut K) {
        for record in self.store.messages(self.session_id) {
            match Message::from_stored(&record) {
                Ok(message) => render_message(&message, sink),
                Err(err) => {
                    tracing::warn!(session = %self.session_id, "skipping undecodable stored message: {err}");
                    sink.warning(&format!("Could not restore a stored message: {err}"));
                }
            }
        }
    }

    /// The Genie conversation handle, `None` before the first turn.
    pub fn conversation_id(&self) -> Option<String> {
        self.store.conversation_id(self.session_id)
    }

    /// Record the Genie conversation handle. Set once on the first
    /// turn, then stable for the session.
    pub fn set_conversation_id(&self, conversation_id: &str) {
        self.store.set_conversation_id(self.session_id, conversation_id);
    }

    /// Drop all session state, ending the session.
    pub fn clear(&self) {
        self.store.end_session(self.session_id);
    }
}
