//! Per-conversation session registry.
//!
//! The store is an ordinary value: construct one at startup and share it
//! (usually behind an `Arc`) with every turn handler. Tests build their own.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use docdraft_shared::SessionState;

/// Shared, mutable handle to one conversation's state.
///
/// Every caller for the same conversation id gets a clone of the same `Arc`,
/// so mutations are visible to all of them. Holding the lock for the length
/// of a turn keeps turns for one conversation from interleaving.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Concurrent map from conversation id to session state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for `conversation_id`, creating it on first use.
    ///
    /// Get-or-create is atomic per key. An empty id is a valid key.
    pub fn get_or_create(&self, conversation_id: &str) -> SessionHandle {
        self.sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                debug!(conversation_id, "session created");
                Arc::new(Mutex::new(SessionState::new()))
            })
            .clone()
    }

    /// Drop the session for `conversation_id`. The next
    /// [`get_or_create`](Self::get_or_create) starts from a fresh state.
    ///
    /// Handles obtained before the reset keep pointing at the old state.
    pub fn reset(&self, conversation_id: &str) {
        if self.sessions.remove(conversation_id).is_some() {
            debug!(conversation_id, "session reset");
        }
    }

    pub fn contains(&self, conversation_id: &str) -> bool {
        self.sessions.contains_key(conversation_id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
