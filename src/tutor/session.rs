//! Topic-scoped tutor sessions and chat messages
//!
//! A [`Session`] owns the model-side turn history for one topic. Callers hold
//! it through a [`SessionHandle`] and pass the handle into
//! [`Gateway::send_message`](crate::gateway::Gateway::send_message); there is
//! no process-wide current session. Because history lives inside the handle,
//! a reply produced for an old handle can never land in a newer session.

use crate::prompts::generate_tutor_prompt;
use crate::providers::{Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Shared reference to a live session
pub type SessionHandle = Arc<Session>;

/// One message in a caller-visible transcript
///
/// Messages are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    /// Text, possibly with simple line breaks
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message stamped with the current time and a fresh id
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a model message
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }
}

/// Conversational context for a single topic
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    topic: String,
    system_instruction: String,
    history: Mutex<Vec<Message>>,
    /// Held for the whole of one exchange so turns never interleave
    turn: Mutex<()>,
}

impl Session {
    /// Creates a session with the tutor framing for `topic`
    ///
    /// # Examples
    ///
    /// ```
    /// use studyscout::tutor::Session;
    ///
    /// let session = Session::new("  Astronomy ");
    /// assert_eq!(session.topic(), "Astronomy");
    /// assert!(session.system_instruction().contains("Astronomy"));
    /// ```
    pub fn new(topic: &str) -> Self {
        let topic = topic.trim().to_string();
        Self {
            id: Uuid::new_v4(),
            system_instruction: generate_tutor_prompt(&topic),
            topic,
            history: Mutex::new(Vec::new()),
            turn: Mutex::new(()),
        }
    }

    /// Unique identity of this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Snapshot of the completed turns, oldest first
    pub async fn history(&self) -> Vec<Message> {
        self.history.lock().await.clone()
    }

    /// Number of completed turns
    pub async fn turn_count(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Waits until no other exchange is running on this session
    ///
    /// The returned guard must be held until the exchange is recorded.
    pub(crate) async fn begin_turn(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }

    /// Appends a completed user/model exchange
    pub(crate) async fn record_exchange(&self, user: Message, reply: Message) {
        let mut history = self.history.lock().await;
        history.push(user);
        history.push(reply);
    }
}
