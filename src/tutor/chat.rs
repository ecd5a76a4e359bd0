//! Caller-side tutor conversation state
//!
//! [`TutorChat`] holds the single current session for a front end together
//! with the visible transcript. Switching topics replaces both wholesale.
//! Replies are matched to the topic they were asked under through an epoch
//! counter, so an answer that arrives after a topic switch is dropped. Only
//! one turn may be awaiting its reply at a time.

use super::session::{ChatMessage, SessionHandle};
use crate::gateway::Gateway;
use crate::prompts::welcome_message;

/// A message that has been submitted and is awaiting its reply
///
/// Produced by [`TutorChat::begin`]. Resolving it does not borrow the chat,
/// so the caller may switch topics while the reply is in flight.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    epoch: u64,
    seq: u64,
    session: Option<SessionHandle>,
    text: String,
}

impl PendingTurn {
    /// The text that was submitted
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Topic generation this turn was issued under
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Obtains the reply through `gateway`
    pub async fn resolve(&self, gateway: &Gateway) -> String {
        gateway.send_message(self.session.as_ref(), &self.text).await
    }
}

/// Topic-scoped chat panel state
#[derive(Debug)]
pub struct TutorChat {
    gateway: Gateway,
    topic: Option<String>,
    session: Option<SessionHandle>,
    transcript: Vec<ChatMessage>,
    epoch: u64,
    next_seq: u64,
    awaiting: Option<u64>,
}

impl TutorChat {
    /// Creates an empty chat with no topic
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            topic: None,
            session: None,
            transcript: Vec::new(),
            epoch: 0,
            next_seq: 0,
            awaiting: None,
        }
    }

    /// Gateway replies are resolved through
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Current topic, if one was selected
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Current session; `None` in demo mode or before a topic is chosen
    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    /// Visible messages, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Current topic generation
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True while a submitted message is waiting for its reply
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Activates `topic`, replacing the previous session and transcript
    ///
    /// Any reply still in flight for the previous topic becomes stale.
    pub fn switch_topic(&mut self, topic: &str) {
        let topic = topic.trim().to_string();
        self.epoch += 1;
        self.awaiting = None;
        self.session = self.gateway.start_session(&topic);
        self.transcript = vec![ChatMessage::model(welcome_message(&topic))];
        tracing::debug!(
            "Tutor topic is now '{}' (epoch {}, live={})",
            topic,
            self.epoch,
            self.session.is_some()
        );
        self.topic = Some(topic);
    }

    /// Records the user's message and returns a ticket for its reply
    ///
    /// Returns `None` for blank input, when no topic has been chosen, or
    /// while an earlier turn on this topic is still awaiting its reply.
    pub fn begin(&mut self, text: &str) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() || self.topic.is_none() {
            return None;
        }
        if self.awaiting.is_some() {
            tracing::debug!("Ignoring message while a reply is pending");
            return None;
        }
        self.next_seq += 1;
        self.awaiting = Some(self.next_seq);
        self.transcript.push(ChatMessage::user(text));
        Some(PendingTurn {
            epoch: self.epoch,
            seq: self.next_seq,
            session: self.session.clone(),
            text: text.to_string(),
        })
    }

    /// Appends `reply` if `turn` is the pending turn of the current topic
    ///
    /// Returns false, leaving the transcript untouched, for stale turns and
    /// for turns that were already accepted.
    pub fn accept(&mut self, turn: &PendingTurn, reply: String) -> bool {
        if turn.epoch != self.epoch {
            tracing::debug!(
                "Discarding stale reply from epoch {} (current {})",
                turn.epoch,
                self.epoch
            );
            return false;
        }
        if self.awaiting != Some(turn.seq) {
            return false;
        }
        self.awaiting = None;
        self.transcript.push(ChatMessage::model(reply));
        true
    }

    /// Sends `text` and waits for the reply in one step
    ///
    /// Returns the reply text, or `None` when the input was rejected.
    pub async fn ask(&mut self, text: &str) -> Option<String> {
        let turn = self.begin(text)?;
        let reply = turn.resolve(&self.gateway).await;
        self.accept(&turn, reply.clone());
        Some(reply)
    }
}
