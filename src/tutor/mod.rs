//! Tutor module for StudyScout
//!
//! Session handles passed to the gateway, and the caller-side chat state
//! that keeps one session per topic.

pub mod chat;
pub mod session;

pub use chat::{PendingTurn, TutorChat};
pub use session::{ChatMessage, Session, SessionHandle};
