use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A message inside a conversation's log.
///
/// Messages are append-only and never edited once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender_id: UserId,
    pub sender_name: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: UserId, sender_name: &str, text: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::random(),
            text: text.to_string(),
            sender_id,
            sender_name: sender_name.to_string(),
            timestamp,
        }
    }
}

/// Sort oldest first, the order a thread is displayed in.
///
/// Ties on timestamp keep insertion order.
pub fn sort_ascending(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

/// Most recent message of a log, if any.
pub fn latest(messages: &[Message]) -> Option<&Message> {
    messages.iter().max_by(|a, b| a.timestamp.cmp(&b.timestamp))
}
