use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::{UserId, UserProfile};
use crate::message::{self, Message};

/// Preview shown for a conversation with an empty log.
pub const NO_MESSAGES_PREVIEW: &str = "No messages yet";

/// Name shown when the other participant's name was never recorded.
pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unordered pair of participants. `(a, b)` and `(b, a)` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantPair(UserId, UserId);

impl ParticipantPair {
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.0 == *id || self.1 == *id
    }
}

/// Two-party message thread. The message log lives next to it in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub participant_ids: [UserId; 2],
    pub participant_names: BTreeMap<UserId, String>,
    pub participant_companies: BTreeMap<UserId, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Start a conversation between `initiator` and `other`.
    pub fn between(initiator: &Participant, other: &Participant, now: DateTime<Utc>) -> Self {
        let mut participant_names = BTreeMap::new();
        participant_names.insert(initiator.id.clone(), initiator.name.clone());
        participant_names.insert(other.id.clone(), other.name.clone());

        let mut participant_companies = BTreeMap::new();
        participant_companies.insert(initiator.id.clone(), initiator.company.clone());
        participant_companies.insert(other.id.clone(), other.company.clone());

        Self {
            id: ConversationId::random(),
            participant_ids: [initiator.id.clone(), other.id.clone()],
            participant_names,
            participant_companies,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn pair(&self) -> ParticipantPair {
        ParticipantPair::new(self.participant_ids[0].clone(), self.participant_ids[1].clone())
    }

    pub fn has_participant(&self, id: &UserId) -> bool {
        self.participant_ids.contains(id)
    }

    /// The participant that is not `me`. For a self-conversation that is `me`.
    pub fn other_participant(&self, me: &UserId) -> &UserId {
        self.participant_ids
            .iter()
            .find(|id| *id != me)
            .unwrap_or(&self.participant_ids[0])
    }

    /// Build the list entry `viewer` sees for this conversation.
    pub fn summarize(&self, viewer: &UserId, log: &[Message]) -> ConversationSummary {
        let other_id = self.other_participant(viewer).clone();
        let other = Participant {
            name: self
                .participant_names
                .get(&other_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
            company: self
                .participant_companies
                .get(&other_id)
                .cloned()
                .unwrap_or_default(),
            id: other_id,
        };
        let last_message = message::latest(log)
            .map(|m| m.text.clone())
            .unwrap_or_else(|| NO_MESSAGES_PREVIEW.to_string());

        ConversationSummary {
            id: self.id,
            other,
            last_message,
            updated_at: self.updated_at,
        }
    }
}

/// One side of a conversation as it is displayed to the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub company: String,
}

impl From<&UserProfile> for Participant {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.display_name().to_string(),
            company: profile.company_label(),
        }
    }
}

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub other: Participant,
    pub last_message: String,
    pub updated_at: DateTime<Utc>,
}

/// Most recently updated first.
pub fn sort_by_recency(summaries: &mut [ConversationSummary]) {
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
