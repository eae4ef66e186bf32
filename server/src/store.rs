//! In-memory document store: the `users` collection, conversations and their
//! message logs, with push subscriptions over a broadcast change feed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use dashmap::DashMap;
use supplylink_common::conversation::{
    sort_by_recency, Conversation, ConversationId, ConversationSummary, Participant, ParticipantPair,
};
use supplylink_common::identity::{UserId, UserProfile};
use supplylink_common::message::{self, Message};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Capacity of the change feed. Slow subscribers that fall further behind
/// re-read their snapshot instead of replaying.
const CHANGE_FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("conversation {0} not found")]
    ConversationNotFound(ConversationId),
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("Message text must not be empty.")]
    EmptyMessage,
    #[error("{0} is not a participant of this conversation")]
    NotParticipant(UserId),
    #[error("You cannot start a conversation with yourself.")]
    SelfConversation,
}

/// Callback receiving a full snapshot on every relevant change.
pub type OnSnapshot<T> = Box<dyn Fn(Vec<T>) + Send + Sync + 'static>;

/// Handle to a live subscription. Delivery stops on [`Subscription::cancel`]
/// or when the handle is dropped.
#[derive(Debug)]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The `users` collection.
pub trait UserStore: Send + Sync {
    fn insert_profile(&self, profile: UserProfile);

    fn profile(&self, id: &UserId) -> Option<UserProfile>;

    fn update_company_name(&self, id: &UserId, company_name: &str) -> Result<UserProfile, StoreError>;
}

/// Conversations between two parties and their message logs.
///
/// `subscribe_*` must be called from within a Tokio runtime.
pub trait ConversationService: Send + Sync {
    /// The conversation between `me` and `other`, created on first contact.
    fn find_or_create_conversation(
        &self,
        me: &Participant,
        other: &Participant,
    ) -> Result<ConversationId, StoreError>;

    fn conversation(&self, id: ConversationId) -> Result<Conversation, StoreError>;

    /// Summaries of every conversation `user` takes part in, most recent first.
    fn list_conversations(&self, user: &UserId) -> Vec<ConversationSummary>;

    /// The message log of `id`, oldest first.
    fn list_messages(&self, id: ConversationId) -> Result<Vec<Message>, StoreError>;

    fn append_message(
        &self,
        id: ConversationId,
        sender_id: &UserId,
        sender_name: &str,
        text: &str,
    ) -> Result<Message, StoreError>;

    fn subscribe_conversations(
        &self,
        user: UserId,
        on_snapshot: OnSnapshot<ConversationSummary>,
    ) -> Subscription;

    fn subscribe_messages(
        &self,
        id: ConversationId,
        on_snapshot: OnSnapshot<Message>,
    ) -> Result<Subscription, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Created,
    MessageAppended,
}

#[derive(Debug, Clone)]
struct Change {
    conversation: ConversationId,
    participants: ParticipantPair,
    kind: ChangeKind,
}

#[derive(Default)]
struct Collections {
    conversations: HashMap<ConversationId, Conversation>,
    by_pair: HashMap<ParticipantPair, ConversationId>,
    messages: HashMap<ConversationId, Vec<Message>>,
}

impl Collections {
    fn summaries(&self, user: &UserId) -> Vec<ConversationSummary> {
        let mut summaries: Vec<_> = self
            .conversations
            .values()
            .filter(|c| c.has_participant(user))
            .map(|c| {
                let log = self.messages.get(&c.id).map(Vec::as_slice).unwrap_or_default();
                c.summarize(user, log)
            })
            .collect();
        sort_by_recency(&mut summaries);
        summaries
    }

    fn messages(&self, id: ConversationId) -> Result<Vec<Message>, StoreError> {
        if !self.conversations.contains_key(&id) {
            return Err(StoreError::ConversationNotFound(id));
        }
        let mut log = self.messages.get(&id).cloned().unwrap_or_default();
        message::sort_ascending(&mut log);
        Ok(log)
    }
}

struct Shared {
    users: DashMap<UserId, UserProfile>,
    collections: RwLock<Collections>,
    changes: broadcast::Sender<Change>,
}

impl Shared {
    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> T {
        let guard = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn publish(&self, change: Change) {
        // No receivers just means nobody is listening yet.
        let _ = self.changes.send(change);
    }
}

/// Store backed by process memory. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                users: DashMap::new(),
                collections: RwLock::new(Collections::default()),
                changes,
            }),
        }
    }

    pub fn conversation_count(&self) -> usize {
        self.shared.read(|c| c.conversations.len())
    }

    /// Spawn a task that calls `deliver` once now and again for every change
    /// matching `relevant`.
    fn listen(
        &self,
        relevant: impl Fn(&Change) -> bool + Send + 'static,
        deliver: impl Fn(&Shared) + Send + Sync + 'static,
    ) -> Subscription {
        // Subscribe before the first snapshot so no change slips between them.
        let mut rx = self.shared.changes.subscribe();
        deliver(self.shared.as_ref());

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) if relevant(&change) => deliver(shared.as_ref()),
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "subscriber lagged, re-reading snapshot");
                        deliver(shared.as_ref());
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Subscription::new(task)
    }
}

impl UserStore for MemoryStore {
    fn insert_profile(&self, profile: UserProfile) {
        self.shared.users.insert(profile.id.clone(), profile);
    }

    fn profile(&self, id: &UserId) -> Option<UserProfile> {
        self.shared.users.get(id).map(|p| p.clone())
    }

    fn update_company_name(&self, id: &UserId, company_name: &str) -> Result<UserProfile, StoreError> {
        let mut profile = self
            .shared
            .users
            .get_mut(id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;
        profile.company_name = company_name.to_string();
        Ok(profile.clone())
    }
}

impl ConversationService for MemoryStore {
    fn find_or_create_conversation(
        &self,
        me: &Participant,
        other: &Participant,
    ) -> Result<ConversationId, StoreError> {
        if me.id == other.id {
            return Err(StoreError::SelfConversation);
        }
        let pair = ParticipantPair::new(me.id.clone(), other.id.clone());

        // Fast path without the write lock.
        if let Some(id) = self.shared.read(|c| c.by_pair.get(&pair).copied()) {
            return Ok(id);
        }

        // Check again under the write lock; two first contacts racing for the
        // same pair must end up with one conversation.
        let mut collections = self
            .shared
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = collections.by_pair.get(&pair) {
            return Ok(*id);
        }
        let conversation = Conversation::between(me, other, Utc::now());
        let id = conversation.id;
        collections.by_pair.insert(pair.clone(), id);
        collections.messages.insert(id, Vec::new());
        collections.conversations.insert(id, conversation);
        drop(collections);

        tracing::info!(conversation = %id, initiator = %me.id, other = %other.id, "conversation created");
        self.shared.publish(Change {
            conversation: id,
            participants: pair,
            kind: ChangeKind::Created,
        });
        Ok(id)
    }

    fn conversation(&self, id: ConversationId) -> Result<Conversation, StoreError> {
        self.shared
            .read(|c| c.conversations.get(&id).cloned())
            .ok_or(StoreError::ConversationNotFound(id))
    }

    fn list_conversations(&self, user: &UserId) -> Vec<ConversationSummary> {
        self.shared.read(|c| c.summaries(user))
    }

    fn list_messages(&self, id: ConversationId) -> Result<Vec<Message>, StoreError> {
        self.shared.read(|c| c.messages(id))
    }

    fn append_message(
        &self,
        id: ConversationId,
        sender_id: &UserId,
        sender_name: &str,
        text: &str,
    ) -> Result<Message, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyMessage);
        }

        let mut collections = self
            .shared
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let conversation = collections
            .conversations
            .get_mut(&id)
            .ok_or(StoreError::ConversationNotFound(id))?;
        if !conversation.has_participant(sender_id) {
            return Err(StoreError::NotParticipant(sender_id.clone()));
        }

        let message = Message::new(sender_id.clone(), sender_name, text, Utc::now());
        conversation.updated_at = message.timestamp;
        let participants = conversation.pair();
        collections.messages.entry(id).or_default().push(message.clone());
        drop(collections);

        tracing::debug!(conversation = %id, sender = %sender_id, "message appended");
        self.shared.publish(Change {
            conversation: id,
            participants,
            kind: ChangeKind::MessageAppended,
        });
        Ok(message)
    }

    fn subscribe_conversations(
        &self,
        user: UserId,
        on_snapshot: OnSnapshot<ConversationSummary>,
    ) -> Subscription {
        let watched = user.clone();
        self.listen(
            move |change| change.participants.contains(&watched),
            move |shared| on_snapshot(shared.read(|c| c.summaries(&user))),
        )
    }

    fn subscribe_messages(
        &self,
        id: ConversationId,
        on_snapshot: OnSnapshot<Message>,
    ) -> Result<Subscription, StoreError> {
        self.conversation(id)?;
        Ok(self.listen(
            move |change| change.conversation == id && change.kind == ChangeKind::MessageAppended,
            move |shared| match shared.read(|c| c.messages(id)) {
                Ok(log) => on_snapshot(log),
                Err(e) => tracing::warn!("message snapshot failed: {e}"),
            },
        ))
    }
}
