use std::sync::Arc;

use supplylink_common::assistant::{Assistant, CannedResponder, Responder};

use crate::auth::{IdentityProvider, MemoryIdentityProvider};
use crate::catalog::Catalog;
use crate::store::{ConversationService, MemoryStore, UserStore};

pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub users: Arc<dyn UserStore>,
    pub conversations: Arc<dyn ConversationService>,
    pub catalog: Catalog,
    pub assistant: Assistant<Box<dyn Responder>>,
}

impl AppState {
    /// Everything in process memory, with the demo catalog and the offline
    /// assistant.
    pub fn in_memory() -> Arc<Self> {
        let store = MemoryStore::new();
        Arc::new(Self {
            identity: Arc::new(MemoryIdentityProvider::new()),
            users: Arc::new(store.clone()),
            conversations: Arc::new(store),
            catalog: Catalog::seeded(),
            assistant: Assistant::new(Box::new(CannedResponder)),
        })
    }
}
