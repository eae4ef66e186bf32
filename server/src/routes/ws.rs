//! Live snapshots over WebSocket. Each connection owns one subscription and
//! drops it when the socket closes or its session is revoked.

use std::sync::Arc;

use axum::extract::ws::{close_code, CloseFrame, Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use supplylink_common::conversation::ConversationId;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;

use super::chat::joined_conversation;
use crate::auth::IdentityProvider;
use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;
use crate::store::{OnSnapshot, Subscription};

/// Snapshot callback that keeps only the newest encoded snapshot in `tx`.
/// Each snapshot replaces the previous one, so a slow client skips stale
/// ones instead of queueing them.
fn forward<T: Serialize + 'static>(tx: watch::Sender<Option<String>>) -> OnSnapshot<T> {
    Box::new(move |snapshot: Vec<T>| match serde_json::to_string(&snapshot) {
        Ok(json) => {
            tx.send_replace(Some(json));
        }
        Err(e) => tracing::warn!("failed to encode snapshot: {e}"),
    })
}

/// The session a stream was opened with.
struct StreamAuth {
    identity: Arc<dyn IdentityProvider>,
    token: String,
    revocations: broadcast::Receiver<String>,
}

impl StreamAuth {
    /// Subscribe to revocations before the upgrade so a logout racing the
    /// handshake is still seen.
    fn new(state: &AppState, session: &Session) -> Self {
        Self {
            identity: Arc::clone(&state.identity),
            token: session.token.clone(),
            revocations: state.identity.revocations(),
        }
    }

    fn is_valid(&self) -> bool {
        self.identity.resolve(&self.token).is_ok()
    }
}

async fn close_revoked(sender: &mut SplitSink<WebSocket, WsMessage>) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: "session revoked".into(),
    };
    let _ = sender.send(WsMessage::Close(Some(frame))).await;
}

async fn pump(
    socket: WebSocket,
    mut rx: watch::Receiver<Option<String>>,
    subscription: Subscription,
    mut auth: StreamAuth,
) {
    let (mut sender, mut receiver) = socket.split();
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if !auth.is_valid() {
                    close_revoked(&mut sender).await;
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                if let Some(json) = snapshot {
                    if sender.send(WsMessage::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }
            revoked = auth.revocations.recv() => match revoked {
                Ok(token) if token == auth.token => {
                    close_revoked(&mut sender).await;
                    break;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => {
                    if !auth.is_valid() {
                        close_revoked(&mut sender).await;
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                // Clients only listen; anything else they send is ignored.
                Some(Ok(_)) => {}
            },
        }
    }
    subscription.cancel();
    tracing::debug!("websocket closed");
}

pub async fn conversations(
    State(state): State<Arc<AppState>>,
    session: Session,
    ws: WebSocketUpgrade,
) -> Response {
    let auth = StreamAuth::new(&state, &session);
    let (tx, rx) = watch::channel(None);
    let user = session.id().clone();
    ws.on_upgrade(move |socket| async move {
        tracing::debug!(user = %user, "conversation list stream opened");
        let subscription = state.conversations.subscribe_conversations(user, forward(tx));
        pump(socket, rx, subscription, auth).await;
    })
}

pub async fn messages(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<ConversationId>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    joined_conversation(&state, &session, id)?;
    let auth = StreamAuth::new(&state, &session);
    let (tx, rx) = watch::channel(None);
    Ok(ws.on_upgrade(move |socket| async move {
        match state.conversations.subscribe_messages(id, forward(tx)) {
            Ok(subscription) => {
                tracing::debug!(conversation = %id, "message stream opened");
                pump(socket, rx, subscription, auth).await;
            }
            Err(e) => tracing::warn!(conversation = %id, "message stream refused: {e}"),
        }
    }))
}
