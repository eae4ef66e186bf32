use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use supplylink_common::conversation::ConversationSummary;
use supplylink_common::identity::UserRole;
use supplylink_common::message::Message;
use supplylink_server_integration::harness::{expect_closed, next_snapshot, quiet_for, Account};
use supplylink_server_integration::TestServer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn message_stream_pushes_full_snapshots() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;
    let id = vendor.start_conversation(supplier.id()).await;

    let mut ws = supplier.open_ws(&format!("/ws/conversations/{id}/messages")).await;
    assert!(next_snapshot::<Message>(&mut ws).await.is_empty());

    vendor.send(id, "Namaste").await;
    let first = next_snapshot::<Message>(&mut ws).await;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].text, "Namaste");

    supplier.send(id, "Namaste ji").await;
    let second = next_snapshot::<Message>(&mut ws).await;
    let texts: Vec<_> = second.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["Namaste", "Namaste ji"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn conversation_stream_tracks_new_threads_and_previews() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;
    let other = Account::signup(&server, "o@x.in", "Green Valley Farms", UserRole::Supplier).await;

    let mut ws = supplier.open_ws("/ws/conversations").await;
    assert!(next_snapshot::<ConversationSummary>(&mut ws).await.is_empty());

    let id = vendor.start_conversation(supplier.id()).await;
    let created = next_snapshot::<ConversationSummary>(&mut ws).await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, id);

    // Traffic between other parties stays off this stream.
    let unrelated = vendor.start_conversation(other.id()).await;
    vendor.send(unrelated, "hello Green Valley").await;
    assert!(quiet_for(&mut ws, Duration::from_millis(200)).await);

    vendor.send(id, "Any onions today?").await;
    let updated = next_snapshot::<ConversationSummary>(&mut ws).await;
    assert_eq!(updated[0].last_message, "Any onions today?");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn streams_require_a_participant_token() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;
    let outsider = Account::signup(&server, "o@x.in", "Nosy Noodles", UserRole::Vendor).await;
    let id = vendor.start_conversation(supplier.id()).await;

    let path = format!("/ws/conversations/{id}/messages");
    assert!(tokio_tungstenite::connect_async(server.ws_url(&path, "bogus")).await.is_err());
    assert!(tokio_tungstenite::connect_async(server.ws_url(&path, &outsider.token)).await.is_err());
    assert!(tokio_tungstenite::connect_async(server.ws_url(&path, &vendor.token)).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logout_ends_open_streams() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;
    let id = vendor.start_conversation(supplier.id()).await;

    let mut messages = supplier.open_ws(&format!("/ws/conversations/{id}/messages")).await;
    let mut list = supplier.open_ws("/ws/conversations").await;
    assert!(next_snapshot::<Message>(&mut messages).await.is_empty());
    assert_eq!(next_snapshot::<ConversationSummary>(&mut list).await.len(), 1);

    let res = supplier.post("/auth/logout", &json!({})).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    vendor.send(id, "secret price list").await;

    expect_closed(&mut messages).await;
    expect_closed(&mut list).await;
    assert_eq!(supplier.get("/me").await.status(), StatusCode::UNAUTHORIZED);
}
