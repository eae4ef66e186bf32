use reqwest::StatusCode;
use serde_json::json;
use supplylink_common::conversation::{ConversationId, ConversationSummary, NO_MESSAGES_PREVIEW};
use supplylink_common::identity::{UserId, UserRole};
use supplylink_server::demo::{DEMO_PASSWORD, DEMO_VENDOR_EMAIL};
use supplylink_server_integration::harness::Account;
use supplylink_server_integration::TestServer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn first_contact_creates_exactly_one_conversation() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;

    let first = vendor.start_conversation(supplier.id()).await;
    let again = vendor.start_conversation(supplier.id()).await;
    let reverse = supplier.start_conversation(vendor.id()).await;
    assert_eq!(first, again);
    assert_eq!(first, reverse);

    let list: Vec<ConversationSummary> = supplier.get_json("/conversations").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].other.name, "Chaat Corner");
    assert_eq!(list[0].other.company, "Street Food Vendor");
    assert_eq!(list[0].last_message, NO_MESSAGES_PREVIEW);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn messages_flow_both_ways_in_order() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;
    let id = vendor.start_conversation(supplier.id()).await;

    let question = vendor.send(id, "Rate for 50kg tomatoes?").await;
    assert_eq!(question.sender_name, "Chaat Corner");
    supplier.send(id, "₹40/kg with delivery tomorrow").await;
    vendor.send(id, "Done").await;

    let log = supplier.messages(id).await;
    let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["Rate for 50kg tomatoes?", "₹40/kg with delivery tomorrow", "Done"]);
    assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let list: Vec<ConversationSummary> = vendor.get_json("/conversations").await;
    assert_eq!(list[0].last_message, "Done");
    assert_eq!(list[0].updated_at, log[2].timestamp);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn outsiders_and_blank_messages_are_refused() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "FreshFarm Supplies", UserRole::Supplier).await;
    let outsider = Account::signup(&server, "o@x.in", "Nosy Noodles", UserRole::Vendor).await;
    let id = vendor.start_conversation(supplier.id()).await;

    let path = format!("/conversations/{id}/messages");
    assert_eq!(outsider.get(&path).await.status(), StatusCode::FORBIDDEN);
    let res = outsider.post(&path, &json!({ "text": "hello?" })).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let blank = vendor.post(&path, &json!({ "text": "   " })).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    assert!(vendor.messages(id).await.is_empty());

    let missing = format!("/conversations/{}/messages", ConversationId::random());
    assert_eq!(vendor.get(&missing).await.status(), StatusCode::NOT_FOUND);

    let unknown = vendor.post("/conversations", &json!({ "other_id": "ghost" })).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    let myself = vendor.post("/conversations", &json!({ "other_id": vendor.id() })).await;
    assert_eq!(myself.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn contacting_a_directory_supplier_reaches_their_inbox() {
    let server = TestServer::start_with_demo().await;
    let vendor = Account::login(&server, DEMO_VENDOR_EMAIL, DEMO_PASSWORD).await;
    let id = vendor.start_conversation(&UserId::new("supplier-3")).await;
    vendor.send(id, "Do you stock groundnut oil?").await;

    let supplier = Account::login(&server, "sales@pureoil.com", DEMO_PASSWORD).await;
    assert_eq!(supplier.id(), &UserId::new("supplier-3"));
    let inbox: Vec<ConversationSummary> = supplier.get_json("/conversations").await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, id);
    assert_eq!(inbox[0].other.name, "Mumbai Chaat Corner");
    assert_eq!(inbox[0].last_message, "Do you stock groundnut oil?");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unregistered_directory_supplier_can_still_be_contacted() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let id = vendor.start_conversation(&UserId::new("supplier-6")).await;

    let list: Vec<ConversationSummary> = vendor.get_json("/conversations").await;
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].other.name, "Herb Haven");
}
