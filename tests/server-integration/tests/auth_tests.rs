use reqwest::StatusCode;
use serde_json::{json, Value};
use supplylink_common::identity::{UserId, UserProfile, UserRole};
use supplylink_server_integration::harness::{Account, PASSWORD};
use supplylink_server_integration::TestServer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn signup_login_me_round_trip() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "Chaat@Corner.in", "Chaat Corner", UserRole::Vendor).await;
    assert_eq!(vendor.user.email, "chaat@corner.in");
    assert_eq!(vendor.user.role, UserRole::Vendor);

    let me: UserProfile = vendor.get_json("/me").await;
    assert_eq!(me, vendor.user);

    let profile: Value = vendor.get_json("/profile").await;
    assert_eq!(profile["company_label"], "Street Food Vendor");
    assert_eq!(profile["role_label"], "Vendor");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn signup_rejects_duplicates_and_weak_passwords() {
    let server = TestServer::start().await;
    Account::signup(&server, "oil@pure.in", "Pure Oil", UserRole::Supplier).await;
    let client = reqwest::Client::new();

    let dup = client
        .post(server.url("/auth/signup"))
        .json(&json!({ "email": "OIL@pure.in", "password": PASSWORD, "company_name": "Again", "role": "supplier" }))
        .send()
        .await
        .unwrap();
    assert_eq!(dup.status(), StatusCode::CONFLICT);

    let weak = client
        .post(server.url("/auth/signup"))
        .json(&json!({ "email": "new@pure.in", "password": "123", "company_name": "New", "role": "vendor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);
    let body: Value = weak.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("at least 6"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn bad_credentials_and_missing_tokens_are_unauthorized() {
    let server = TestServer::start().await;
    Account::signup(&server, "spice@garden.in", "Spice Garden", UserRole::Supplier).await;
    let client = reqwest::Client::new();

    let wrong = client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "spice@garden.in", "password": "not-it" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let anonymous = client.get(server.url("/me")).send().await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let forged = client
        .get(server.url("/dashboard"))
        .bearer_auth("deadbeef")
        .send()
        .await
        .unwrap();
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_without_profile_fails() {
    let server = TestServer::start().await;
    server
        .state
        .identity
        .register(UserId::new("orphan"), "orphan@x.in", PASSWORD)
        .unwrap();

    let res = reqwest::Client::new()
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "orphan@x.in", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "User profile not found.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logout_revokes_the_token() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "bye@x.in", "Bye Bites", UserRole::Vendor).await;
    let res = vendor.post("/auth/logout", &json!({})).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(vendor.get("/me").await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn company_name_can_be_edited() {
    let server = TestServer::start().await;
    let supplier = Account::signup(&server, "farm@x.in", "Old Farm", UserRole::Supplier).await;

    let res = supplier.put("/profile", &json!({ "company_name": "  New Farm  " })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let me: UserProfile = supplier.get_json("/me").await;
    assert_eq!(me.company_name, "New Farm");
    assert_eq!(me.role, UserRole::Supplier);

    let blank = supplier.put("/profile", &json!({ "company_name": " " })).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}
