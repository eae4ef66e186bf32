use reqwest::StatusCode;
use serde_json::{json, Value};
use supplylink_common::identity::UserRole;
use supplylink_server_integration::harness::Account;
use supplylink_server_integration::TestServer;

async fn ask(account: &Account, prompt: &str) -> Value {
    let res = account.post("/assistant", &json!({ "prompt": prompt })).await;
    assert_eq!(res.status(), StatusCode::OK, "{prompt}");
    res.json().await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn prompts_route_to_canned_capabilities() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;

    let recs = ask(&vendor, "Please RECOMMEND a product for pav bhaji").await;
    assert_eq!(recs["capability"], "product-recommendation");
    assert!(recs["reply"].as_str().unwrap().contains("product recommendations"));

    let orders = ask(&vendor, "Analyze my recent orders and suggest improvements").await;
    assert_eq!(orders["capability"], "order-analysis");
    assert!(orders["reply"].as_str().unwrap().contains("Ordering Patterns"));

    let rejected = ask(&vendor, "Why was my order cancelled?").await;
    assert!(rejected["reply"].as_str().unwrap().contains("Common Rejection Reasons"));

    let delivery = ask(&vendor, "delivery optimization ideas").await;
    assert!(delivery["reply"].as_str().unwrap().contains("Delivery Optimization"));

    let hello = ask(&vendor, "hello there").await;
    assert_eq!(hello["capability"], "general");
    assert!(hello["reply"].as_str().unwrap().starts_with("I'm your SupplyLink AI Assistant"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn caller_context_is_accepted() {
    let server = TestServer::start().await;
    let supplier = Account::signup(&server, "s@x.in", "Spice Co", UserRole::Supplier).await;
    let res = supplier
        .post(
            "/assistant",
            &json!({
                "prompt": "recommend product",
                "context": { "ingredients": ["turmeric"], "budget": "low", "location": "Pune" }
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blank_prompt_is_rejected() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let res = vendor.post("/assistant", &json!({ "prompt": "  " })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn suggestions_depend_on_role() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "Spice Co", UserRole::Supplier).await;

    let for_vendor: Value = vendor.get_json("/assistant/suggestions").await;
    assert!(for_vendor["welcome"].as_str().unwrap().starts_with("Hello! I'm your SupplyLink AI Assistant"));
    assert_eq!(for_vendor["suggestions"][0]["title"], "Inventory Optimization");

    let for_supplier: Value = supplier.get_json("/assistant/suggestions").await;
    assert_eq!(for_supplier["suggestions"][0]["title"], "Market Trends");
    assert_eq!(for_supplier["suggestions"].as_array().unwrap().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn insights_depend_on_role() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Chaat Corner", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "Spice Co", UserRole::Supplier).await;

    let res = vendor.post("/assistant/insights", &json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let savings: Value = res.json().await.unwrap();
    assert_eq!(savings["capability"], "cost-optimization");
    assert!(savings["reply"].as_str().unwrap().contains("Bulk Purchasing"));

    let res = supplier
        .post(
            "/assistant/insights",
            &json!({ "context": { "categories": ["Spices"], "location": "Pune, Maharashtra" } }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let market: Value = res.json().await.unwrap();
    assert_eq!(market["capability"], "market-insights");
    assert!(market["reply"].as_str().unwrap().contains("Demand Trends"));
}
