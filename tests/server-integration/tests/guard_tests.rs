use reqwest::header::LOCATION;
use reqwest::StatusCode;
use serde_json::{json, Value};
use supplylink_common::guard::RestrictedView;
use supplylink_common::identity::UserRole;
use supplylink_server_integration::harness::Account;
use supplylink_server_integration::TestServer;

async fn assert_restricted(account: &Account, path: &str) {
    let res = account.get(path).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN, "{path}");
    assert_eq!(res.headers()[LOCATION], "/dashboard");
    let view: RestrictedView = res.json().await.unwrap();
    assert_eq!(view, RestrictedView::default());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn each_role_is_kept_out_of_the_others_pages() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Vada Pav Hub", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "Spice Co", UserRole::Supplier).await;

    assert_restricted(&vendor, "/products").await;
    assert_restricted(&supplier, "/marketplace").await;
    assert_restricted(&supplier, "/suppliers").await;
    assert_restricted(&supplier, "/suppliers/supplier-1").await;

    let res = vendor
        .post("/products", &json!({ "name": "Salt", "category": "Spices", "price": 20 }))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    assert_eq!(vendor.get("/marketplace").await.status(), StatusCode::OK);
    assert_eq!(supplier.get("/products").await.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dashboard_and_navigation_follow_the_role() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Vada Pav Hub", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "Spice Co", UserRole::Supplier).await;

    let vendor_dash: Value = vendor.get_json("/dashboard").await;
    assert_eq!(vendor_dash["heading"], "Vendor Dashboard");
    assert_eq!(vendor_dash["cards"][3]["value"], "₹12,450");
    let supplier_dash: Value = supplier.get_json("/dashboard").await;
    assert_eq!(supplier_dash["cards"][0]["value"], "₹2,45,000");

    let nav: Vec<Value> = supplier.get_json("/navigation").await;
    let labels: Vec<_> = nav.iter().map(|n| n["label"].as_str().unwrap()).collect();
    assert_eq!(labels, ["Overview", "Products", "Orders", "Chat", "AI Assistant", "Profile"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn supplier_lists_products_vendor_finds_them() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Vada Pav Hub", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "Dairy Delight", UserRole::Supplier).await;

    let res = supplier
        .post(
            "/products",
            &json!({ "name": "Malai Paneer", "category": { "Other": "Dairy" }, "price": 320, "unit": "kg" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["price_label"], "₹320/kg");
    assert_eq!(created["supplier_name"], "Dairy Delight");

    let mine: Vec<Value> = supplier.get_json("/products").await;
    assert_eq!(mine.len(), 1);

    let found: Vec<Value> = vendor.get_json("/marketplace?q=paneer").await;
    assert_eq!(found.len(), 1);
    let cheapest: Vec<Value> = vendor.get_json("/marketplace?sort=price-low").await;
    assert_eq!(cheapest[0]["name"], "Organic Onions");

    let zero = supplier
        .post("/products", &json!({ "name": "Free", "category": "Herbs", "price": 0 }))
        .await;
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn directory_and_orders() {
    let server = TestServer::start().await;
    let vendor = Account::signup(&server, "v@x.in", "Vada Pav Hub", UserRole::Vendor).await;
    let supplier = Account::signup(&server, "s@x.in", "Spice Co", UserRole::Supplier).await;

    let herbs: Vec<Value> = vendor.get_json("/suppliers?q=herbs").await;
    assert_eq!(herbs.len(), 3);
    assert_eq!(herbs[0]["name"], "Herb Haven");

    let oil: Value = vendor.get_json("/suppliers/supplier-3").await;
    assert_eq!(oil["min_order_label"], "₹1,000");
    assert_eq!(vendor.get("/suppliers/supplier-42").await.status(), StatusCode::NOT_FOUND);

    let delivered: Vec<Value> = vendor.get_json("/orders?status=delivered").await;
    assert_eq!(delivered.len(), 2);
    let all: Vec<Value> = vendor.get_json("/orders").await;
    assert_eq!(all[0]["total_label"], "₹1,650");

    let rejected: Vec<Value> = supplier.get_json("/orders?status=Rejected").await;
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["reason"], "Insufficient inventory");

    assert_eq!(vendor.get("/orders?status=lost").await.status(), StatusCode::BAD_REQUEST);
}
