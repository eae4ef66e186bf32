use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use supplylink_common::directory::{SupplierEntry, SupplierId};
use supplylink_common::identity::UserRole;
use supplylink_common::product::{NewProduct, Product, SortOrder};

use crate::error::AppError;
use crate::session::Session;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProductRow {
    #[serde(flatten)]
    product: Product,
    price_label: String,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            price_label: product.price_label(),
            product,
        }
    }
}

#[derive(Serialize)]
pub struct SupplierRow {
    #[serde(flatten)]
    entry: SupplierEntry,
    min_order_label: String,
}

impl From<SupplierEntry> for SupplierRow {
    fn from(entry: SupplierEntry) -> Self {
        Self {
            min_order_label: entry.min_order_label(),
            entry,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct MarketplaceQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sort: SortOrder,
}

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

fn rows<T, R: From<T>>(items: Vec<T>) -> Json<Vec<R>> {
    Json(items.into_iter().map(R::from).collect())
}

/// The signed-in supplier's own listings.
pub async fn my_products(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Vec<ProductRow>>, AppError> {
    session.require(UserRole::Supplier)?;
    let me = SupplierId::new(session.id().as_str());
    Ok(rows(state.catalog.products_of(&me)))
}

pub async fn add_product(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductRow>), AppError> {
    session.require(UserRole::Supplier)?;
    let me = SupplierId::new(session.id().as_str());
    let product = state
        .catalog
        .add_product(me, session.user.display_name(), new)?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn marketplace(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<MarketplaceQuery>,
) -> Result<Json<Vec<ProductRow>>, AppError> {
    session.require(UserRole::Vendor)?;
    Ok(rows(state.catalog.marketplace(&query.q, query.sort)))
}

pub async fn suppliers(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SupplierRow>>, AppError> {
    session.require(UserRole::Vendor)?;
    Ok(rows(state.catalog.suppliers(&query.q)))
}

pub async fn supplier(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<SupplierRow>, AppError> {
    session.require(UserRole::Vendor)?;
    let entry = state
        .catalog
        .supplier(&SupplierId::new(id.clone()))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("supplier {id}")))?;
    Ok(Json(entry.into()))
}
