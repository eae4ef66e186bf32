use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use supplylink_common::identity::UserRole;
use supplylink_common::order::{filter_by_status, Order, OrderStatus};
use supplylink_common::seed;

use crate::error::AppError;
use crate::session::Session;

#[derive(Deserialize)]
pub struct OrdersQuery {
    status: Option<String>,
}

#[derive(Serialize)]
pub struct OrderRow {
    #[serde(flatten)]
    order: Order,
    total: u64,
    total_label: String,
}

/// Demo orders for `role`: purchases for vendors, incoming orders for suppliers.
pub fn orders_for(role: UserRole) -> Vec<Order> {
    match role {
        UserRole::Vendor => seed::vendor_orders(),
        UserRole::Supplier => seed::supplier_orders(),
    }
}

pub async fn list(
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderRow>>, AppError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
    };
    let rows = filter_by_status(&orders_for(session.role()), status)
        .into_iter()
        .map(|order| OrderRow {
            total: order.total(),
            total_label: order.total_label(),
            order,
        })
        .collect();
    Ok(Json(rows))
}
