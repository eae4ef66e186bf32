use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::format_rupees;

/// Order identifier as shown to users (`#1234`, `#S1234`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Approved,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Orders that ended without delivery.
    pub fn is_rejection(self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Rejected)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match normalized.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "approved" => Ok(OrderStatus::Approved),
            "intransit" => Ok(OrderStatus::InTransit),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            "rejected" => Ok(OrderStatus::Rejected),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// Free-form quantity as ordered (`25kg`, `10L`).
    pub quantity: String,
    /// Line total in whole rupees.
    pub price: u64,
}

/// An order as listed on the orders page.
///
/// For vendors `counterparty` is the supplier; for suppliers it is the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub counterparty: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Order {
    pub fn total(&self) -> u64 {
        self.items.iter().map(|i| i.price).sum()
    }

    pub fn total_label(&self) -> String {
        format_rupees(self.total())
    }
}

/// Orders with `status`, or all of them when `status` is `None`.
pub fn filter_by_status(orders: &[Order], status: Option<OrderStatus>) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| status.map_or(true, |s| o.status == s))
        .cloned()
        .collect()
}
