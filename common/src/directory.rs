use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::format_rupees;

/// Identifier of a supplier listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub String);

impl SupplierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub business_hours: String,
}

/// A supplier's entry in the directory vendors browse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierEntry {
    pub id: SupplierId,
    pub name: String,
    pub location: String,
    pub distance_km: f32,
    pub rating: f32,
    pub reviews: u32,
    pub verified: bool,
    pub specialties: Vec<String>,
    pub delivery_time: String,
    /// Minimum order value in whole rupees.
    pub min_order: u64,
    pub trust_score: u8,
    pub product_count: u32,
    pub joined: u16,
    pub contact: ContactDetails,
}

impl SupplierEntry {
    pub fn min_order_label(&self) -> String {
        format_rupees(self.min_order)
    }

    /// Case-insensitive match on name, specialty or location.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.location.to_lowercase().contains(&query)
            || self
                .specialties
                .iter()
                .any(|s| s.to_lowercase().contains(&query))
    }
}

/// Directory entries matching `query`, nearest first.
pub fn search<'a>(entries: &'a [SupplierEntry], query: &str) -> Vec<&'a SupplierEntry> {
    let mut found: Vec<_> = entries.iter().filter(|e| e.matches(query)).collect();
    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found
}
