use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::{format_unit_price, PriceUnit};
use crate::directory::SupplierId;

/// Catalog product identifier (`prod-1`, `prod-2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category of ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Vegetables,
    Grains,
    Oils,
    Spices,
    Herbs,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Archived,
}

/// A product listing in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    /// Whole rupees per `unit`.
    pub price: u64,
    pub unit: PriceUnit,
    pub inventory: u32,
    pub status: ProductStatus,
    pub quality: String,
    pub bulk_pricing: Option<String>,
    pub rating: f32,
    pub reviews: u32,
    pub verified: bool,
}

impl Product {
    /// Display price, e.g. `₹45/kg`.
    pub fn price_label(&self) -> String {
        format_unit_price(self.price, self.unit)
    }

    /// Case-insensitive match on name, category or supplier.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let category = match &self.category {
            ProductCategory::Other(name) => name.to_lowercase(),
            other => format!("{other:?}").to_lowercase(),
        };
        self.name.to_lowercase().contains(&query)
            || self.supplier_name.to_lowercase().contains(&query)
            || category.contains(&query)
    }
}

/// Ordering of marketplace results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Rating,
}

pub fn sort_products(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Relevance => {}
        SortOrder::PriceLow => products.sort_by_key(|p| p.price),
        SortOrder::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

/// Fields a supplier fills in when listing a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ProductCategory,
    pub price: u64,
    #[serde(default)]
    pub unit: PriceUnit,
    #[serde(default)]
    pub inventory: u32,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub bulk_pricing: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId, supplier_id: SupplierId, supplier_name: &str) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            category: self.category,
            supplier_id,
            supplier_name: supplier_name.to_string(),
            price: self.price,
            unit: self.unit,
            inventory: self.inventory,
            status: ProductStatus::Active,
            quality: self.quality.unwrap_or_else(|| "Standard".to_string()),
            bulk_pricing: self.bulk_pricing,
            rating: 0.0,
            reviews: 0,
            verified: false,
        }
    }
}
