//! Product listings and the supplier directory.

use std::sync::{PoisonError, RwLock};

use supplylink_common::directory::{self, SupplierEntry, SupplierId};
use supplylink_common::product::{sort_products, NewProduct, Product, ProductId, ProductStatus, SortOrder};
use supplylink_common::seed;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product name is required.")]
    MissingName,
    #[error("Price must be greater than zero.")]
    ZeroPrice,
}

pub struct Catalog {
    products: RwLock<Vec<Product>>,
    suppliers: Vec<SupplierEntry>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, suppliers: Vec<SupplierEntry>) -> Self {
        Self {
            products: RwLock::new(products),
            suppliers,
        }
    }

    /// Catalog preloaded with the demo listings and directory.
    pub fn seeded() -> Self {
        Self::new(seed::products(), seed::suppliers())
    }

    fn products(&self) -> Vec<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Active listings matching `query`, in `order`.
    pub fn marketplace(&self, query: &str, order: SortOrder) -> Vec<Product> {
        let mut found: Vec<_> = self
            .products()
            .into_iter()
            .filter(|p| p.status == ProductStatus::Active && p.matches(query))
            .collect();
        sort_products(&mut found, order);
        found
    }

    pub fn products_of(&self, supplier: &SupplierId) -> Vec<Product> {
        self.products()
            .into_iter()
            .filter(|p| p.supplier_id == *supplier)
            .collect()
    }

    pub fn add_product(
        &self,
        supplier: SupplierId,
        supplier_name: &str,
        new: NewProduct,
    ) -> Result<Product, CatalogError> {
        if new.name.trim().is_empty() {
            return Err(CatalogError::MissingName);
        }
        if new.price == 0 {
            return Err(CatalogError::ZeroPrice);
        }
        let id = ProductId(format!("prod-{}", Uuid::new_v4().simple()));
        let product = new.into_product(id, supplier, supplier_name);
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(product.clone());
        tracing::info!(product = %product.id, supplier = %product.supplier_id, "product listed");
        Ok(product)
    }

    pub fn suppliers(&self, query: &str) -> Vec<SupplierEntry> {
        directory::search(&self.suppliers, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn supplier(&self, id: &SupplierId) -> Option<&SupplierEntry> {
        self.suppliers.iter().find(|s| s.id == *id)
    }

    pub fn directory(&self) -> &[SupplierEntry] {
        &self.suppliers
    }
}
