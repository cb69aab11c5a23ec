//! Products Data

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub sku: String,
    pub name: String,
    pub price: u64,
    pub stock: u64,
}
