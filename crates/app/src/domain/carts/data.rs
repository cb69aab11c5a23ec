//! Cart Data

use crate::domain::{carts::records::CartItemUuid, products::records::ProductUuid};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product: ProductUuid,
    pub quantity: u32,
}
