//! Cart Records

use jiff::Timestamp;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Whoever a cart belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Owner;

/// Owner UUID
pub type OwnerUuid = TypedUuid<Owner>;

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: OwnerUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record, joined with the product it refers to.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart: CartUuid,
    pub product: ProductUuid,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
