//! Rebate Domain Concerns

pub mod carts;
pub mod checkouts;
pub mod products;
pub mod promotions;
