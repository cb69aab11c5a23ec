//! Rebate
//!
//! Rebate evaluates promotion rules against a cart and prices it for checkout: which promotions
//! apply, how much each one takes off, and how that discount lands on individual lines.
//!
//! Everything in this crate is pure and deterministic. Loading carts and rules, logging and
//! persistence live in the application layer.

pub mod allocation;
pub mod cart;
pub mod discounts;
pub mod pricing;
pub mod promotions;
