//! Checkout Handlers

pub(crate) mod cart_checkout;
pub(crate) mod get;
pub(crate) mod owner_checkout;
pub(crate) mod pricing;
