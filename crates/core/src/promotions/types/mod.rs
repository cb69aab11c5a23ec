//! Promotion types

mod bulk_percent_discount;
mod buy_n_pay_m;
mod buy_x_get_y_free;

pub use bulk_percent_discount::BulkPercentDiscount;
pub use buy_n_pay_m::BuyNPayM;
pub use buy_x_get_y_free::BuyXGetYFree;
