//! Promotions Data

use rebate::promotions::PromotionKind;
use serde_json::Value;

use crate::domain::promotions::records::PromotionUuid;

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub name: String,
    pub kind: PromotionKind,
    pub parameters: Value,
    pub active: bool,
}
