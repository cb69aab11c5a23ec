//! Promotions Records

use jiff::Timestamp;
use rebate::promotions::PromotionDefinition;
use serde_json::Value;

use crate::uuids::TypedUuid;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Promotion Record
///
/// `kind` and `parameters` are stored as authored. Whether they form a valid rule is only decided
/// when a cart is priced.
#[derive(Debug, Clone)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub name: String,
    pub kind: String,
    pub parameters: Value,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<&PromotionRecord> for PromotionDefinition {
    fn from(record: &PromotionRecord) -> Self {
        PromotionDefinition::new(
            record.uuid.into_uuid(),
            record.kind.clone(),
            record.parameters.clone(),
        )
    }
}
