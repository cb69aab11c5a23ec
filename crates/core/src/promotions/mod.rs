//! Promotions
//!
//! Stored promotions arrive as a kind name plus a loosely-typed parameter document. Turning that
//! into a [`PromotionRule`] either yields a fully validated rule or a [`RuleError`] explaining why
//! the promotion is inert. Nothing in between is representable.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::promotions::{
    parameters::Parameters,
    types::{BulkPercentDiscount, BuyNPayM, BuyXGetYFree},
};

pub mod aggregation;
pub mod applicability;
mod parameters;
pub mod types;

/// Reasons a promotion cannot take part in pricing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The stored kind is not one this engine understands.
    #[error("unknown promotion kind \"{0}\"")]
    UnknownKind(String),

    /// A required parameter is absent or empty.
    #[error("missing parameter `{0}`")]
    MissingParameter(&'static str),

    /// A parameter is present but has the wrong type or does not fit.
    #[error("parameter `{0}` has the wrong type or is out of range")]
    InvalidParameter(&'static str),

    /// A count parameter is zero or negative.
    #[error("parameter `{0}` must be greater than zero")]
    NonPositive(&'static str),

    /// Percentage outside `(0, 100]`.
    #[error("discount percentage {0} is outside (0, 100]")]
    PercentOutOfRange(Decimal),

    /// The trigger and reward of a buy-X-get-Y promotion are the same SKU.
    #[error("trigger and free SKU are both \"{0}\"")]
    SelfReferential(String),
}

/// Supported promotion kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    /// Buy some units of one SKU, get units of another SKU free.
    BuyXGetYFree,

    /// For every `paid + free` units of a SKU, `free` of them cost nothing.
    BuyNPayM,

    /// Percentage off every unit of a SKU once a minimum quantity is reached.
    BulkPercentDiscount,
}

impl PromotionKind {
    /// Storage name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuyXGetYFree => "buy_x_get_y_free",
            Self::BuyNPayM => "buy_n_pay_m",
            Self::BulkPercentDiscount => "bulk_percent_discount",
        }
    }
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionKind {
    type Err = RuleError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "buy_x_get_y_free" => Ok(Self::BuyXGetYFree),
            "buy_n_pay_m" => Ok(Self::BuyNPayM),
            "bulk_percent_discount" => Ok(Self::BulkPercentDiscount),
            other => Err(RuleError::UnknownKind(other.to_string())),
        }
    }
}

/// A validated promotion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionRule {
    /// See [`BuyXGetYFree`].
    BuyXGetYFree(BuyXGetYFree),

    /// See [`BuyNPayM`].
    BuyNPayM(BuyNPayM),

    /// See [`BulkPercentDiscount`].
    BulkPercentDiscount(BulkPercentDiscount),
}

impl PromotionRule {
    /// Parse a stored kind name and parameter document.
    ///
    /// Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] when the kind is unknown or any required parameter is missing,
    /// mistyped, zero or negative.
    pub fn from_document(kind: &str, document: &Value) -> Result<Self, RuleError> {
        let parameters = Parameters::new(document);

        match kind.parse::<PromotionKind>()? {
            PromotionKind::BuyXGetYFree => {
                BuyXGetYFree::from_parameters(&parameters).map(Self::BuyXGetYFree)
            }
            PromotionKind::BuyNPayM => BuyNPayM::from_parameters(&parameters).map(Self::BuyNPayM),
            PromotionKind::BulkPercentDiscount => {
                BulkPercentDiscount::from_parameters(&parameters).map(Self::BulkPercentDiscount)
            }
        }
    }

    /// Kind of the rule.
    pub const fn kind(&self) -> PromotionKind {
        match self {
            Self::BuyXGetYFree(_) => PromotionKind::BuyXGetYFree,
            Self::BuyNPayM(_) => PromotionKind::BuyNPayM,
            Self::BulkPercentDiscount(_) => PromotionKind::BulkPercentDiscount,
        }
    }

    /// Human-readable summary used on receipts.
    pub fn describe(&self) -> String {
        match self {
            Self::BuyXGetYFree(rule) => rule.describe(),
            Self::BuyNPayM(rule) => rule.describe(),
            Self::BulkPercentDiscount(rule) => rule.describe(),
        }
    }
}

/// A promotion as handed over by the promotion store: identity, kind and raw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionDefinition {
    id: Uuid,
    kind: String,
    parameters: Value,
}

impl PromotionDefinition {
    /// Create a new promotion definition.
    pub fn new(id: Uuid, kind: impl Into<String>, parameters: Value) -> Self {
        Self {
            id,
            kind: kind.into(),
            parameters,
        }
    }

    /// Return the promotion id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stored kind name.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Raw parameter document.
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Parse into a typed rule.
    ///
    /// # Errors
    ///
    /// See [`PromotionRule::from_document`].
    pub fn rule(&self) -> Result<PromotionRule, RuleError> {
        PromotionRule::from_document(&self.kind, &self.parameters)
    }
}
