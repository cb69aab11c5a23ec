//! Lenient reads from a promotion parameter document.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::promotions::RuleError;

/// Borrowed view over a stored parameter document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Parameters<'d> {
    document: &'d Value,
}

impl<'d> Parameters<'d> {
    pub(crate) fn new(document: &'d Value) -> Self {
        Self { document }
    }

    fn get(&self, key: &'static str) -> Result<&'d Value, RuleError> {
        self.document
            .get(key)
            .filter(|value| !value.is_null())
            .ok_or(RuleError::MissingParameter(key))
    }

    /// A non-blank SKU string.
    pub(crate) fn sku(&self, key: &'static str) -> Result<String, RuleError> {
        let sku = self
            .get(key)?
            .as_str()
            .ok_or(RuleError::InvalidParameter(key))?
            .trim();

        if sku.is_empty() {
            return Err(RuleError::MissingParameter(key));
        }

        Ok(sku.to_string())
    }

    /// A strictly positive whole-number count.
    pub(crate) fn quantity(&self, key: &'static str) -> Result<u32, RuleError> {
        let count = self
            .get(key)?
            .as_i64()
            .ok_or(RuleError::InvalidParameter(key))?;

        if count <= 0 {
            return Err(RuleError::NonPositive(key));
        }

        u32::try_from(count)
            .ok()
            .ok_or(RuleError::InvalidParameter(key))
    }

    /// A decimal given either as a JSON number or a numeric string.
    pub(crate) fn decimal(&self, key: &'static str) -> Result<Decimal, RuleError> {
        let parsed = match self.get(key)? {
            Value::Number(number) => Decimal::from_str(&number.to_string()).ok(),
            Value::String(text) => Decimal::from_str(text.trim()).ok(),
            _ => None,
        };

        parsed.ok_or(RuleError::InvalidParameter(key))
    }
}
