//! Discount arithmetic
//!
//! Minor-unit helpers shared by the promotion calculators. Amounts stay exact integers until a
//! percentage is applied, which is the only place rounding happens.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Minor-unit arithmetic left the `i64` range.
    #[error("discount arithmetic overflowed")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Convert a whole-number percentage such as `12.5` (meaning 12.5%) into a [`Percentage`].
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the division cannot be represented.
pub fn percentage_of_hundred(percent: Decimal) -> Result<Percentage, DiscountError> {
    percent
        .checked_div(Decimal::ONE_HUNDRED)
        .map(Percentage::from)
        .ok_or(DiscountError::PercentConversion)
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// The result is rounded to the nearest minor unit with midpoints rounded away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows or cannot be
/// represented as an `i64`.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // the percentage type only exposes its value through `Mul`
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Price of `units` units at `unit_price` minor units each.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the product does not fit in an `i64`.
pub fn units_minor(units: u64, unit_price: i64) -> Result<i64, DiscountError> {
    i64::try_from(units)
        .ok()
        .and_then(|units| units.checked_mul(unit_price))
        .ok_or(DiscountError::Overflow)
}

/// Checked sum of minor-unit amounts.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the sum does not fit in an `i64`.
pub fn sum_minor<I>(amounts: I) -> Result<i64, DiscountError>
where
    I: IntoIterator<Item = i64>,
{
    amounts
        .into_iter()
        .try_fold(0_i64, i64::checked_add)
        .ok_or(DiscountError::Overflow)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);

        assert_eq!(percent_of_minor(&percent, 200)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_up() -> TestResult {
        let percent = percentage_of_hundred(Decimal::from(10))?;

        // 10% of 1.25 is 0.125, which rounds up to 0.13
        assert_eq!(percent_of_minor(&percent, 125)?, 13);

        // 10% of 1.24 is 0.124, which rounds down to 0.12
        assert_eq!(percent_of_minor(&percent, 124)?, 12);

        Ok(())
    }

    #[test]
    fn fractional_percentages_keep_full_precision() -> TestResult {
        let percent = percentage_of_hundred(Decimal::from_str("12.5")?)?;

        assert_eq!(percent_of_minor(&percent, 1_000)?, 125);

        Ok(())
    }

    #[test]
    fn units_minor_multiplies() -> TestResult {
        assert_eq!(units_minor(3, 50)?, 150);

        Ok(())
    }

    #[test]
    fn units_minor_overflow_returns_error() {
        assert!(matches!(
            units_minor(u64::MAX, 1),
            Err(DiscountError::Overflow)
        ));
        assert!(matches!(
            units_minor(2, i64::MAX),
            Err(DiscountError::Overflow)
        ));
    }

    #[test]
    fn sum_minor_adds_and_detects_overflow() -> TestResult {
        assert_eq!(sum_minor([1, 2, 3])?, 6);
        assert!(matches!(
            sum_minor([i64::MAX, 1]),
            Err(DiscountError::Overflow)
        ));

        Ok(())
    }
}
