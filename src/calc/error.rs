use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the calculation engine when it is handed input it cannot work with.
///
/// A projection that never resolves is not an error; those functions return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid frequency '{value}', expected one of: {expected}")]
    InvalidFrequency {
        value: String,
        expected: &'static str,
    },

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// The largest amount of money a record may hold: £1 trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// The largest annual interest rate a debt may carry, as a percentage.
pub const MAX_INTEREST_RATE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

impl CalcError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Fails with `InvalidParameter` when `value` is below zero.
pub(crate) fn non_negative(name: &'static str, value: Decimal) -> CalcResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalcError::invalid(
            name,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(value)
}

/// Fails with `InvalidParameter` unless `0 <= value <= max`.
pub(crate) fn at_most(name: &'static str, value: Decimal, max: Decimal) -> CalcResult<Decimal> {
    non_negative(name, value)?;
    if value > max {
        return Err(CalcError::invalid(
            name,
            format!("must not be more than {max}, got {value}"),
        ));
    }
    Ok(value)
}

/// An amount of money held by a record: `0 <= value <= MAX_AMOUNT`.
pub(crate) fn bounded(name: &'static str, value: Decimal) -> CalcResult<Decimal> {
    at_most(name, value, MAX_AMOUNT)
}

/// The error for arithmetic that leaves the range `Decimal` can represent.
pub(crate) fn overflow(name: &'static str) -> CalcError {
    CalcError::invalid(name, "is too large to calculate with")
}

/// Adds up `values`, failing instead of overflowing.
pub(crate) fn checked_sum(
    name: &'static str,
    values: impl IntoIterator<Item = Decimal>,
) -> CalcResult<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).ok_or_else(|| overflow(name))
    })
}

/// Fails with `InvalidParameter` unless `0 <= value <= 1`.
pub(crate) fn fraction(name: &'static str, value: Decimal) -> CalcResult<Decimal> {
    non_negative(name, value)?;
    if value > Decimal::ONE {
        return Err(CalcError::invalid(
            name,
            format!("must be between 0 and 1, got {value}"),
        ));
    }
    Ok(value)
}
