//! Amount type for monetary values entered with or without a pound sign.
//!
//! `Amount` wraps `Decimal` and accepts the ways people actually type money into a budget:
//! `£1,200.50`, `1200.50`, `1,200.5` or a bare JSON number.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const POUND: char = '£';

/// Represents how an amount was (or should be) written.
///
/// # Examples
///  - `AmountFormat{ pound: true, commas: true }` -> `£60,000.00`
///  - `AmountFormat{ pound: false, commas: true }` -> `60,000.00`
///  - `AmountFormat{ pound: false, commas: false }` -> `60000.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    pound: bool,
    commas: bool,
}

impl Default for AmountFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

/// `£60,000.00`
const DEFAULT_FORMAT: AmountFormat = AmountFormat {
    pound: true,
    commas: true,
};

/// A monetary amount in the household's currency.
///
/// Formatting only affects how the value is printed. Comparisons and hashing use the numeric
/// value, so `£1,000` and `1000.00` are equal.
///
/// ```
/// # use debt_snowball::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("£1,000").unwrap();
/// let b = Amount::from_str("1000.00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "£1,000.00");
/// assert_eq!(b.to_string(), "1000.00");
/// ```
#[derive(Clone, Copy, Default)]
pub struct Amount {
    value: Decimal,
    format: AmountFormat,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount with the default `£1,234.56` formatting.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: DEFAULT_FORMAT,
        }
    }

    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn format(&self) -> AmountFormat {
        self.format
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value.is_sign_negative()
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl std::hash::Hash for Amount {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.normalize().hash(state)
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.value)
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // "-£50" and "£-50" are both accepted
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let (pound, unsigned) = match unsigned.strip_prefix(POUND) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, unsigned),
        };

        // One sign only: "-£-50" and "--50" are rejected
        if negative && unsigned.starts_with(['-', '+']) {
            return Err(AmountError(rust_decimal::Error::ErrorString(format!(
                "more than one sign in '{trimmed}'"
            ))));
        }

        let digits = unsigned.replace(',', "");
        let commas = digits.len() < unsigned.len();
        let value = Decimal::from_str(&digits).map_err(AmountError)?;
        let value = if negative { -value } else { value };

        Ok(Amount {
            value,
            format: AmountFormat { pound, commas },
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self.value.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let num = rounded.abs();
        let pound = if self.format.pound { "£" } else { "" };

        if self.format.commas {
            write!(
                f,
                "{sign}{pound}{}",
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
            )
        } else {
            write!(f, "{sign}{pound}{num:.2}")
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Amount::from_str(&s).map_err(serde::de::Error::custom),
            Raw::Number(value) => Ok(Amount::new_with_format(
                value,
                AmountFormat {
                    pound: false,
                    commas: false,
                },
            )),
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
