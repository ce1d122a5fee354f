use crate::calc::{CalcError, CalcResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

const ALL: &str = "weekly, fortnightly, 4-weekly, monthly, quarterly, annually";
const INCOME: &str = "weekly, fortnightly, 4-weekly, monthly";
const EXPENSE: &str = "weekly, monthly, quarterly, annually";

/// How often an income arrives or an expense is due.
///
/// Incomes use the first four (pay cycles), expenses use weekly, monthly, quarterly and
/// annually (bills).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Fortnightly,
    #[serde(rename = "4-weekly")]
    FourWeekly,
    Monthly,
    Quarterly,
    Annually,
}

serde_plain::derive_display_from_serialize!(Frequency);

impl Frequency {
    /// Returns `self` if an income may be paid at this frequency.
    pub fn check_income(self) -> CalcResult<Self> {
        match self {
            Frequency::Weekly
            | Frequency::Fortnightly
            | Frequency::FourWeekly
            | Frequency::Monthly => Ok(self),
            _ => Err(CalcError::InvalidFrequency {
                value: self.to_string(),
                expected: INCOME,
            }),
        }
    }

    /// Returns `self` if an expense may be due at this frequency.
    pub fn check_expense(self) -> CalcResult<Self> {
        match self {
            Frequency::Weekly
            | Frequency::Monthly
            | Frequency::Quarterly
            | Frequency::Annually => Ok(self),
            _ => Err(CalcError::InvalidFrequency {
                value: self.to_string(),
                expected: EXPENSE,
            }),
        }
    }
}

impl FromStr for Frequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "fortnightly" => Ok(Frequency::Fortnightly),
            "4-weekly" | "four_weekly" => Ok(Frequency::FourWeekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "annually" => Ok(Frequency::Annually),
            _ => Err(CalcError::InvalidFrequency {
                value: s.to_string(),
                expected: ALL,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Frequency::from_str(&s).map_err(serde::de::Error::custom)
    }
}
