use crate::calc::{bounded, CalcError, CalcResult};
use crate::model::{Amount, Frequency};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    #[default]
    Wages,
    SideProject,
    UniversalCredit,
    Benefits,
    SelfEmployment,
    Rental,
    Other,
}

serde_plain::derive_display_from_serialize!(IncomeType);
serde_plain::derive_fromstr_from_deserialize!(IncomeType);

impl IncomeType {
    /// Earned income is what the Universal Credit taper is applied against.
    pub fn is_earned(self) -> bool {
        matches!(
            self,
            IncomeType::Wages | IncomeType::SideProject | IncomeType::SelfEmployment
        )
    }

    /// Universal Credit entries are placeholders; the amount actually counted comes from the
    /// household's `UniversalCredit` settings.
    pub fn is_universal_credit(self) -> bool {
        self == IncomeType::UniversalCredit
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub name: String,
    pub income_type: IncomeType,
    pub amount: Amount,
    pub frequency: Frequency,
    pub is_net: bool,
    pub start_date: Option<NaiveDate>,
    pub payment_day: Option<u8>,
    pub notes: Option<String>,
}

impl Default for NewIncome {
    fn default() -> Self {
        Self {
            name: String::new(),
            income_type: IncomeType::default(),
            amount: Amount::ZERO,
            frequency: Frequency::Monthly,
            is_net: true,
            start_date: None,
            payment_day: None,
            notes: None,
        }
    }
}

/// A source of household income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Income {
    id: String,
    #[serde(rename = "type")]
    income_type: IncomeType,
    name: String,
    amount: Amount,
    frequency: Frequency,
    #[serde(default = "default_true")]
    is_net: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Income {
    /// # Errors
    /// - `InvalidFrequency` for quarterly or annual incomes.
    /// - `InvalidParameter` for a negative amount, blank name or bad payment day.
    pub fn new(input: NewIncome) -> CalcResult<Self> {
        let income = Self {
            id: Uuid::new_v4().to_string(),
            income_type: input.income_type,
            name: input.name.trim().to_string(),
            amount: input.amount,
            frequency: input.frequency,
            is_net: input.is_net,
            start_date: input.start_date,
            payment_day: input.payment_day,
            notes: input.notes,
            created_at: Utc::now(),
        };
        income.validate()?;
        Ok(income)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.name.is_empty() {
            return Err(CalcError::invalid("name", "an income needs a name"));
        }
        bounded("amount", self.amount.value())?;
        self.frequency.check_income()?;
        if let Some(day) = self.payment_day {
            if !(1..=31).contains(&day) {
                return Err(CalcError::invalid(
                    "payment_day",
                    format!("must be between 1 and 31, got {day}"),
                ));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn income_type(&self) -> IncomeType {
        self.income_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount.value()
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn is_net(&self) -> bool {
        self.is_net
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn payment_day(&self) -> Option<u8> {
        self.payment_day
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
