use crate::calc::{bounded, CalcError, CalcResult};
use crate::model::{Amount, Frequency};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Housing,
    Utilities,
    Food,
    Transport,
    Insurance,
    Subscription,
    Childcare,
    Medical,
    Phone,
    Entertainment,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(ExpenseCategory);
serde_plain::derive_fromstr_from_deserialize!(ExpenseCategory);

/// Groups expenses for display. Both kinds count towards the monthly total.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpensePriority {
    #[default]
    Essential,
    NonEssential,
}

serde_plain::derive_display_from_serialize!(ExpensePriority);
serde_plain::derive_fromstr_from_deserialize!(ExpensePriority);

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub name: String,
    pub amount: Amount,
    pub category: ExpenseCategory,
    pub priority: ExpensePriority,
    pub frequency: Frequency,
    pub due_day: Option<u8>,
    pub is_uc_paid: bool,
    pub notes: Option<String>,
}

impl Default for NewExpense {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: Amount::ZERO,
            category: ExpenseCategory::default(),
            priority: ExpensePriority::default(),
            frequency: Frequency::Monthly,
            due_day: None,
            is_uc_paid: false,
            notes: None,
        }
    }
}

/// A recurring household bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    id: String,
    name: String,
    amount: Amount,
    #[serde(default)]
    category: ExpenseCategory,
    #[serde(default)]
    priority: ExpensePriority,
    frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_day: Option<u8>,
    /// Paid directly out of the Universal Credit award (e.g. housing costs).
    #[serde(default)]
    is_uc_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl Expense {
    /// # Errors
    /// - `InvalidFrequency` for fortnightly or 4-weekly bills.
    /// - `InvalidParameter` for a negative amount, blank name or bad due day.
    pub fn new(input: NewExpense) -> CalcResult<Self> {
        let expense = Self {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            amount: input.amount,
            category: input.category,
            priority: input.priority,
            frequency: input.frequency,
            due_day: input.due_day,
            is_uc_paid: input.is_uc_paid,
            notes: input.notes,
            created_at: Utc::now(),
        };
        expense.validate()?;
        Ok(expense)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.name.is_empty() {
            return Err(CalcError::invalid("name", "an expense needs a name"));
        }
        bounded("amount", self.amount.value())?;
        self.frequency.check_expense()?;
        if let Some(day) = self.due_day {
            if !(1..=31).contains(&day) {
                return Err(CalcError::invalid(
                    "due_day",
                    format!("must be between 1 and 31, got {day}"),
                ));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount.value()
    }

    pub fn category(&self) -> ExpenseCategory {
        self.category
    }

    pub fn priority(&self) -> ExpensePriority {
        self.priority
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn due_day(&self) -> Option<u8> {
        self.due_day
    }

    pub fn is_uc_paid(&self) -> bool {
        self.is_uc_paid
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_rejects_pay_cycle_frequencies() {
        let err = Expense::new(NewExpense {
            name: "Window cleaner".to_string(),
            amount: dec!(12).into(),
            frequency: Frequency::FourWeekly,
            ..NewExpense::default()
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidFrequency { .. }));
    }

    #[test]
    fn test_expense_rejects_negative_amount() {
        let err = Expense::new(NewExpense {
            name: "Rent".to_string(),
            amount: dec!(-650).into(),
            ..NewExpense::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidParameter { name: "amount", .. }
        ));
    }

    #[test]
    fn test_expense_deserialize_defaults() {
        let json = r#"{
            "id": "e1",
            "name": "TV licence",
            "amount": "£169.50",
            "frequency": "annually",
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.priority(), ExpensePriority::Essential);
        assert_eq!(expense.category(), ExpenseCategory::Other);
        assert_eq!(expense.amount(), dec!(169.50));
        assert!(expense.validate().is_ok());
    }
}
