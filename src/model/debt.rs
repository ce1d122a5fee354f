use crate::calc::{at_most, bounded, non_negative, CalcError, CalcResult, MAX_INTEREST_RATE};
use crate::model::Amount;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of debt. Only used for display; priority comes from `Debt::is_ccj`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    #[default]
    CreditCard,
    PersonalLoan,
    Overdraft,
    Bnpl,
    CarFinance,
    Ccj,
    PaydayLoan,
    StoreCard,
    Mortgage,
}

serde_plain::derive_display_from_serialize!(DebtType);
serde_plain::derive_fromstr_from_deserialize!(DebtType);

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    #[default]
    Active,
    PaidOff,
}

serde_plain::derive_display_from_serialize!(DebtStatus);

/// The fields a user supplies when adding a debt. `Debt::new` fills in the rest.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub debt_type: DebtType,
    pub creditor: String,
    pub balance: Amount,
    /// Annual percentage rate, e.g. `19.9` for 19.9% APR.
    pub interest_rate: Decimal,
    pub minimum_payment: Amount,
    pub payment_day: Option<u8>,
    pub is_ccj: bool,
    pub ccj_deadline: Option<NaiveDate>,
}

/// A debt owed by the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Debt {
    id: String,
    name: String,
    #[serde(rename = "type", default)]
    debt_type: DebtType,
    #[serde(default)]
    creditor: String,
    balance: Amount,
    interest_rate: Decimal,
    minimum_payment: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_day: Option<u8>,
    #[serde(default)]
    is_ccj: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ccj_deadline: Option<NaiveDate>,
    #[serde(default)]
    status: DebtStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paid_off_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl Debt {
    /// Validates `input` and creates an active debt with a fresh id.
    ///
    /// # Errors
    /// - `InvalidParameter` if the balance, rate or minimum payment is negative, the name is
    ///   blank, or the payment day is not a day of the month.
    pub fn new(input: NewDebt) -> CalcResult<Self> {
        let debt = Self {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            debt_type: input.debt_type,
            creditor: input.creditor,
            balance: input.balance,
            interest_rate: input.interest_rate,
            minimum_payment: input.minimum_payment,
            payment_day: input.payment_day,
            is_ccj: input.is_ccj,
            ccj_deadline: input.ccj_deadline,
            status: DebtStatus::Active,
            paid_off_date: None,
            created_at: Utc::now(),
        };
        debt.validate()?;
        Ok(debt)
    }

    /// Checks the invariants that deserialized debts could otherwise break.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.is_empty() {
            return Err(CalcError::invalid("name", "a debt needs a name"));
        }
        bounded("balance", self.balance.value())?;
        at_most("interest_rate", self.interest_rate, MAX_INTEREST_RATE)?;
        bounded("minimum_payment", self.minimum_payment.value())?;
        if let Some(day) = self.payment_day {
            if !(1..=31).contains(&day) {
                return Err(CalcError::invalid(
                    "payment_day",
                    format!("must be between 1 and 31, got {day}"),
                ));
            }
        }
        if self.status == DebtStatus::PaidOff && !self.balance.is_zero() {
            return Err(CalcError::invalid(
                "status",
                format!("'{}' is paid off but has a balance", self.name),
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debt_type(&self) -> DebtType {
        self.debt_type
    }

    pub fn creditor(&self) -> &str {
        &self.creditor
    }

    pub fn balance(&self) -> Decimal {
        self.balance.value()
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment.value()
    }

    pub fn payment_day(&self) -> Option<u8> {
        self.payment_day
    }

    pub fn is_ccj(&self) -> bool {
        self.is_ccj
    }

    pub fn ccj_deadline(&self) -> Option<NaiveDate> {
        self.ccj_deadline
    }

    pub fn status(&self) -> DebtStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }

    pub fn paid_off_date(&self) -> Option<NaiveDate> {
        self.paid_off_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Pays `amount` off the balance. The balance never drops below zero, and the debt becomes
    /// paid off, dated `date`, the moment it reaches zero.
    ///
    /// # Errors
    /// - `InvalidParameter` if the amount is negative or the debt is already paid off.
    pub fn record_payment(
        &mut self,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<String>,
    ) -> CalcResult<DebtPayment> {
        if !self.is_active() {
            return Err(CalcError::invalid(
                "debt",
                format!("'{}' is already paid off", self.name),
            ));
        }
        non_negative("amount", amount)?;

        let balance_after = (self.balance() - amount).max(Decimal::ZERO);
        self.balance = Amount::new(balance_after);
        if balance_after.is_zero() {
            self.status = DebtStatus::PaidOff;
            self.paid_off_date = Some(date);
        }
        Ok(DebtPayment::new(&self.id, amount, date, balance_after, notes))
    }

    /// Settles whatever balance remains with one final payment.
    pub fn mark_paid_off(&mut self, date: NaiveDate) -> CalcResult<DebtPayment> {
        let remaining = self.balance();
        self.record_payment(remaining, date, Some("Final payment".to_string()))
    }
}

/// One payment made against a debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DebtPayment {
    id: String,
    debt_id: String,
    amount: Amount,
    payment_date: NaiveDate,
    balance_after: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl DebtPayment {
    fn new(
        debt_id: &str,
        amount: Decimal,
        payment_date: NaiveDate,
        balance_after: Decimal,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            debt_id: debt_id.to_string(),
            amount: amount.into(),
            payment_date,
            balance_after: balance_after.into(),
            notes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn debt_id(&self) -> &str {
        &self.debt_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount.value()
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after.value()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
