//! Command handlers for the snowball CLI.
//!
//! Each handler loads what it needs through `Config`, does its work, persists any change to the
//! household and returns an `Out` describing the outcome.

mod add;
mod benefit;
mod delete;
mod fund;
mod init;
mod pay;
mod plan;
mod summary;

use crate::calc::{extra_payment, monthly_discretionary, total_minimum_payments};
use crate::calc::{total_monthly_expenses, total_monthly_income};
use crate::model::{Amount, Household};
use crate::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::{add_debt, add_expense, add_income};
pub use benefit::benefit;
pub use delete::{delete_debts, delete_expenses, delete_incomes};
pub use fund::fund;
pub use init::init;
pub use pay::pay;
pub use plan::{plan, project, Projection};
pub use summary::summary;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Formats `value` as pounds with thousands separators, e.g. `£1,250.00`.
pub(crate) fn money(value: Decimal) -> String {
    Amount::new(value).to_string()
}

/// What is left each month after expenses and minimum payments, floored at zero.
pub(crate) fn available_extra(household: &Household) -> Result<Decimal> {
    let income = total_monthly_income(household.incomes(), household.universal_credit())?;
    let discretionary = monthly_discretionary(
        income,
        total_monthly_expenses(household.expenses())?,
        total_minimum_payments(household.debts())?,
    )?;
    Ok(extra_payment(discretionary))
}
