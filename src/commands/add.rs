//! Add command handlers.

use crate::args::{AddDebtArgs, AddExpenseArgs, AddIncomeArgs};
use crate::calc::monthly_equivalent;
use crate::commands::{money, Out};
use crate::model::{Debt, Expense, Income};
use crate::{Config, Result};
use tracing::info;

/// Adds a debt to the household. A unique id is generated for it and returned so that payments
/// can be recorded against it later.
///
/// # Errors
/// - Returns an error if the household cannot be loaded or saved.
/// - Returns an error if the debt has no name, a negative balance or payment, or a payment day
///   outside 1 to 31.
pub async fn add_debt(config: Config, args: AddDebtArgs) -> Result<Out<Debt>> {
    let mut household = config.load_household().await?;
    let debt = household.add_debt(args.to_new_debt())?.clone();
    config.save_household(&household).await?;
    info!("Added debt {}", debt.id());
    Ok(Out::new(
        format!(
            "Added {} with a balance of {} (id {})",
            debt.name(),
            money(debt.balance()),
            debt.id()
        ),
        debt,
    ))
}

/// Adds a source of income. Income can arrive weekly, fortnightly, four-weekly or monthly.
pub async fn add_income(config: Config, args: AddIncomeArgs) -> Result<Out<Income>> {
    let mut household = config.load_household().await?;
    let income = household.add_income(args.to_new_income())?.clone();
    config.save_household(&household).await?;
    if income.income_type().is_universal_credit() {
        info!(
            "Universal Credit income entries are left out of the totals, the award is worked out \
            from `snowball benefit` settings instead"
        );
    }
    Ok(Out::new(
        format!(
            "Added {} income of {} a month",
            income.name(),
            money(monthly_equivalent(income.amount(), income.frequency())?.round_dp(2))
        ),
        income,
    ))
}

/// Adds a recurring bill. Bills can be weekly, monthly, quarterly or annual.
pub async fn add_expense(config: Config, args: AddExpenseArgs) -> Result<Out<Expense>> {
    let mut household = config.load_household().await?;
    let expense = household.add_expense(args.to_new_expense())?.clone();
    config.save_household(&household).await?;
    Ok(Out::new(
        format!(
            "Added {} expense of {} a month",
            expense.name(),
            money(monthly_equivalent(expense.amount(), expense.frequency())?.round_dp(2))
        ),
        expense,
    ))
}
