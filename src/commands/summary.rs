use crate::calc::BudgetSummary;
use crate::commands::{money, Out};
use crate::{Config, Result};
use chrono::Local;
use tracing::debug;

/// Calculates the household dashboard: monthly income (with Universal Credit tapered against
/// earnings), expenses, debt totals, the money left over for the snowball and the projected
/// debt-free date.
///
/// # Errors
/// - Returns an error if the household cannot be loaded or holds invalid records.
pub async fn summary(config: Config) -> Result<Out<BudgetSummary>> {
    let household = config.load_household().await?;
    let today = Local::now().date_naive();
    let summary = BudgetSummary::calculate(&household, today)?;
    debug!("Summary calculated for {today}");

    let income = &summary.income;
    let mut lines = vec![
        "Monthly budget".to_string(),
        format!("  Earned income:      {}", money(income.earned)),
        format!("  Other income:       {}", money(income.other)),
    ];
    if let Some(uc) = income.universal_credit {
        lines.push(format!("  Universal Credit:   {}", money(uc)));
    }
    lines.push(format!(
        "  Total income:       {}",
        money(summary.total_monthly_income)
    ));
    lines.push(format!(
        "  Expenses:           {} ({} essential)",
        money(summary.total_monthly_expenses),
        money(summary.expenses.essential)
    ));
    lines.push(format!("  Total debt:         {}", money(summary.total_debt)));
    lines.push(format!(
        "  Minimum payments:   {}",
        money(summary.minimum_payments)
    ));
    lines.push(if summary.monthly_discretionary.is_sign_negative() {
        format!(
            "  Shortfall:          {}",
            money(-summary.monthly_discretionary)
        )
    } else {
        format!(
            "  Left over:          {}",
            money(summary.monthly_discretionary)
        )
    });
    lines.push(format!(
        "  Baby step {}:        {}",
        household.baby_steps().current_step(),
        household.baby_steps().current_step_name()
    ));
    lines.push(match (summary.months_to_debt_free(), summary.debt_free_date) {
        _ if summary.plan.is_empty() => "You have no active debts.".to_string(),
        (Some(months), Some(date)) => format!(
            "Debt free in {months} months, around {}",
            date.format("%B %Y")
        ),
        _ => "At the current payments these debts will not be paid off. Pay more than the \
            interest on each debt to get the snowball rolling."
            .to_string(),
    });
    let message = lines.join("\n");

    Ok(Out::new(message, summary))
}
