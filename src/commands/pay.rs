use crate::args::PayArgs;
use crate::commands::{money, Out};
use crate::model::DebtPayment;
use crate::{Config, Result};
use anyhow::Context;
use chrono::Local;

/// Records a payment against a debt. With no amount the whole remaining balance is paid.
///
/// Paying more than the balance clears the debt rather than taking it below zero. Clearing the
/// last active debt completes baby step 2.
///
/// # Errors
/// - Returns an error if no debt has the given id, the debt is already paid off, or the amount
///   is negative.
pub async fn pay(config: Config, args: PayArgs) -> Result<Out<DebtPayment>> {
    let mut household = config.load_household().await?;
    let date = args.date().unwrap_or_else(|| Local::now().date_naive());
    let notes = args.notes().map(str::to_string);

    let payment = match args.amount() {
        Some(amount) => household.record_payment(args.debt(), amount, date, notes),
        None => household.mark_paid_off(args.debt(), date),
    }
    .with_context(|| format!("Unable to record the payment against '{}'", args.debt()))?;
    config.save_household(&household).await?;

    let name = household
        .debt(payment.debt_id())
        .map(|d| d.name().to_string())
        .unwrap_or_default();
    let mut message = if payment.balance_after().is_zero() {
        format!("Paid {} to {name}. It is paid off!", money(payment.amount()))
    } else {
        format!(
            "Paid {} to {name}, {} left to pay",
            money(payment.amount()),
            money(payment.balance_after())
        )
    };
    if household.baby_steps().step2_completed() && !household.debts().iter().any(|d| d.is_active())
    {
        message.push_str(" You are debt free!");
    }
    Ok(Out::new(message, payment))
}
