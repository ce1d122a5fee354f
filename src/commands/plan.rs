//! Plan and projection command handlers.

use crate::args::PlanArgs;
use crate::calc::{build_plan, project_payoff, Milestone, PlanEntry};
use crate::commands::{available_extra, money, Out};
use crate::{Config, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// The structured output of `snowball project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub extra_monthly_payment: Decimal,
    /// `None` when the debts cannot be paid off at these payments.
    pub months: Option<u32>,
    pub debt_free_date: Option<NaiveDate>,
    pub milestones: Vec<Milestone>,
}

/// Lists active debts in the order they will be attacked along with what to pay on each this
/// month. The first debt takes its minimum plus the extra; the rest take their minimums.
///
/// When `args` carries no extra payment, whatever is left after expenses and minimum payments
/// is used.
///
/// # Errors
/// - Returns an error if the household cannot be loaded, the extra payment is negative, or a
///   debt holds invalid values.
pub async fn plan(config: Config, args: PlanArgs) -> Result<Out<Vec<PlanEntry>>> {
    let household = config.load_household().await?;
    let extra = match args.extra() {
        Some(extra) => extra,
        None => available_extra(&household)?,
    };
    let plan = build_plan(household.debts(), extra)?;
    if plan.is_empty() {
        return Ok(Out::new("You have no active debts.", plan));
    }

    let mut lines = vec![format!("Snowball plan with {} extra each month", money(extra))];
    lines.extend(plan.iter().map(|entry| {
        format!(
            "  {}. {} ({}): pay {}{}",
            entry.position,
            entry.debt_name,
            money(entry.current_balance),
            money(entry.monthly_payment),
            if entry.is_target { "  <- target" } else { "" }
        )
    }));
    Ok(Out::new(lines.join("\n"), plan))
}

/// Projects when every active debt will be paid off, and when each one along the way will be
/// cleared.
///
/// # Errors
/// - Returns an error if the household cannot be loaded, the extra payment is negative, or a
///   debt holds invalid values.
pub async fn project(config: Config, args: PlanArgs) -> Result<Out<Projection>> {
    let household = config.load_household().await?;
    let extra = match args.extra() {
        Some(extra) => extra,
        None => available_extra(&household)?,
    };
    let today = Local::now().date_naive();

    let Some(payoff) = project_payoff(household.debts(), extra)? else {
        let projection = Projection {
            extra_monthly_payment: extra,
            months: None,
            debt_free_date: None,
            milestones: Vec::new(),
        };
        let message = if household.debts().iter().any(|d| d.is_active()) {
            "At the current payments these debts will not be paid off within 100 years."
        } else {
            "You have no active debts."
        };
        return Ok(Out::new(message, projection));
    };

    let debt_free_date = payoff.debt_free_date(today);
    let mut lines: Vec<String> = payoff
        .milestones()
        .iter()
        .map(|milestone| {
            format!(
                "  {} cleared after {} months paying {} a month",
                milestone.debt_name,
                milestone.cleared_after_months,
                money(milestone.monthly_payment)
            )
        })
        .collect();
    lines.push(match debt_free_date {
        Some(date) => format!(
            "Debt free in {} months, on {}",
            payoff.months(),
            date.format("%-d %B %Y")
        ),
        None => format!("Debt free in {} months", payoff.months()),
    });
    let message = lines.join("\n");

    let projection = Projection {
        extra_monthly_payment: extra,
        months: Some(payoff.months()),
        debt_free_date,
        milestones: payoff.milestones().to_vec(),
    };
    Ok(Out::new(message, projection))
}
