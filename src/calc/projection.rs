use crate::calc::frequency::MONTHS_PER_YEAR;
use crate::calc::{bounded, overflow, snowball_order, CalcResult};
use crate::model::Debt;
use chrono::{Local, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace};

/// Projections longer than this (100 years) are treated as never paying off.
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// The point in the projection at which one debt is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub debt_id: String,
    pub debt_name: String,
    /// Minimum payment plus everything rolled over from debts cleared before it.
    pub monthly_payment: Decimal,
    /// Months from now until this debt is cleared.
    pub cleared_after_months: u32,
}

/// A projection that pays everything off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payoff {
    months: u32,
    milestones: Vec<Milestone>,
}

impl Payoff {
    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// The calendar date `months` after `today`.
    pub fn debt_free_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_months(Months::new(self.months))
    }
}

/// Simulates the snowball month by month.
///
/// Debts are worked through in snowball order, each from its own opening balance, paying its
/// minimum plus the rolling extra. Once a debt clears, its minimum payment joins the rolling extra
/// for the next one.
///
/// Returns `Ok(None)` when there are no active debts, when some debt's payment does not cover
/// its interest, or when the total runs past `MAX_PROJECTION_MONTHS`. Any one unpayable debt
/// makes the whole projection unattainable.
///
/// # Errors
/// - `InvalidParameter` if `extra_monthly_payment` is negative or above `MAX_AMOUNT`, or a debt
///   is invalid.
pub fn project_payoff(
    debts: &[Debt],
    extra_monthly_payment: Decimal,
) -> CalcResult<Option<Payoff>> {
    bounded("extra_monthly_payment", extra_monthly_payment)?;
    let ordered = snowball_order(debts)?;
    if ordered.is_empty() {
        return Ok(None);
    }

    let mut months: u32 = 0;
    let mut rolling_extra = extra_monthly_payment;
    let mut milestones = Vec::with_capacity(ordered.len());

    for debt in ordered {
        let monthly_payment = debt
            .minimum_payment()
            .checked_add(rolling_extra)
            .ok_or_else(|| overflow("monthly_payment"))?;
        let monthly_rate = debt.interest_rate() / MONTHS_PER_YEAR / PERCENT;
        let mut balance = debt.balance();

        while balance > Decimal::ZERO {
            let interest = balance
                .checked_mul(monthly_rate)
                .ok_or_else(|| overflow("interest"))?;
            // Both sides are non-negative, so this cannot overflow.
            let principal = monthly_payment - interest;
            if principal <= Decimal::ZERO {
                debug!(
                    "Paying {monthly_payment} a month never clears '{}': interest is {}",
                    debt.name(),
                    interest.round_dp(2)
                );
                return Ok(None);
            }

            balance = (balance - principal).max(Decimal::ZERO);
            months += 1;
            if months > MAX_PROJECTION_MONTHS {
                debug!(
                    "Projection passed {MAX_PROJECTION_MONTHS} months while paying '{}'",
                    debt.name()
                );
                return Ok(None);
            }
        }

        trace!("'{}' cleared after {months} months", debt.name());
        milestones.push(Milestone {
            debt_id: debt.id().to_string(),
            debt_name: debt.name().to_string(),
            monthly_payment,
            cleared_after_months: months,
        });
        rolling_extra = rolling_extra
            .checked_add(debt.minimum_payment())
            .ok_or_else(|| overflow("monthly_payment"))?;
    }

    Ok(Some(Payoff { months, milestones }))
}

/// The number of months until every active debt is paid, or `None` if that never happens.
pub fn months_to_debt_free(
    debts: &[Debt],
    extra_monthly_payment: Decimal,
) -> CalcResult<Option<u32>> {
    Ok(project_payoff(debts, extra_monthly_payment)?.map(|p| p.months()))
}

/// The date every active debt is paid off, counting whole months from `today`.
pub fn project_debt_free_date(
    debts: &[Debt],
    extra_monthly_payment: Decimal,
    today: NaiveDate,
) -> CalcResult<Option<NaiveDate>> {
    Ok(project_payoff(debts, extra_monthly_payment)?.and_then(|p| p.debt_free_date(today)))
}

/// `project_debt_free_date` counted from the local calendar date.
pub fn project_debt_free_date_from_now(
    debts: &[Debt],
    extra_monthly_payment: Decimal,
) -> CalcResult<Option<NaiveDate>> {
    project_debt_free_date(debts, extra_monthly_payment, Local::now().date_naive())
}
