use crate::calc::{bounded, overflow, CalcResult};
use crate::model::Debt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the snowball plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlanEntry {
    pub debt_id: String,
    pub debt_name: String,
    /// 1-based rank in the attack order.
    pub position: usize,
    pub current_balance: Decimal,
    pub monthly_payment: Decimal,
    /// The debt currently receiving the extra payment.
    pub is_target: bool,
}

/// Returns the active debts in snowball order: County Court Judgments first, in the order they
/// were given, then everything else from smallest balance to largest.
///
/// Both sorts are stable so equal balances keep their input order.
///
/// # Errors
/// - `InvalidParameter` if an active debt breaks its invariants (e.g. a negative balance).
pub fn snowball_order(debts: &[Debt]) -> CalcResult<Vec<&Debt>> {
    let mut ccj = Vec::new();
    let mut others = Vec::new();
    for debt in debts.iter().filter(|d| d.is_active()) {
        debt.validate()?;
        if debt.is_ccj() {
            ccj.push(debt);
        } else {
            others.push(debt);
        }
    }
    others.sort_by(|a, b| a.balance().cmp(&b.balance()));
    ccj.extend(others);
    Ok(ccj)
}

/// Builds the snowball plan. The first debt in snowball order is the target and gets its
/// minimum payment plus `extra_monthly_payment`; the rest get their minimum payment.
///
/// # Errors
/// - `InvalidParameter` if `extra_monthly_payment` is negative or above `MAX_AMOUNT`, or a debt
///   is invalid.
pub fn build_plan(debts: &[Debt], extra_monthly_payment: Decimal) -> CalcResult<Vec<PlanEntry>> {
    bounded("extra_monthly_payment", extra_monthly_payment)?;
    snowball_order(debts)?
        .into_iter()
        .enumerate()
        .map(|(ix, debt)| {
            let is_target = ix == 0;
            let monthly_payment = if is_target {
                debt.minimum_payment()
                    .checked_add(extra_monthly_payment)
                    .ok_or_else(|| overflow("monthly_payment"))?
            } else {
                debt.minimum_payment()
            };
            Ok(PlanEntry {
                debt_id: debt.id().to_string(),
                debt_name: debt.name().to_string(),
                position: ix + 1,
                current_balance: debt.balance(),
                monthly_payment,
                is_target,
            })
        })
        .collect()
}
