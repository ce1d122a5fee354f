use crate::calc::{adjusted_benefit, checked_sum, monthly_equivalent, overflow, CalcResult};
use crate::model::{Debt, Expense, ExpensePriority, Income, UniversalCredit};
use rust_decimal::Decimal;
use serde::Serialize;

/// Monthly income split the way the taper sees it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeBreakdown {
    /// Wages, side projects and self-employment.
    pub earned: Decimal,
    /// Everything else except Universal Credit entries.
    pub other: Decimal,
    /// The tapered Universal Credit award, when settings exist.
    pub universal_credit: Option<Decimal>,
}

impl IncomeBreakdown {
    pub fn total(&self) -> CalcResult<Decimal> {
        checked_sum(
            "total_monthly_income",
            [
                self.other,
                self.earned,
                self.universal_credit.unwrap_or_default(),
            ],
        )
    }
}

/// Splits incomes into earned and other monthly amounts and applies the taper.
///
/// Income entries typed as Universal Credit are never summed; when `settings` are present the
/// award is calculated from them against total earned income instead.
pub fn income_breakdown(
    incomes: &[Income],
    settings: Option<&UniversalCredit>,
) -> CalcResult<IncomeBreakdown> {
    let mut breakdown = IncomeBreakdown::default();
    for income in incomes {
        let kind = income.income_type();
        if kind.is_universal_credit() {
            continue;
        }
        let monthly = monthly_equivalent(income.amount(), income.frequency())?;
        let (bucket, name) = if kind.is_earned() {
            (&mut breakdown.earned, "earned_income")
        } else {
            (&mut breakdown.other, "other_income")
        };
        *bucket = bucket.checked_add(monthly).ok_or_else(|| overflow(name))?;
    }

    if let Some(uc) = settings {
        breakdown.universal_credit = Some(adjusted_benefit(
            uc.base_amount(),
            breakdown.earned,
            uc.work_allowance(),
            uc.taper_rate(),
        )?);
    }
    Ok(breakdown)
}

pub fn total_monthly_income(
    incomes: &[Income],
    settings: Option<&UniversalCredit>,
) -> CalcResult<Decimal> {
    income_breakdown(incomes, settings)?.total()
}

/// Monthly expenses grouped by priority.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpenseBreakdown {
    pub essential: Decimal,
    pub non_essential: Decimal,
}

impl ExpenseBreakdown {
    pub fn total(&self) -> CalcResult<Decimal> {
        checked_sum("total_monthly_expenses", [self.essential, self.non_essential])
    }
}

pub fn monthly_expenses_by_priority(expenses: &[Expense]) -> CalcResult<ExpenseBreakdown> {
    expenses
        .iter()
        .try_fold(ExpenseBreakdown::default(), |mut acc, expense| {
            let monthly = monthly_equivalent(expense.amount(), expense.frequency())?;
            let bucket = match expense.priority() {
                ExpensePriority::Essential => &mut acc.essential,
                ExpensePriority::NonEssential => &mut acc.non_essential,
            };
            *bucket = bucket
                .checked_add(monthly)
                .ok_or_else(|| overflow("total_monthly_expenses"))?;
            Ok(acc)
        })
}

pub fn total_monthly_expenses(expenses: &[Expense]) -> CalcResult<Decimal> {
    let monthly = expenses
        .iter()
        .map(|e| monthly_equivalent(e.amount(), e.frequency()))
        .collect::<CalcResult<Vec<_>>>()?;
    checked_sum("total_monthly_expenses", monthly)
}

/// Sum of balances across active debts.
pub fn total_debt(debts: &[Debt]) -> CalcResult<Decimal> {
    checked_sum(
        "total_debt",
        debts.iter().filter(|d| d.is_active()).map(Debt::balance),
    )
}

/// Sum of minimum payments across active debts.
pub fn total_minimum_payments(debts: &[Debt]) -> CalcResult<Decimal> {
    checked_sum(
        "minimum_payments",
        debts
            .iter()
            .filter(|d| d.is_active())
            .map(Debt::minimum_payment),
    )
}

/// What is left each month after expenses and minimum payments. Negative means a shortfall and
/// is returned as-is.
pub fn monthly_discretionary(
    monthly_income: Decimal,
    monthly_expenses: Decimal,
    minimum_payments: Decimal,
) -> CalcResult<Decimal> {
    monthly_income
        .checked_sub(monthly_expenses)
        .and_then(|left| left.checked_sub(minimum_payments))
        .ok_or_else(|| overflow("monthly_discretionary"))
}

/// The extra payment available for the snowball. A shortfall contributes nothing.
pub fn extra_payment(discretionary: Decimal) -> Decimal {
    discretionary.max(Decimal::ZERO)
}
