//! The calculation engine.
//!
//! Everything in here is a pure function over in-memory records: no I/O, no clock (except
//! `project_debt_free_date_from_now`), no shared state. Inputs are validated on the way in and
//! invalid input fails with a `CalcError` before any calculation happens.

mod error;
mod frequency;
mod plan;
mod projection;
mod summary;
mod taper;
mod totals;

pub use error::{CalcError, CalcResult, MAX_AMOUNT, MAX_INTEREST_RATE};
pub(crate) use error::{at_most, bounded, checked_sum, fraction, non_negative, overflow};
pub use frequency::monthly_equivalent;
pub use plan::{build_plan, snowball_order, PlanEntry};
pub use projection::{
    months_to_debt_free, project_debt_free_date, project_debt_free_date_from_now, project_payoff,
    Milestone, Payoff, MAX_PROJECTION_MONTHS,
};
pub use summary::BudgetSummary;
pub use taper::adjusted_benefit;
pub use totals::{
    extra_payment, income_breakdown, monthly_discretionary, monthly_expenses_by_priority,
    total_minimum_payments, total_monthly_expenses, total_monthly_income, total_debt,
    ExpenseBreakdown, IncomeBreakdown,
};
