//! Types that represent the household's records: debts, incomes, expenses and the settings and
//! progress that go with them.
mod amount;
mod baby_steps;
mod benefit;
mod debt;
mod expense;
mod frequency;
mod household;
mod income;

pub use amount::{Amount, AmountError, AmountFormat};
pub use baby_steps::{BabyStepsProgress, BABY_STEPS, DEFAULT_STEP1_TARGET};
pub use benefit::{TaperPolicy, UniversalCredit};
pub use debt::{Debt, DebtPayment, DebtStatus, DebtType, NewDebt};
pub use expense::{Expense, ExpenseCategory, ExpensePriority, NewExpense};
pub use frequency::Frequency;
pub use household::Household;
pub use income::{Income, IncomeType, NewIncome};
