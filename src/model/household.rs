use crate::calc::{bounded, CalcError, CalcResult};
use crate::model::{
    BabyStepsProgress, Debt, DebtPayment, Expense, Income, NewDebt, NewExpense, NewIncome,
    UniversalCredit,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything the household has recorded: the snapshot the engine calculates over.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Household {
    #[serde(default)]
    debts: Vec<Debt>,
    #[serde(default)]
    incomes: Vec<Income>,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    universal_credit: Option<UniversalCredit>,
    #[serde(default)]
    baby_steps: BabyStepsProgress,
    #[serde(default)]
    payments: Vec<DebtPayment>,
}

impl Household {
    pub fn new(baby_steps: BabyStepsProgress) -> Self {
        Self {
            baby_steps,
            ..Self::default()
        }
    }

    /// Checks every record. Call this on anything loaded from outside the process.
    pub fn validate(&self) -> CalcResult<()> {
        self.debts.iter().try_for_each(Debt::validate)?;
        self.incomes.iter().try_for_each(Income::validate)?;
        self.expenses.iter().try_for_each(Expense::validate)?;
        if let Some(uc) = &self.universal_credit {
            uc.validate()?;
        }
        Ok(())
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn universal_credit(&self) -> Option<&UniversalCredit> {
        self.universal_credit.as_ref()
    }

    pub fn baby_steps(&self) -> &BabyStepsProgress {
        &self.baby_steps
    }

    pub fn payments(&self) -> &[DebtPayment] {
        &self.payments
    }

    pub fn debt(&self, id: &str) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id() == id)
    }

    pub fn add_debt(&mut self, input: NewDebt) -> CalcResult<&Debt> {
        let debt = Debt::new(input)?;
        debug!("Adding debt '{}' ({})", debt.name(), debt.id());
        self.debts.push(debt);
        Ok(&self.debts[self.debts.len() - 1])
    }

    pub fn add_income(&mut self, input: NewIncome) -> CalcResult<&Income> {
        let income = Income::new(input)?;
        debug!("Adding income '{}' ({})", income.name(), income.id());
        self.incomes.push(income);
        Ok(&self.incomes[self.incomes.len() - 1])
    }

    pub fn add_expense(&mut self, input: NewExpense) -> CalcResult<&Expense> {
        let expense = Expense::new(input)?;
        debug!("Adding expense '{}' ({})", expense.name(), expense.id());
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Removes the debts with the given ids, all or nothing: if any id is unknown nothing is
    /// removed. Payments already recorded against them stay in the history.
    pub fn remove_debts(&mut self, ids: &[String]) -> CalcResult<Vec<String>> {
        remove_by_id(&mut self.debts, ids, Debt::id, "debt")
    }

    /// Removes the incomes with the given ids, all or nothing.
    pub fn remove_incomes(&mut self, ids: &[String]) -> CalcResult<Vec<String>> {
        remove_by_id(&mut self.incomes, ids, Income::id, "income")
    }

    /// Removes the expenses with the given ids, all or nothing.
    pub fn remove_expenses(&mut self, ids: &[String]) -> CalcResult<Vec<String>> {
        remove_by_id(&mut self.expenses, ids, Expense::id, "expense")
    }

    /// Replaces the Universal Credit settings; there is only ever one set.
    pub fn set_universal_credit(&mut self, settings: Option<UniversalCredit>) {
        self.universal_credit = settings;
    }

    /// Records a payment against the debt with `debt_id`. When that payment clears the last
    /// active debt, baby step 2 is marked complete.
    pub fn record_payment(
        &mut self,
        debt_id: &str,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<String>,
    ) -> CalcResult<DebtPayment> {
        let debt = self.debt_mut(debt_id)?;
        let payment = debt.record_payment(amount, date, notes)?;
        self.after_payment(payment)
    }

    /// Pays off the remaining balance of the debt with `debt_id`.
    pub fn mark_paid_off(&mut self, debt_id: &str, date: NaiveDate) -> CalcResult<DebtPayment> {
        let debt = self.debt_mut(debt_id)?;
        let payment = debt.mark_paid_off(date)?;
        self.after_payment(payment)
    }

    pub fn update_emergency_fund(&mut self, amount: Decimal) -> CalcResult<()> {
        bounded("emergency_fund_balance", amount)?;
        self.baby_steps.update_emergency_fund(amount, Utc::now());
        Ok(())
    }

    /// Sets the fully funded emergency fund target for baby step 3, usually 3 to 6 months of
    /// expenses.
    pub fn set_emergency_fund_target(&mut self, target: Decimal) -> CalcResult<()> {
        bounded("emergency_fund_target", target)?;
        if target.is_zero() {
            return Err(CalcError::invalid(
                "emergency_fund_target",
                "must be more than zero",
            ));
        }
        self.baby_steps.set_step3_target(target, Utc::now());
        Ok(())
    }

    fn debt_mut(&mut self, debt_id: &str) -> CalcResult<&mut Debt> {
        self.debts
            .iter_mut()
            .find(|d| d.id() == debt_id)
            .ok_or_else(|| CalcError::NotFound(format!("debt '{debt_id}'")))
    }

    fn after_payment(&mut self, payment: DebtPayment) -> CalcResult<DebtPayment> {
        let cleared = payment.balance_after().is_zero();
        self.payments.push(payment.clone());
        if cleared && !self.debts.iter().any(Debt::is_active) {
            info!("All debts are paid off");
            self.baby_steps.complete_debt_free(Utc::now());
        }
        Ok(payment)
    }
}

fn remove_by_id<T>(
    items: &mut Vec<T>,
    ids: &[String],
    id_of: fn(&T) -> &str,
    kind: &str,
) -> CalcResult<Vec<String>> {
    if let Some(missing) = ids
        .iter()
        .find(|id| !items.iter().any(|item| id_of(item) == id.as_str()))
    {
        return Err(CalcError::NotFound(format!("{kind} '{missing}'")));
    }
    let mut removed = Vec::new();
    items.retain(|item| {
        let id = id_of(item);
        if ids.iter().any(|wanted| wanted == id) {
            removed.push(id.to_string());
            false
        } else {
            true
        }
    });
    debug!("Removed {} {kind} record(s)", removed.len());
    Ok(removed)
}
