use crate::calc::{
    build_plan, extra_payment, income_breakdown, monthly_discretionary,
    monthly_expenses_by_priority, project_payoff, total_debt, total_minimum_payments, CalcResult,
    ExpenseBreakdown, IncomeBreakdown, Payoff, PlanEntry,
};
use crate::model::Household;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Every figure the household dashboard shows, calculated from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub income: IncomeBreakdown,
    pub total_monthly_income: Decimal,
    pub expenses: ExpenseBreakdown,
    pub total_monthly_expenses: Decimal,
    pub total_debt: Decimal,
    pub minimum_payments: Decimal,
    /// Income minus expenses minus minimum payments. Negative means a shortfall.
    pub monthly_discretionary: Decimal,
    /// `monthly_discretionary` floored at zero, as fed to the snowball.
    pub extra_payment: Decimal,
    pub plan: Vec<PlanEntry>,
    pub payoff: Option<Payoff>,
    pub debt_free_date: Option<NaiveDate>,
}

impl BudgetSummary {
    pub fn calculate(household: &Household, today: NaiveDate) -> CalcResult<Self> {
        household.validate()?;

        let income = income_breakdown(household.incomes(), household.universal_credit())?;
        let total_monthly_income = income.total()?;
        let expenses = monthly_expenses_by_priority(household.expenses())?;
        let total_monthly_expenses = expenses.total()?;
        let minimum_payments = total_minimum_payments(household.debts())?;
        let discretionary =
            monthly_discretionary(total_monthly_income, total_monthly_expenses, minimum_payments)?;
        let extra = extra_payment(discretionary);

        let plan = build_plan(household.debts(), extra)?;
        let payoff = project_payoff(household.debts(), extra)?;
        let debt_free_date = payoff.as_ref().and_then(|p| p.debt_free_date(today));

        Ok(Self {
            income,
            total_monthly_income,
            expenses,
            total_monthly_expenses,
            total_debt: total_debt(household.debts())?,
            minimum_payments,
            monthly_discretionary: discretionary,
            extra_payment: extra,
            plan,
            payoff,
            debt_free_date,
        })
    }

    pub fn months_to_debt_free(&self) -> Option<u32> {
        self.payoff.as_ref().map(Payoff::months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BabyStepsProgress, Frequency, IncomeType, NewDebt, NewExpense, NewIncome, TaperPolicy,
        UniversalCredit,
    };
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn household() -> Household {
        let mut household = Household::new(BabyStepsProgress::default());
        household
            .add_income(NewIncome {
                name: "Job".to_string(),
                income_type: IncomeType::Wages,
                amount: dec!(604).into(),
                frequency: Frequency::Monthly,
                ..NewIncome::default()
            })
            .unwrap();
        household.set_universal_credit(Some(
            UniversalCredit::new(
                dec!(500),
                TaperPolicy {
                    work_allowance: dec!(404),
                    taper_rate: dec!(0.55),
                },
            )
            .unwrap(),
        ));
        household
            .add_expense(NewExpense {
                name: "Rent".to_string(),
                amount: dec!(700).into(),
                ..NewExpense::default()
            })
            .unwrap();
        household
            .add_debt(NewDebt {
                name: "B".to_string(),
                balance: dec!(2000).into(),
                minimum_payment: dec!(100).into(),
                ..NewDebt::default()
            })
            .unwrap();
        household
            .add_debt(NewDebt {
                name: "A".to_string(),
                balance: dec!(500).into(),
                minimum_payment: dec!(50).into(),
                ..NewDebt::default()
            })
            .unwrap();
        household
    }

    #[test]
    fn test_summary() {
        let summary = BudgetSummary::calculate(&household(), today()).unwrap();
        // 604 + 390
        assert_eq!(summary.total_monthly_income, dec!(994));
        assert_eq!(summary.total_monthly_expenses, dec!(700));
        assert_eq!(summary.total_debt, dec!(2500));
        assert_eq!(summary.minimum_payments, dec!(150));
        assert_eq!(summary.monthly_discretionary, dec!(144));
        assert_eq!(summary.extra_payment, dec!(144));

        assert_eq!(summary.plan[0].debt_name, "A");
        assert_eq!(summary.plan[0].monthly_payment, dec!(194));

        // A: ceil(500 / 194) = 3, B: ceil(2000 / 294) = 7
        assert_eq!(summary.months_to_debt_free(), Some(10));
        assert_eq!(
            summary.debt_free_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_shortfall_feeds_no_extra() {
        let mut household = household();
        household
            .add_expense(NewExpense {
                name: "Car".to_string(),
                amount: dec!(400).into(),
                ..NewExpense::default()
            })
            .unwrap();
        let summary = BudgetSummary::calculate(&household, today()).unwrap();
        assert_eq!(summary.monthly_discretionary, dec!(-256));
        assert_eq!(summary.extra_payment, dec!(0));
        assert_eq!(summary.plan[0].monthly_payment, dec!(50));
        // A: 10 months, B: ceil(2000 / 150) = 14
        assert_eq!(summary.months_to_debt_free(), Some(24));
    }

    #[test]
    fn test_empty_household() {
        let summary = BudgetSummary::calculate(&Household::default(), today()).unwrap();
        assert!(summary.plan.is_empty());
        assert_eq!(summary.payoff, None);
        assert_eq!(summary.debt_free_date, None);
        assert_eq!(summary.monthly_discretionary, dec!(0));
    }
}
