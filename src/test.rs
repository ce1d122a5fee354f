//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{
    ExpensePriority, Frequency, IncomeType, NewDebt, NewExpense, NewIncome, UniversalCredit,
};
use crate::Config;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Test environment that sets up a snowball home directory with a Config and an empty household.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("snowball"))
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Adds a debt and returns its id.
    pub async fn add_debt(
        &self,
        name: &str,
        balance: Decimal,
        minimum_payment: Decimal,
        interest_rate: Decimal,
    ) -> String {
        let mut household = self.config.load_household().await.unwrap();
        let id = household
            .add_debt(NewDebt {
                name: name.to_string(),
                balance: balance.into(),
                minimum_payment: minimum_payment.into(),
                interest_rate,
                ..NewDebt::default()
            })
            .unwrap()
            .id()
            .to_string();
        self.config.save_household(&household).await.unwrap();
        id
    }

    /// Adds monthly wages.
    pub async fn add_wages(&self, amount: Decimal) {
        let mut household = self.config.load_household().await.unwrap();
        household
            .add_income(NewIncome {
                name: "Wages".to_string(),
                income_type: IncomeType::Wages,
                amount: amount.into(),
                frequency: Frequency::Monthly,
                ..NewIncome::default()
            })
            .unwrap();
        self.config.save_household(&household).await.unwrap();
    }

    /// Seeds a household with:
    /// - £600 monthly wages and a £500 Universal Credit award on the default taper (£392.20)
    /// - £700 of monthly expenses
    /// - two interest free debts: Catalogue £200 (min £20) and Loan £900 (min £60)
    pub async fn seed_household(&self) {
        self.add_wages(dec!(600)).await;
        self.add_debt("Loan", dec!(900), dec!(60), dec!(0)).await;
        self.add_debt("Catalogue", dec!(200), dec!(20), dec!(0)).await;

        let mut household = self.config.load_household().await.unwrap();
        household
            .add_expense(NewExpense {
                name: "Rent".to_string(),
                amount: dec!(550).into(),
                frequency: Frequency::Monthly,
                ..NewExpense::default()
            })
            .unwrap();
        household
            .add_expense(NewExpense {
                name: "Takeaways".to_string(),
                amount: dec!(150).into(),
                priority: ExpensePriority::NonEssential,
                frequency: Frequency::Monthly,
                ..NewExpense::default()
            })
            .unwrap();
        let uc = UniversalCredit::new(dec!(500), self.config.taper_policy()).unwrap();
        household.set_universal_credit(Some(uc));
        self.config.save_household(&household).await.unwrap();
    }
}
