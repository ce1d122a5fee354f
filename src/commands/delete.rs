//! Delete command handlers.

use crate::args::DeleteIdsArgs;
use crate::commands::Out;
use crate::{Config, Result};

/// Deletes one or more debts by id.
///
/// This operation is all-or-nothing: if any id is not found, nothing is deleted. Payments
/// already recorded against a deleted debt stay in the payment history.
pub async fn delete_debts(config: Config, args: DeleteIdsArgs) -> Result<Out<Vec<String>>> {
    let mut household = config.load_household().await?;
    let deleted = household.remove_debts(args.ids())?;
    config.save_household(&household).await?;
    Ok(Out::new(deleted_message(deleted.len(), "debt"), deleted))
}

/// Deletes one or more incomes by id. All-or-nothing, as for debts.
pub async fn delete_incomes(config: Config, args: DeleteIdsArgs) -> Result<Out<Vec<String>>> {
    let mut household = config.load_household().await?;
    let deleted = household.remove_incomes(args.ids())?;
    config.save_household(&household).await?;
    Ok(Out::new(deleted_message(deleted.len(), "income"), deleted))
}

/// Deletes one or more expenses by id. All-or-nothing, as for debts.
pub async fn delete_expenses(config: Config, args: DeleteIdsArgs) -> Result<Out<Vec<String>>> {
    let mut household = config.load_household().await?;
    let deleted = household.remove_expenses(args.ids())?;
    config.save_household(&household).await?;
    Ok(Out::new(deleted_message(deleted.len(), "expense"), deleted))
}

fn deleted_message(count: usize, kind: &str) -> String {
    format!("Deleted {count} {kind}{}", if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::PayArgs;
    use crate::commands::pay;
    use crate::model::Amount;
    use crate::test::TestEnv;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_delete_debts() {
        let env = TestEnv::new().await;
        let a = env.add_debt("Overdraft", dec!(300), dec!(25), dec!(0)).await;
        let b = env.add_debt("Loan", dec!(1500), dec!(80), dec!(9.9)).await;

        let out = delete_debts(env.config(), DeleteIdsArgs::new(vec![a.clone()]))
            .await
            .unwrap();
        assert_eq!(out.message(), "Deleted 1 debt");
        assert_eq!(out.structure().unwrap(), &vec![a.clone()]);

        let household = env.config().load_household().await.unwrap();
        assert!(household.debt(&a).is_none());
        assert!(household.debt(&b).is_some());
    }

    #[tokio::test]
    async fn test_delete_is_all_or_nothing() {
        let env = TestEnv::new().await;
        let a = env.add_debt("Overdraft", dec!(300), dec!(25), dec!(0)).await;

        let args = DeleteIdsArgs::new(vec![a.clone(), "missing".to_string()]);
        let err = delete_debts(env.config(), args).await.unwrap_err();
        assert!(err.to_string().contains("missing"));

        let household = env.config().load_household().await.unwrap();
        assert!(household.debt(&a).is_some());
    }

    #[tokio::test]
    async fn test_delete_keeps_payment_history() {
        let env = TestEnv::new().await;
        let a = env.add_debt("Overdraft", dec!(300), dec!(25), dec!(0)).await;
        let pay_args = PayArgs::new(a.clone(), Some(Amount::new(dec!(50))), None);
        pay(env.config(), pay_args).await.unwrap();

        delete_debts(env.config(), DeleteIdsArgs::new(vec![a]))
            .await
            .unwrap();
        let household = env.config().load_household().await.unwrap();
        assert!(household.debts().is_empty());
        assert_eq!(household.payments().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_incomes_and_expenses() {
        let env = TestEnv::new().await;
        env.seed_household().await;
        let household = env.config().load_household().await.unwrap();
        let incomes: Vec<String> = household
            .incomes()
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        let expense = household.expenses()[0].id().to_string();

        let out = delete_incomes(env.config(), DeleteIdsArgs::new(incomes.clone()))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), incomes.len());

        // An income id is not an expense id.
        let wrong = DeleteIdsArgs::new(vec![incomes[0].clone()]);
        assert!(delete_expenses(env.config(), wrong).await.is_err());

        delete_expenses(env.config(), DeleteIdsArgs::new(vec![expense.clone()]))
            .await
            .unwrap();
        let household = env.config().load_household().await.unwrap();
        assert!(household.incomes().is_empty());
        assert!(household.expenses().iter().all(|e| e.id() != expense));
    }
}
