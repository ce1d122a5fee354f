use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The starter emergency fund target, in pounds.
pub const DEFAULT_STEP1_TARGET: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// The seven baby steps, in order.
pub const BABY_STEPS: [&str; 7] = [
    "£1,000 emergency fund",
    "Pay off all debt (except the mortgage)",
    "3-6 months of expenses saved",
    "Invest 15% of income",
    "Children's education",
    "Pay off the mortgage",
    "Build wealth and give",
];

/// Where the household is in the seven-step plan.
///
/// Only the first three steps are tracked in detail. Step 2 is completed by clearing every debt,
/// which is the signal the snowball engine feeds back into this progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BabyStepsProgress {
    current_step: u8,
    step1_progress: Decimal,
    step1_target: Decimal,
    step1_completed: bool,
    step2_completed: bool,
    step3_progress: Decimal,
    step3_target: Decimal,
    step3_completed: bool,
    emergency_fund_balance: Decimal,
    updated_at: DateTime<Utc>,
}

impl Default for BabyStepsProgress {
    fn default() -> Self {
        Self::new(DEFAULT_STEP1_TARGET)
    }
}

impl BabyStepsProgress {
    pub fn new(step1_target: Decimal) -> Self {
        Self {
            current_step: 1,
            step1_progress: Decimal::ZERO,
            step1_target,
            step1_completed: false,
            step2_completed: false,
            step3_progress: Decimal::ZERO,
            step3_target: Decimal::ZERO,
            step3_completed: false,
            emergency_fund_balance: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    /// Name of the current step.
    pub fn current_step_name(&self) -> &'static str {
        let ix = usize::from(self.current_step.clamp(1, 7)) - 1;
        BABY_STEPS[ix]
    }

    pub fn step1_progress(&self) -> Decimal {
        self.step1_progress
    }

    pub fn step1_target(&self) -> Decimal {
        self.step1_target
    }

    pub fn step1_completed(&self) -> bool {
        self.step1_completed
    }

    pub fn step2_completed(&self) -> bool {
        self.step2_completed
    }

    pub fn step3_progress(&self) -> Decimal {
        self.step3_progress
    }

    pub fn step3_target(&self) -> Decimal {
        self.step3_target
    }

    pub fn step3_completed(&self) -> bool {
        self.step3_completed
    }

    pub fn emergency_fund_balance(&self) -> Decimal {
        self.emergency_fund_balance
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether a fully funded target has been chosen. Step 3 cannot complete without one.
    pub fn has_step3_target(&self) -> bool {
        self.step3_target > Decimal::ZERO
    }

    /// Sets the fully funded emergency fund target used by step 3. When the household is on
    /// step 3 and the fund already covers the new target, step 3 completes.
    pub fn set_step3_target(&mut self, target: Decimal, now: DateTime<Utc>) {
        self.step3_target = target;
        self.update_emergency_fund(self.emergency_fund_balance, now);
    }

    /// Records the emergency fund balance and advances past step 1 or step 3 when the balance
    /// reaches that step's target. A step 3 target of zero means none has been set yet. At any
    /// other step only the balance is stored.
    pub fn update_emergency_fund(&mut self, amount: Decimal, now: DateTime<Utc>) {
        self.emergency_fund_balance = amount;
        match self.current_step {
            1 => {
                self.step1_progress = amount;
                if amount >= self.step1_target {
                    self.step1_completed = true;
                    self.current_step = 2;
                }
            }
            3 => {
                self.step3_progress = amount;
                if self.has_step3_target() && amount >= self.step3_target {
                    self.step3_completed = true;
                    self.current_step = 4;
                }
            }
            _ => {}
        }
        self.updated_at = now;
    }

    /// Called when the last active debt is paid off.
    pub fn complete_debt_free(&mut self, now: DateTime<Utc>) {
        self.step2_completed = true;
        self.current_step = 3;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_starts_at_step_one() {
        let progress = BabyStepsProgress::default();
        assert_eq!(progress.current_step(), 1);
        assert_eq!(progress.step1_target(), dec!(1000));
        assert_eq!(progress.current_step_name(), "£1,000 emergency fund");
    }

    #[test]
    fn test_step_one_progress_then_completion() {
        let mut progress = BabyStepsProgress::default();
        progress.update_emergency_fund(dec!(400), Utc::now());
        assert_eq!(progress.step1_progress(), dec!(400));
        assert!(!progress.step1_completed());
        assert_eq!(progress.current_step(), 1);

        progress.update_emergency_fund(dec!(1000), Utc::now());
        assert!(progress.step1_completed());
        assert_eq!(progress.current_step(), 2);
    }

    #[test]
    fn test_step_two_only_records_balance() {
        let mut progress = BabyStepsProgress::default();
        progress.update_emergency_fund(dec!(1200), Utc::now());
        progress.update_emergency_fund(dec!(900), Utc::now());
        assert_eq!(progress.current_step(), 2);
        assert_eq!(progress.emergency_fund_balance(), dec!(900));
        assert_eq!(progress.step1_progress(), dec!(1200));
    }

    #[test]
    fn test_step_three_needs_a_target() {
        let mut progress = BabyStepsProgress::default();
        progress.update_emergency_fund(dec!(1000), Utc::now());
        progress.complete_debt_free(Utc::now());

        progress.update_emergency_fund(dec!(0), Utc::now());
        assert_eq!(progress.current_step(), 3);
        assert!(!progress.step3_completed());
        progress.update_emergency_fund(dec!(2500), Utc::now());
        assert_eq!(progress.current_step(), 3);
        assert_eq!(progress.step3_progress(), dec!(2500));

        progress.set_step3_target(dec!(6000), Utc::now());
        progress.update_emergency_fund(dec!(5999.99), Utc::now());
        assert_eq!(progress.current_step(), 3);
        assert!(!progress.step3_completed());
    }

    #[test]
    fn test_lowering_target_below_balance_completes_step_three() {
        let mut progress = BabyStepsProgress::default();
        progress.update_emergency_fund(dec!(1000), Utc::now());
        progress.complete_debt_free(Utc::now());
        progress.update_emergency_fund(dec!(4000), Utc::now());

        progress.set_step3_target(dec!(3500), Utc::now());
        assert!(progress.step3_completed());
        assert_eq!(progress.current_step(), 4);
    }

    #[test]
    fn test_target_set_early_does_not_skip_steps() {
        let mut progress = BabyStepsProgress::default();
        progress.set_step3_target(dec!(100), Utc::now());
        assert_eq!(progress.current_step(), 1);
        assert_eq!(progress.step3_target(), dec!(100));
        assert!(!progress.step1_completed());
    }

    #[test]
    fn test_debt_free_then_full_fund() {
        let mut progress = BabyStepsProgress::default();
        progress.update_emergency_fund(dec!(1000), Utc::now());
        progress.complete_debt_free(Utc::now());
        assert!(progress.step2_completed());
        assert_eq!(progress.current_step(), 3);

        progress.set_step3_target(dec!(6000), Utc::now());
        progress.update_emergency_fund(dec!(5000), Utc::now());
        assert_eq!(progress.step3_progress(), dec!(5000));
        assert_eq!(progress.current_step(), 3);

        progress.update_emergency_fund(dec!(6000), Utc::now());
        assert!(progress.step3_completed());
        assert_eq!(progress.current_step(), 4);
    }
}
