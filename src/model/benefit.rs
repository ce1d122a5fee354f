use crate::calc::{bounded, fraction, CalcError, CalcResult};
use crate::model::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The taper policy in force: how much earned income is ignored and what fraction of the excess
/// is clawed back. These are government policy values and come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaperPolicy {
    pub work_allowance: Decimal,
    pub taper_rate: Decimal,
}

impl TaperPolicy {
    pub fn validate(&self) -> CalcResult<()> {
        bounded("work_allowance", self.work_allowance)?;
        fraction("taper_rate", self.taper_rate)?;
        Ok(())
    }
}

/// The household's Universal Credit award settings. A household has at most one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UniversalCredit {
    /// Monthly award before the taper is applied.
    base_amount: Amount,
    work_allowance: Amount,
    taper_rate: Decimal,
    #[serde(default)]
    housing_included: bool,
    #[serde(default)]
    council_tax_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_day: Option<u8>,
}

impl UniversalCredit {
    pub fn new(base_amount: Decimal, policy: TaperPolicy) -> CalcResult<Self> {
        let settings = Self {
            base_amount: base_amount.into(),
            work_allowance: policy.work_allowance.into(),
            taper_rate: policy.taper_rate,
            housing_included: false,
            council_tax_included: false,
            payment_day: None,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_housing_included(mut self, housing_included: bool) -> Self {
        self.housing_included = housing_included;
        self
    }

    pub fn with_council_tax_included(mut self, council_tax_included: bool) -> Self {
        self.council_tax_included = council_tax_included;
        self
    }

    pub fn with_payment_day(mut self, payment_day: Option<u8>) -> CalcResult<Self> {
        self.payment_day = payment_day;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> CalcResult<()> {
        bounded("base_amount", self.base_amount.value())?;
        self.policy().validate()?;
        if let Some(day) = self.payment_day {
            if !(1..=31).contains(&day) {
                return Err(CalcError::invalid(
                    "payment_day",
                    format!("must be between 1 and 31, got {day}"),
                ));
            }
        }
        Ok(())
    }

    pub fn base_amount(&self) -> Decimal {
        self.base_amount.value()
    }

    pub fn work_allowance(&self) -> Decimal {
        self.work_allowance.value()
    }

    pub fn taper_rate(&self) -> Decimal {
        self.taper_rate
    }

    pub fn policy(&self) -> TaperPolicy {
        TaperPolicy {
            work_allowance: self.work_allowance(),
            taper_rate: self.taper_rate,
        }
    }

    pub fn housing_included(&self) -> bool {
        self.housing_included
    }

    pub fn council_tax_included(&self) -> bool {
        self.council_tax_included
    }

    pub fn payment_day(&self) -> Option<u8> {
        self.payment_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn policy() -> TaperPolicy {
        TaperPolicy {
            work_allowance: dec!(404),
            taper_rate: dec!(0.55),
        }
    }

    #[test]
    fn test_new_settings() {
        let uc = UniversalCredit::new(dec!(500), policy())
            .unwrap()
            .with_housing_included(true);
        assert_eq!(uc.base_amount(), dec!(500));
        assert_eq!(uc.policy(), policy());
        assert!(uc.housing_included());
        assert!(!uc.council_tax_included());
    }

    #[test]
    fn test_rejects_bad_taper_rate() {
        let bad = TaperPolicy {
            taper_rate: dec!(1.5),
            ..policy()
        };
        assert!(UniversalCredit::new(dec!(500), bad).is_err());
        assert!(UniversalCredit::new(dec!(-1), policy()).is_err());
    }

    #[test]
    fn test_payment_day() {
        let uc = UniversalCredit::new(dec!(500), policy()).unwrap();
        assert!(uc.clone().with_payment_day(Some(0)).is_err());
        assert_eq!(
            uc.with_payment_day(Some(12)).unwrap().payment_day(),
            Some(12)
        );
    }
}
