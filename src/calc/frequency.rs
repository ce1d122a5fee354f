use crate::calc::{overflow, CalcResult};
use crate::model::Frequency;
use rust_decimal::Decimal;

const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);
const FORTNIGHTS_PER_YEAR: Decimal = Decimal::from_parts(26, 0, 0, false, 0);
const FOUR_WEEKS_PER_YEAR: Decimal = Decimal::from_parts(13, 0, 0, false, 0);
pub(crate) const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const MONTHS_PER_QUARTER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Converts an amount paid at `frequency` into the equivalent amount per calendar month.
///
/// Nothing is rounded here; rounding to pence is a display concern.
///
/// # Errors
/// - `InvalidParameter` if the monthly amount is too large for a `Decimal`.
pub fn monthly_equivalent(amount: Decimal, frequency: Frequency) -> CalcResult<Decimal> {
    let per_year = match frequency {
        Frequency::Weekly => WEEKS_PER_YEAR,
        Frequency::Fortnightly => FORTNIGHTS_PER_YEAR,
        Frequency::FourWeekly => FOUR_WEEKS_PER_YEAR,
        Frequency::Monthly => return Ok(amount),
        Frequency::Quarterly => return Ok(amount / MONTHS_PER_QUARTER),
        Frequency::Annually => return Ok(amount / MONTHS_PER_YEAR),
    };
    amount
        .checked_mul(per_year)
        .map(|yearly| yearly / MONTHS_PER_YEAR)
        .ok_or_else(|| overflow("amount"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ALL: [Frequency; 6] = [
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::FourWeekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Annually,
    ];

    #[test]
    fn test_exact_conversions() {
        assert_eq!(monthly_equivalent(dec!(120), Frequency::Weekly).unwrap(), dec!(520));
        assert_eq!(
            monthly_equivalent(dec!(120), Frequency::Fortnightly).unwrap(),
            dec!(260)
        );
        assert_eq!(
            monthly_equivalent(dec!(120), Frequency::FourWeekly).unwrap(),
            dec!(130)
        );
        assert_eq!(monthly_equivalent(dec!(120), Frequency::Monthly).unwrap(), dec!(120));
        assert_eq!(monthly_equivalent(dec!(120), Frequency::Quarterly).unwrap(), dec!(40));
        assert_eq!(monthly_equivalent(dec!(120), Frequency::Annually).unwrap(), dec!(10));
    }

    #[test]
    fn test_no_rounding() {
        let weekly = monthly_equivalent(dec!(100), Frequency::Weekly).unwrap();
        assert_eq!(weekly.round_dp(2), dec!(433.33));
        assert!(weekly.scale() > 2);
    }

    #[test]
    fn test_linear_in_amount() {
        for frequency in ALL {
            for amount in [dec!(0), dec!(1), dec!(37.5), dec!(1234.56)] {
                let single = monthly_equivalent(amount, frequency).unwrap();
                let double = monthly_equivalent(amount * dec!(2), frequency).unwrap();
                assert_eq!(
                    double.round_dp(20),
                    (single * dec!(2)).round_dp(20),
                    "{frequency} {amount}"
                );
            }
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Decimal::MAX / dec!(10);
        assert_eq!(monthly_equivalent(huge, Frequency::Monthly).unwrap(), huge);
        assert!(monthly_equivalent(huge, Frequency::Annually).is_ok());
        let err = monthly_equivalent(huge, Frequency::Weekly).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_zero_is_zero() {
        for frequency in ALL {
            assert!(monthly_equivalent(Decimal::ZERO, frequency).unwrap().is_zero());
        }
    }
}
