use crate::calc::{fraction, non_negative, CalcResult};
use rust_decimal::Decimal;

/// Applies the Universal Credit taper: earnings above `work_allowance` reduce the award by
/// `taper_rate` per pound. The result is always within `[0, base_amount]`.
///
/// # Errors
/// - `InvalidParameter` if any amount is negative or `taper_rate` is outside `[0, 1]`.
pub fn adjusted_benefit(
    base_amount: Decimal,
    earned_income: Decimal,
    work_allowance: Decimal,
    taper_rate: Decimal,
) -> CalcResult<Decimal> {
    non_negative("base_amount", base_amount)?;
    non_negative("earned_income", earned_income)?;
    non_negative("work_allowance", work_allowance)?;
    fraction("taper_rate", taper_rate)?;

    if earned_income <= work_allowance {
        return Ok(base_amount);
    }
    let deduction = (earned_income - work_allowance) * taper_rate;
    Ok((base_amount - deduction).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::CalcError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_taper_example() {
        let adjusted = adjusted_benefit(dec!(500), dec!(604), dec!(404), dec!(0.55)).unwrap();
        assert_eq!(adjusted, dec!(390));
    }

    #[test]
    fn test_at_or_below_allowance_is_untouched() {
        assert_eq!(
            adjusted_benefit(dec!(500), dec!(404), dec!(404), dec!(0.55)).unwrap(),
            dec!(500)
        );
        assert_eq!(
            adjusted_benefit(dec!(500), dec!(0), dec!(404), dec!(0.55)).unwrap(),
            dec!(500)
        );
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(
            adjusted_benefit(dec!(500), dec!(5000), dec!(404), dec!(0.55)).unwrap(),
            dec!(0)
        );
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let base = dec!(812.34);
        let mut previous = base;
        let mut earned = dec!(0);
        while earned <= dec!(3000) {
            let adjusted = adjusted_benefit(base, earned, dec!(404), dec!(0.55)).unwrap();
            assert!(adjusted <= previous, "earned {earned}");
            assert!(adjusted >= Decimal::ZERO);
            assert!(adjusted <= base);
            previous = adjusted;
            earned += dec!(37.5);
        }
    }

    #[test]
    fn test_zero_and_full_taper() {
        assert_eq!(
            adjusted_benefit(dec!(500), dec!(1000), dec!(404), dec!(0)).unwrap(),
            dec!(500)
        );
        assert_eq!(
            adjusted_benefit(dec!(500), dec!(504), dec!(404), dec!(1)).unwrap(),
            dec!(400)
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let err = adjusted_benefit(dec!(500), dec!(600), dec!(404), dec!(1.2)).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidParameter {
                name: "taper_rate",
                ..
            }
        ));
        assert!(adjusted_benefit(dec!(-1), dec!(600), dec!(404), dec!(0.55)).is_err());
        assert!(adjusted_benefit(dec!(500), dec!(-600), dec!(404), dec!(0.55)).is_err());
        assert!(adjusted_benefit(dec!(500), dec!(600), dec!(-404), dec!(0.55)).is_err());
    }
}
