use crate::args::BenefitArgs;
use crate::calc::{adjusted_benefit, income_breakdown};
use crate::commands::{money, Out};
use crate::model::{TaperPolicy, UniversalCredit};
use crate::{Config, Result};
use tracing::info;

/// Sets up, replaces or removes the household's Universal Credit award.
///
/// The work allowance and taper rate come from `config.json` unless overridden on the command
/// line. The reply shows what the award comes to once tapered against current earnings.
///
/// # Errors
/// - Returns an error if the base amount or work allowance is negative, or the taper rate is
///   outside 0 to 1.
pub async fn benefit(config: Config, args: BenefitArgs) -> Result<Out<Option<UniversalCredit>>> {
    let mut household = config.load_household().await?;

    let Some(base_amount) = args.base_amount() else {
        household.set_universal_credit(None);
        config.save_household(&household).await?;
        info!("Removed the Universal Credit settings");
        return Ok(Out::new("Universal Credit removed", None));
    };

    let configured = config.taper_policy();
    let policy = TaperPolicy {
        work_allowance: args.work_allowance().unwrap_or(configured.work_allowance),
        taper_rate: args.taper_rate().unwrap_or(configured.taper_rate),
    };
    let settings = UniversalCredit::new(base_amount, policy)?
        .with_housing_included(args.housing_included())
        .with_council_tax_included(args.council_tax_included())
        .with_payment_day(args.payment_day())?;

    let earned = income_breakdown(household.incomes(), None)?.earned;
    let award = adjusted_benefit(
        settings.base_amount(),
        earned,
        settings.work_allowance(),
        settings.taper_rate(),
    )?;

    household.set_universal_credit(Some(settings.clone()));
    config.save_household(&household).await?;

    Ok(Out::new(
        format!(
            "Universal Credit of {} a month comes to {} after the taper on {} earnings",
            money(settings.base_amount()),
            money(award.round_dp(2)),
            money(earned.round_dp(2))
        ),
        Some(settings),
    ))
}
