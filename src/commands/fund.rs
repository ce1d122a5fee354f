use crate::args::FundArgs;
use crate::commands::{money, Out};
use crate::model::BabyStepsProgress;
use crate::{Config, Result};

/// Records the current emergency fund balance and, optionally, the fully funded target.
/// Reaching the starter target completes baby step 1; reaching the fully funded target once
/// debt free completes baby step 3. Step 3 never completes until a target has been set.
pub async fn fund(config: Config, args: FundArgs) -> Result<Out<BabyStepsProgress>> {
    let mut household = config.load_household().await?;
    let before = household.baby_steps().current_step();
    if let Some(target) = args.target() {
        household.set_emergency_fund_target(target)?;
    }
    if let Some(amount) = args.amount() {
        household.update_emergency_fund(amount)?;
    }
    config.save_household(&household).await?;

    let progress = household.baby_steps().clone();
    let mut message = format!(
        "Emergency fund is {}",
        money(progress.emergency_fund_balance())
    );
    if progress.current_step() != before {
        message.push_str(&format!(
            ". Baby step {before} complete, now on step {}: {}",
            progress.current_step(),
            progress.current_step_name()
        ));
    } else if progress.current_step() == 1 {
        message.push_str(&format!(
            " of a {} starter target",
            money(progress.step1_target())
        ));
    } else if progress.current_step() == 3 {
        if progress.has_step3_target() {
            message.push_str(&format!(
                " of a {} fully funded target",
                money(progress.step3_target())
            ));
        } else {
            message.push_str(". Set a fully funded target with --target to finish step 3");
        }
    }
    Ok(Out::new(message, progress))
}
