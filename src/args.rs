//! These structs provide the CLI interface for the snowball CLI.

use crate::model::{
    Amount, DebtType, ExpenseCategory, ExpensePriority, Frequency, IncomeType, NewDebt,
    NewExpense, NewIncome,
};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// snowball: plan your way out of debt with the debt snowball.
///
/// Record your debts, income and bills, then ask for a plan. Debts are attacked County Court
/// Judgments first, then smallest balance first, with every spare pound each month thrown at the
/// current target. When a debt is cleared its minimum payment rolls onto the next one.
///
/// If you receive Universal Credit, set it up with `snowball benefit` and your award will be
/// tapered against your earnings automatically.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory with a default config and an empty household.
    ///
    /// By default the data lives in $HOME/snowball. Pass --snowball-home or set SNOWBALL_HOME to
    /// keep it somewhere else.
    Init,
    /// Show monthly income, expenses, debt totals and the projected debt-free date.
    Summary,
    /// Show the snowball plan: which debt to attack and what to pay on each.
    Plan(PlanArgs),
    /// Project the date you will be debt free and when each debt will be cleared.
    Project(PlanArgs),
    /// Add a debt, income or expense.
    Add(AddArgs),
    /// Record a payment against a debt.
    Pay(PayArgs),
    /// Set up or change your Universal Credit award.
    Benefit(BenefitArgs),
    /// Update your emergency fund balance or its fully funded target.
    Fund(FundArgs),
    /// Delete debts, incomes or expenses by id.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where snowball data and configuration is held. Defaults to ~/snowball
    #[arg(long, env = "SNOWBALL_HOME", default_value_t = default_snowball_home())]
    snowball_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, snowball_home: PathBuf) -> Self {
        Self {
            log_level,
            snowball_home: snowball_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn snowball_home(&self) -> &DisplayPath {
        &self.snowball_home
    }
}

/// Args for the `snowball plan` and `snowball project` commands.
#[derive(Debug, Default, Parser, Clone)]
pub struct PlanArgs {
    /// Extra to pay each month on top of the minimums. Defaults to whatever is left over after
    /// expenses and minimum payments.
    #[arg(long)]
    extra: Option<Amount>,
}

impl PlanArgs {
    pub fn new(extra: Option<Amount>) -> Self {
        Self { extra }
    }

    pub fn extra(&self) -> Option<Decimal> {
        self.extra.map(|a| a.value())
    }
}

/// Args for the `snowball add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(subcommand)]
    entity: AddSubcommand,
}

impl AddArgs {
    pub fn new(entity: AddSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &AddSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddSubcommand {
    /// Add a debt.
    Debt(Box<AddDebtArgs>),
    /// Add a source of income.
    Income(AddIncomeArgs),
    /// Add a recurring bill.
    Expense(AddExpenseArgs),
}

/// Args for `snowball add debt`.
#[derive(Debug, Parser, Clone)]
pub struct AddDebtArgs {
    /// What you call this debt, e.g. "Barclaycard".
    #[arg(long)]
    name: String,

    /// One of: credit_card, personal_loan, overdraft, bnpl, car_finance, ccj, payday_loan,
    /// store_card, mortgage
    #[arg(long = "type", default_value = "credit_card")]
    debt_type: DebtType,

    /// Who the debt is owed to.
    #[arg(long, default_value = "")]
    creditor: String,

    /// The outstanding balance, e.g. "£1,250.00".
    #[arg(long)]
    balance: Amount,

    /// Annual interest rate as a percentage, e.g. 19.9
    #[arg(long, default_value = "0")]
    interest_rate: Decimal,

    /// The contractual minimum monthly payment.
    #[arg(long)]
    minimum_payment: Amount,

    /// Day of the month the payment is taken.
    #[arg(long)]
    payment_day: Option<u8>,

    /// This debt is a County Court Judgment and is paid before anything else.
    #[arg(long)]
    ccj: bool,

    /// Date the CCJ must be settled by (YYYY-MM-DD).
    #[arg(long)]
    ccj_deadline: Option<NaiveDate>,
}

impl AddDebtArgs {
    pub fn new(name: impl Into<String>, balance: Amount, minimum_payment: Amount) -> Self {
        Self {
            name: name.into(),
            debt_type: DebtType::default(),
            creditor: String::new(),
            balance,
            interest_rate: Decimal::ZERO,
            minimum_payment,
            payment_day: None,
            ccj: false,
            ccj_deadline: None,
        }
    }

    pub fn with_interest_rate(mut self, interest_rate: Decimal) -> Self {
        self.interest_rate = interest_rate;
        self
    }

    pub fn with_ccj(mut self, ccj: bool) -> Self {
        self.ccj = ccj;
        self
    }

    pub fn to_new_debt(&self) -> NewDebt {
        NewDebt {
            name: self.name.clone(),
            debt_type: self.debt_type,
            creditor: self.creditor.clone(),
            balance: self.balance,
            interest_rate: self.interest_rate,
            minimum_payment: self.minimum_payment,
            payment_day: self.payment_day,
            is_ccj: self.ccj,
            ccj_deadline: self.ccj_deadline,
        }
    }
}

/// Args for `snowball add income`.
#[derive(Debug, Parser, Clone)]
pub struct AddIncomeArgs {
    #[arg(long)]
    name: String,

    /// One of: wages, side_project, universal_credit, benefits, self_employment, rental, other
    #[arg(long = "type", default_value = "wages")]
    income_type: IncomeType,

    /// The amount received each time you are paid.
    #[arg(long)]
    amount: Amount,

    /// One of: weekly, fortnightly, 4-weekly, monthly
    #[arg(long, default_value = "monthly")]
    frequency: Frequency,

    /// The amount is before tax.
    #[arg(long)]
    gross: bool,

    /// Day of the month you are paid.
    #[arg(long)]
    payment_day: Option<u8>,
}

impl AddIncomeArgs {
    pub fn new(
        name: impl Into<String>,
        income_type: IncomeType,
        amount: Amount,
        frequency: Frequency,
    ) -> Self {
        Self {
            name: name.into(),
            income_type,
            amount,
            frequency,
            gross: false,
            payment_day: None,
        }
    }

    pub fn to_new_income(&self) -> NewIncome {
        NewIncome {
            name: self.name.clone(),
            income_type: self.income_type,
            amount: self.amount,
            frequency: self.frequency,
            is_net: !self.gross,
            start_date: None,
            payment_day: self.payment_day,
            notes: None,
        }
    }
}

/// Args for `snowball add expense`.
#[derive(Debug, Parser, Clone)]
pub struct AddExpenseArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    amount: Amount,

    /// One of: weekly, monthly, quarterly, annually
    #[arg(long, default_value = "monthly")]
    frequency: Frequency,

    /// One of: housing, utilities, food, transport, insurance, subscription, childcare, medical,
    /// phone, entertainment, other
    #[arg(long, default_value = "other")]
    category: ExpenseCategory,

    /// One of: essential, non_essential
    #[arg(long, default_value = "essential")]
    priority: ExpensePriority,

    /// Day of the month the bill is due.
    #[arg(long)]
    due_day: Option<u8>,

    /// Paid directly out of your Universal Credit award.
    #[arg(long)]
    uc_paid: bool,
}

impl AddExpenseArgs {
    pub fn new(name: impl Into<String>, amount: Amount, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency,
            category: ExpenseCategory::default(),
            priority: ExpensePriority::default(),
            due_day: None,
            uc_paid: false,
        }
    }

    pub fn with_priority(mut self, priority: ExpensePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn to_new_expense(&self) -> NewExpense {
        NewExpense {
            name: self.name.clone(),
            amount: self.amount,
            category: self.category,
            priority: self.priority,
            frequency: self.frequency,
            due_day: self.due_day,
            is_uc_paid: self.uc_paid,
            notes: None,
        }
    }
}

/// Args for the `snowball pay` command.
#[derive(Debug, Parser, Clone)]
pub struct PayArgs {
    /// The id of the debt being paid.
    #[arg(long)]
    debt: String,

    /// How much was paid. Required unless --all is given.
    #[arg(long, required_unless_present = "all", conflicts_with = "all")]
    amount: Option<Amount>,

    /// Pay off the whole remaining balance.
    #[arg(long)]
    all: bool,

    /// Date of the payment (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    notes: Option<String>,
}

impl PayArgs {
    pub fn new(debt: impl Into<String>, amount: Option<Amount>, date: Option<NaiveDate>) -> Self {
        Self {
            debt: debt.into(),
            all: amount.is_none(),
            amount,
            date,
            notes: None,
        }
    }

    pub fn debt(&self) -> &str {
        &self.debt
    }

    /// `None` means pay the whole balance.
    pub fn amount(&self) -> Option<Decimal> {
        if self.all {
            None
        } else {
            self.amount.map(|a| a.value())
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Args for the `snowball benefit` command.
#[derive(Debug, Parser, Clone)]
pub struct BenefitArgs {
    /// Your monthly award before any deduction for earnings. Pass --remove instead to delete
    /// your Universal Credit settings.
    #[arg(long, required_unless_present = "remove")]
    base_amount: Option<Amount>,

    /// Override the configured work allowance.
    #[arg(long)]
    work_allowance: Option<Amount>,

    /// Override the configured taper rate, e.g. 0.55
    #[arg(long)]
    taper_rate: Option<Decimal>,

    #[arg(long)]
    housing_included: bool,

    #[arg(long)]
    council_tax_included: bool,

    #[arg(long)]
    payment_day: Option<u8>,

    /// Remove the Universal Credit settings.
    #[arg(long, conflicts_with = "base_amount")]
    remove: bool,
}

impl BenefitArgs {
    pub fn new(base_amount: Option<Amount>) -> Self {
        Self {
            remove: base_amount.is_none(),
            base_amount,
            work_allowance: None,
            taper_rate: None,
            housing_included: false,
            council_tax_included: false,
            payment_day: None,
        }
    }

    pub fn with_taper_rate(mut self, taper_rate: Decimal) -> Self {
        self.taper_rate = Some(taper_rate);
        self
    }

    /// `None` when the settings should be removed.
    pub fn base_amount(&self) -> Option<Decimal> {
        if self.remove {
            None
        } else {
            self.base_amount.map(|a| a.value())
        }
    }

    pub fn work_allowance(&self) -> Option<Decimal> {
        self.work_allowance.map(|a| a.value())
    }

    pub fn taper_rate(&self) -> Option<Decimal> {
        self.taper_rate
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

/// Args for the `snowball fund` command. At least one of --amount and --target is required.
#[derive(Debug, Parser, Clone)]
#[command(group(
    ArgGroup::new("update")
        .required(true)
        .multiple(true)
        .args(["amount", "target"])
))]
pub struct FundArgs {
    /// The emergency fund balance now.
    #[arg(long)]
    amount: Option<Amount>,

    /// The fully funded target for baby step 3, typically three to six months of expenses.
    #[arg(long)]
    target: Option<Amount>,
}

impl FundArgs {
    pub fn new(amount: Option<Amount>, target: Option<Amount>) -> Self {
        Self { amount, target }
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount.map(|a| a.value())
    }

    pub fn target(&self) -> Option<Decimal> {
        self.target.map(|a| a.value())
    }
}

/// Args for the `snowball delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn new(entity: DeleteSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete debts. Payments already made against them stay in the history.
    Debt(DeleteIdsArgs),
    /// Delete sources of income.
    Income(DeleteIdsArgs),
    /// Delete recurring bills.
    Expense(DeleteIdsArgs),
}

/// The ids to delete. Either every id is deleted or, if any is unknown, none are.
#[derive(Debug, Parser, Clone)]
pub struct DeleteIdsArgs {
    /// An id to delete. Repeat to delete several at once.
    #[arg(long = "id", required = true)]
    ids: Vec<String>,
}

impl DeleteIdsArgs {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

fn default_snowball_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("snowball"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --snowball-home or SNOWBALL_HOME instead of relying on the \
                default snowball home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("snowball")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["snowball", "--snowball-home", "/tmp/snowball"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_add_debt() {
        let args = parse(&[
            "add",
            "debt",
            "--name",
            "Barclaycard",
            "--balance",
            "£1,250.00",
            "--minimum-payment",
            "35",
            "--interest-rate",
            "22.9",
            "--type",
            "credit_card",
        ]);
        let Command::Add(add) = args.command() else {
            panic!("expected add")
        };
        let AddSubcommand::Debt(debt) = add.entity() else {
            panic!("expected debt")
        };
        let new_debt = debt.to_new_debt();
        assert_eq!(new_debt.balance.value(), dec!(1250));
        assert_eq!(new_debt.interest_rate, dec!(22.9));
        assert!(!new_debt.is_ccj);
        assert_eq!(args.common().snowball_home().path(), Path::new("/tmp/snowball"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_income_frequency() {
        let args = parse(&[
            "add", "income", "--name", "Job", "--amount", "400", "--frequency", "4-weekly",
        ]);
        let Command::Add(add) = args.command() else {
            panic!("expected add")
        };
        let AddSubcommand::Income(income) = add.entity() else {
            panic!("expected income")
        };
        assert_eq!(income.to_new_income().frequency, Frequency::FourWeekly);
        assert!(income.to_new_income().is_net);
    }

    #[test]
    fn test_bad_frequency_is_rejected() {
        let result = Args::try_parse_from([
            "snowball", "add", "expense", "--name", "Gym", "--amount", "30", "--frequency",
            "daily",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pay_requires_amount_or_all() {
        assert!(Args::try_parse_from(["snowball", "pay", "--debt", "abc"]).is_err());
        assert!(Args::try_parse_from([
            "snowball", "pay", "--debt", "abc", "--all", "--amount", "5"
        ])
        .is_err());

        let args = parse(&["pay", "--debt", "abc", "--all"]);
        let Command::Pay(pay) = args.command() else {
            panic!("expected pay")
        };
        assert_eq!(pay.amount(), None);

        let args = parse(&["pay", "--debt", "abc", "--amount", "£20"]);
        let Command::Pay(pay) = args.command() else {
            panic!("expected pay")
        };
        assert_eq!(pay.amount(), Some(dec!(20)));
    }

    #[test]
    fn test_fund_needs_amount_or_target() {
        assert!(Args::try_parse_from(["snowball", "fund"]).is_err());

        let args = parse(&["fund", "--target", "£6,000", "--amount", "1500"]);
        let Command::Fund(fund) = args.command() else {
            panic!("expected fund")
        };
        assert_eq!(fund.amount(), Some(dec!(1500)));
        assert_eq!(fund.target(), Some(dec!(6000)));

        let args = parse(&["fund", "--target", "6000"]);
        let Command::Fund(fund) = args.command() else {
            panic!("expected fund")
        };
        assert_eq!(fund.amount(), None);
    }

    #[test]
    fn test_parse_delete() {
        assert!(Args::try_parse_from(["snowball", "delete", "debt"]).is_err());

        let args = parse(&["delete", "income", "--id", "a", "--id", "b"]);
        let Command::Delete(delete) = args.command() else {
            panic!("expected delete")
        };
        let DeleteSubcommand::Income(income) = delete.entity() else {
            panic!("expected income")
        };
        assert_eq!(income.ids(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_plan_extra() {
        let args = parse(&["plan", "--extra", "£150"]);
        let Command::Plan(plan) = args.command() else {
            panic!("expected plan")
        };
        assert_eq!(plan.extra(), Some(dec!(150)));
    }
}
