use clap::Parser;
use debt_snowball::args::{AddSubcommand, Args, Command, DeleteSubcommand};
use debt_snowball::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().snowball_home().path();

    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Summary => commands::summary(Config::load(home).await?).await?.print(),

        Command::Plan(plan_args) => commands::plan(Config::load(home).await?, plan_args.clone())
            .await?
            .print(),

        Command::Project(plan_args) => {
            commands::project(Config::load(home).await?, plan_args.clone())
                .await?
                .print()
        }

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            match add_args.entity() {
                AddSubcommand::Debt(args) => {
                    commands::add_debt(config, *args.clone()).await?.print()
                }
                AddSubcommand::Income(args) => {
                    commands::add_income(config, args.clone()).await?.print()
                }
                AddSubcommand::Expense(args) => {
                    commands::add_expense(config, args.clone()).await?.print()
                }
            }
        }

        Command::Pay(pay_args) => commands::pay(Config::load(home).await?, pay_args.clone())
            .await?
            .print(),

        Command::Benefit(benefit_args) => {
            commands::benefit(Config::load(home).await?, benefit_args.clone())
                .await?
                .print()
        }

        Command::Fund(fund_args) => commands::fund(Config::load(home).await?, fund_args.clone())
            .await?
            .print(),

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            match delete_args.entity() {
                DeleteSubcommand::Debt(args) => {
                    commands::delete_debts(config, args.clone()).await?.print()
                }
                DeleteSubcommand::Income(args) => {
                    commands::delete_incomes(config, args.clone()).await?.print()
                }
                DeleteSubcommand::Expense(args) => {
                    commands::delete_expenses(config, args.clone()).await?.print()
                }
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG wins when set.
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            "debt_snowball",
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
