use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory along with:
/// - an initial `config.json` holding the default benefit taper policy
/// - an empty `household.json`, unless one already exists
///
/// Running it again is safe; recorded debts, income and expenses are kept.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(snowball_home: &Path) -> Result<Out<()>> {
    let config = Config::create(snowball_home)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the snowball directory at {}",
        config.root().display()
    )
    .into())
}
