//! Configuration file handling for the snowball CLI.
//!
//! The configuration file is stored at `$SNOWBALL_HOME/config.json`. It holds the benefit taper
//! policy and the starter emergency fund target so those can change without touching the
//! calculation engine. The household's records live next to it in `household.json`.

use crate::model::{BabyStepsProgress, Household, TaperPolicy};
use crate::{utils, Result};
use anyhow::{bail, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "snowball";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const HOUSEHOLD_JSON: &str = "household.json";

/// £404 a month.
const WORK_ALLOWANCE: Decimal = Decimal::from_parts(404, 0, 0, false, 0);
/// 55p in the pound.
const TAPER_RATE: Decimal = Decimal::from_parts(55, 0, 0, false, 2);
const EMERGENCY_FUND_TARGET: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SNOWBALL_HOME` and from there it loads `$SNOWBALL_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    household_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory along with a default `config.json` and an empty
    /// `household.json`. Either file is left alone if it already exists.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the snowball home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            debug!("Keeping the existing config file {}", config_path.display());
            ConfigFile::load(&config_path).await?
        } else {
            let config_file = ConfigFile::default();
            config_file.save(&config_path).await?;
            config_file
        };

        let config = Self {
            household_path: root.join(HOUSEHOLD_JSON),
            root,
            config_path,
            config_file,
        };

        if config.household_path.is_file() {
            debug!(
                "Keeping the existing household file {}",
                config.household_path.display()
            );
        } else {
            let household =
                Household::new(BabyStepsProgress::new(config.emergency_fund_target()));
            config.save_household(&household).await?;
        }
        Ok(config)
    }

    /// This will
    /// - validate that `snowball_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub async fn load(snowball_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = snowball_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The snowball home directory is missing, run 'snowball init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            household_path: root.join(HOUSEHOLD_JSON),
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn household_path(&self) -> &Path {
        &self.household_path
    }

    /// The taper policy applied to new Universal Credit settings.
    pub fn taper_policy(&self) -> TaperPolicy {
        TaperPolicy {
            work_allowance: self.config_file.work_allowance,
            taper_rate: self.config_file.taper_rate,
        }
    }

    pub fn emergency_fund_target(&self) -> Decimal {
        self.config_file.emergency_fund_target
    }

    /// Loads and validates `household.json`.
    pub async fn load_household(&self) -> Result<Household> {
        let household: Household = utils::deserialize(&self.household_path).await?;
        household.validate().with_context(|| {
            format!(
                "The household file contains invalid records '{}'",
                self.household_path.display()
            )
        })?;
        Ok(household)
    }

    pub async fn save_household(&self, household: &Household) -> Result<()> {
        let data =
            serde_json::to_string_pretty(household).context("Unable to serialize household")?;
        utils::write(&self.household_path, data)
            .await
            .context("Unable to write household file")
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "snowball",
///   "config_version": 1,
///   "work_allowance": "404",
///   "taper_rate": "0.55",
///   "emergency_fund_target": "1000"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "snowball"
    app_name: String,

    config_version: u8,

    /// Monthly earned income ignored by the Universal Credit taper
    #[serde(default = "default_work_allowance")]
    work_allowance: Decimal,

    /// Fraction of earnings above the work allowance deducted from Universal Credit
    #[serde(default = "default_taper_rate")]
    taper_rate: Decimal,

    /// Baby step 1 target
    #[serde(default = "default_emergency_fund_target")]
    emergency_fund_target: Decimal,
}

fn default_work_allowance() -> Decimal {
    WORK_ALLOWANCE
}

fn default_taper_rate() -> Decimal {
    TAPER_RATE
}

fn default_emergency_fund_target() -> Decimal {
    EMERGENCY_FUND_TARGET
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            work_allowance: WORK_ALLOWANCE,
            taper_rate: TAPER_RATE,
            emergency_fund_target: EMERGENCY_FUND_TARGET,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds an invalid policy
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        TaperPolicy {
            work_allowance: config.work_allowance,
            taper_rate: config.taper_rate,
        }
        .validate()
        .with_context(|| format!("Invalid taper policy in {}", path.display()))?;

        Ok(config)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("snowball_home");

        let created = Config::create(&home).await.unwrap();
        assert!(created.config_path().is_file());
        assert!(created.household_path().is_file());

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.root(), created.root());
        assert_eq!(
            loaded.taper_policy(),
            TaperPolicy {
                work_allowance: dec!(404),
                taper_rate: dec!(0.55),
            }
        );
        assert_eq!(loaded.emergency_fund_target(), dec!(1000));

        let household = loaded.load_household().await.unwrap();
        assert!(household.debts().is_empty());
        assert_eq!(household.baby_steps().step1_target(), dec!(1000));
    }

    #[tokio::test]
    async fn test_create_keeps_existing_household() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        let mut household = config.load_household().await.unwrap();
        household.update_emergency_fund(dec!(250)).unwrap();
        config.save_household(&household).await.unwrap();

        let again = Config::create(dir.path()).await.unwrap();
        let reloaded = again.load_household().await.unwrap();
        assert_eq!(reloaded.baby_steps().emergency_fund_balance(), dec!(250));
    }

    #[tokio::test]
    async fn test_create_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        let custom = ConfigFile {
            taper_rate: dec!(0.63),
            ..ConfigFile::default()
        };
        custom.save(config.config_path()).await.unwrap();

        let again = Config::create(dir.path()).await.unwrap();
        assert_eq!(again.taper_policy().taper_rate, dec!(0.63));
    }

    #[tokio::test]
    async fn test_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_file_minimal_uses_policy_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        utils::write(&path, r#"{ "app_name": "snowball", "config_version": 1 }"#)
            .await
            .unwrap();
        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_custom_policy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "snowball",
            "config_version": 1,
            "work_allowance": "673",
            "taper_rate": 0.5
        }"#;
        utils::write(&path, json).await.unwrap();
        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config.work_allowance, dec!(673));
        assert_eq!(config.taper_rate, dec!(0.5));
    }

    #[tokio::test]
    async fn test_config_file_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        utils::write(&path, r#"{ "app_name": "ledger", "config_version": 1 }"#)
            .await
            .unwrap();
        let result = ConfigFile::load(&path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_invalid_taper_rate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let json = r#"{ "app_name": "snowball", "config_version": 1, "taper_rate": "1.2" }"#;
        utils::write(&path, json).await.unwrap();
        assert!(ConfigFile::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let original = ConfigFile {
            emergency_fund_target: dec!(1500),
            ..ConfigFile::default()
        };
        original.save(&path).await.unwrap();
        assert_eq!(ConfigFile::load(&path).await.unwrap(), original);
    }
}
