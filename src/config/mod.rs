//! Configuration for module-catalogue
//!
//! Settings that used to be fixed constants (spreadsheet and template ids,
//! file names, link targets) live in one [`Config`] value that is loaded at
//! startup and handed to the row source, the authenticator and the publisher.
//!
//! Resolution order:
//! - explicit `--config <path>` (must exist)
//! - `./module-catalogue.toml`
//! - `<config dir>/module-catalogue/config.toml`
//! - built-in defaults
//!
//! Environment variables (optionally from a `.env` file) override the
//! spreadsheet id and database path afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = "module-catalogue.toml";
pub const ENV_SPREADSHEET_ID: &str = "MODULE_CATALOGUE_SPREADSHEET_ID";
pub const ENV_DATABASE: &str = "MODULE_CATALOGUE_DATABASE";

pub const DEFAULT_TEMPLATE_SHEET_ID: i64 = 1822551224;
pub const DEFAULT_MODULE_BASE_URL: &str =
    "https://moseskonto.tu-berlin.de/moses/modultransfersystem/bolognamodule/beschreibung/anzeigen.html";
pub const DEFAULT_PROGRAM_BASE_URL: &str =
    "https://moseskonto.tu-berlin.de/moses/modultransfersystem/studiengaenge/anzeigenKombiniert.html";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target spreadsheet (a copy of the template spreadsheet)
    pub spreadsheet_id: String,
    /// Sheet duplicated for every program; sheet ids survive copying the spreadsheet
    pub template_sheet_id: i64,
    pub database_path: PathBuf,
    /// OAuth client secret downloaded from the Google Cloud console
    pub credentials_path: PathBuf,
    pub token_cache_path: PathBuf,
    pub title_cell: String,
    pub catalogue_cell: String,
    pub module_base_url: String,
    pub program_base_url: String,
    pub sheets_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            template_sheet_id: DEFAULT_TEMPLATE_SHEET_ID,
            database_path: PathBuf::from("mts.sqlite"),
            credentials_path: PathBuf::from("credentials.json"),
            token_cache_path: PathBuf::from("token.json"),
            title_cell: "K2".to_string(),
            catalogue_cell: "I4".to_string(),
            module_base_url: DEFAULT_MODULE_BASE_URL.to_string(),
            program_base_url: DEFAULT_PROGRAM_BASE_URL.to_string(),
            sheets_base_url: crate::api::constants::SHEETS_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Path of the per-user config file
    pub fn user_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("module-catalogue").join("config.toml"))
    }

    /// Load configuration, then apply environment overrides
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit)? {
            Some(path) => {
                log::debug!("Loading config from: {:?}", path);
                Self::from_file(&path).await?
            }
            None => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        dotenvy::dotenv().ok();
        config.apply_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }

        match Self::user_config_path() {
            Ok(path) if path.exists() => Ok(Some(path)),
            _ => Ok(None),
        }
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(ENV_SPREADSHEET_ID).filter(|v| !v.is_empty()) {
            log::debug!("Spreadsheet id overridden by {}", ENV_SPREADSHEET_ID);
            self.spreadsheet_id = id;
        }
        if let Some(path) = lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            log::debug!("Database path overridden by {}", ENV_DATABASE);
            self.database_path = PathBuf::from(path);
        }
    }

    /// Check the settings publishing needs beyond the defaults
    pub fn validate_for_publish(&self) -> Result<()> {
        if self.spreadsheet_id.trim().is_empty() {
            anyhow::bail!(
                "No spreadsheet id configured. Set `spreadsheet_id` in {} or {}",
                LOCAL_CONFIG_FILE,
                ENV_SPREADSHEET_ID
            );
        }
        if self.title_cell.is_empty() || self.catalogue_cell.is_empty() {
            anyhow::bail!("Title and catalogue cells must not be empty");
        }
        Ok(())
    }
}
