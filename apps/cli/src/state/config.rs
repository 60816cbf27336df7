//! # Configuration
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`stockroom.toml` in the platform config dir, or `--config`)
//! 3. Environment variables (`STOCKROOM_*`)
//!
//! ```toml
//! # stockroom.toml
//! database_path = "/var/lib/stockroom/stockroom.db"
//! currency_symbol = "₹"
//! report_currency = "Rs "
//! rows_per_page = 40
//!
//! [admin]
//! username = "admin"
//! password_hash = "$argon2id$v=19$m=19456,t=2,p=1$..."
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use stockroom_core::store::{Argon2Credentials, CredentialVerifier, StaticCredentials};

/// Username and password used when nothing is configured.
const DEV_USERNAME: &str = "admin";
const DEV_PASSWORD: &str = "admin";

/// Configuration load and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No database path configured and no data directory available")]
    NoDatabasePath,
}

/// Who may log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,

    /// Argon2 PHC string. Takes precedence over `password`.
    pub password_hash: Option<String>,

    /// Plain-text password (development only).
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            username: DEV_USERNAME.to_string(),
            password_hash: None,
            password: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockroomConfig {
    /// SQLite file. `None` means `<data dir>/stockroom.db`.
    pub database_path: Option<PathBuf>,

    /// Prefix for prices on screen.
    pub currency_symbol: String,

    /// Prefix for prices in report documents.
    pub report_currency: String,

    /// Table rows per report page.
    pub rows_per_page: usize,

    pub admin: AdminConfig,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        StockroomConfig {
            database_path: None,
            currency_symbol: "₹".to_string(),
            report_currency: "Rs ".to_string(),
            rows_per_page: 40,
            admin: AdminConfig::default(),
        }
    }
}

impl StockroomConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the default location is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match crate::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `STOCKROOM_*` overrides read through `var`.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("STOCKROOM_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(username) = var("STOCKROOM_ADMIN_USER") {
            self.admin.username = username;
        }

        if let Some(hash) = var("STOCKROOM_ADMIN_PASSWORD_HASH") {
            self.admin.password_hash = Some(hash);
        }

        if let Some(password) = var("STOCKROOM_ADMIN_PASSWORD") {
            self.admin.password = Some(password);
        }

        if let Some(symbol) = var("STOCKROOM_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(prefix) = var("STOCKROOM_REPORT_CURRENCY") {
            self.report_currency = prefix;
        }

        if let Some(rows) = var("STOCKROOM_ROWS_PER_PAGE") {
            match rows.parse() {
                Ok(n) => self.rows_per_page = n,
                Err(_) => warn!(value = %rows, "Ignoring non-numeric STOCKROOM_ROWS_PER_PAGE"),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.username.trim().is_empty() {
            return Err(ConfigError::Invalid("admin username must not be empty".into()));
        }

        if self.rows_per_page == 0 {
            return Err(ConfigError::Invalid(
                "rows_per_page must be greater than 0".into(),
            ));
        }

        if let Some(hash) = &self.admin.password_hash {
            Argon2Credentials::new(self.admin.username.clone(), hash.clone())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        Ok(())
    }

    /// Resolved database file location.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        self.database_path
            .clone()
            .or_else(crate::default_database_path)
            .ok_or(ConfigError::NoDatabasePath)
    }

    /// Builds the verifier the auth store checks logins against.
    ///
    /// Hash beats plain password; with neither set the development
    /// default (`admin` / `admin`) applies.
    pub fn credential_verifier(&self) -> Result<Box<dyn CredentialVerifier>, ConfigError> {
        let admin = &self.admin;

        if let Some(hash) = &admin.password_hash {
            let creds = Argon2Credentials::new(admin.username.clone(), hash.clone())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            return Ok(Box::new(creds));
        }

        if let Some(password) = &admin.password {
            return Ok(Box::new(StaticCredentials::new(
                admin.username.clone(),
                password.clone(),
            )));
        }

        warn!("No admin password configured; using development default credentials");
        Ok(Box::new(StaticCredentials::new(
            admin.username.clone(),
            DEV_PASSWORD,
        )))
    }
}
