//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`JOSHUB_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup; shared as `Arc<AppConfig>` in the context.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use joshub_core::DEFAULT_RECENT_LIMIT;
use joshub_db::DbConfig;

pub const ENV_DB_PATH: &str = "JOSHUB_DB_PATH";
pub const ENV_STORE_NAME: &str = "JOSHUB_STORE_NAME";
pub const ENV_RECENT_LIMIT: &str = "JOSHUB_RECENT_LIMIT";
pub const ENV_MAX_CONNECTIONS: &str = "JOSHUB_MAX_CONNECTIONS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The data directory could not be created.
    #[error("Could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,

    /// Store name (report header)
    pub store_name: String,

    /// Rows in the dashboard's recent sales / orders lists
    pub recent_limit: u32,

    /// Pool size
    pub max_connections: u32,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for AppConfig {
    /// Development defaults: Colombian pesos, Spanish-locale separators.
    fn default() -> Self {
        AppConfig {
            db_path: default_db_path(),
            store_name: "Joshub".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            max_connections: 5,
            currency_code: "COP".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `JOSHUB_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `JOSHUB_DB_PATH`: database file
    /// - `JOSHUB_STORE_NAME`: store name
    /// - `JOSHUB_RECENT_LIMIT`: dashboard list size (≥ 1)
    /// - `JOSHUB_MAX_CONNECTIONS`: pool size (≥ 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable
    /// source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(store_name) = lookup(ENV_STORE_NAME) {
            config.store_name = store_name;
        }

        if let Some(raw) = lookup(ENV_RECENT_LIMIT) {
            config.recent_limit = parse_positive(ENV_RECENT_LIMIT, raw)?;
        }

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            config.max_connections = parse_positive(ENV_MAX_CONNECTIONS, raw)?;
        }

        Ok(config)
    }

    /// Pool configuration for [`joshub_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.max_connections)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use joshub_backoffice::state::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(120_000), "$1.200,00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).unsigned_abs();
        let frac = (cents % divisor).unsigned_abs();

        let mut out = String::new();
        if cents < 0 {
            out.push('-');
        }
        out.push_str(&self.currency_symbol);
        out.push_str(&group_thousands(whole, self.thousands_separator));

        if self.currency_decimals > 0 {
            out.push(self.decimal_separator);
            out.push_str(&format!(
                "{:0width$}",
                frac,
                width = self.currency_decimals as usize
            ));
        }

        out
    }
}

fn parse_positive<T>(key: &str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + From<u8>,
    T::Err: Display,
{
    let parsed = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })?;

    if parsed < T::from(1) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(parsed)
}

fn group_thousands(n: u64, separator: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }

    out
}

/// Platform data directory, or the working directory if none.
///
/// - **Linux**: `~/.local/share/backoffice/joshub.db`
/// - **macOS**: `~/Library/Application Support/co.joshub.backoffice/joshub.db`
fn default_db_path() -> PathBuf {
    ProjectDirs::from("co", "joshub", "backoffice")
        .map(|dirs| dirs.data_dir().join("joshub.db"))
        .unwrap_or_else(|| PathBuf::from("joshub.db"))
}
