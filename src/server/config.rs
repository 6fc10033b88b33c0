use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::server::error::config::ConfigError;

pub static DEFAULT_COUNTRIES_API_URL: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";
pub static DEFAULT_EXCHANGE_RATES_API_URL: &str = "https://open.er-api.com/v6/latest/USD";
pub static DEFAULT_SUMMARY_IMAGE_PATH: &str = "cache/summary.png";

/// Process configuration read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub port: u16,
    pub countries_api_url: String,
    pub exchange_rates_api_url: String,
    pub summary_image_path: PathBuf,
    pub summary_font_path: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which returns `None` for unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required =
            |var: &str| lookup(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()));

        let parse_port = |var: &str| -> Result<u16, ConfigError> {
            required(var)?
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
        };

        Ok(Self {
            db_host: required("DB_HOST")?,
            db_port: parse_port("DB_PORT")?,
            db_user: required("DB_USER")?,
            db_password: required("DB_PASS")?,
            db_name: required("DB_NAME")?,
            port: parse_port("PORT")?,
            countries_api_url: lookup("COUNTRIES_API_URL")
                .unwrap_or_else(|| DEFAULT_COUNTRIES_API_URL.to_string()),
            exchange_rates_api_url: lookup("EXCHANGE_RATES_API_URL")
                .unwrap_or_else(|| DEFAULT_EXCHANGE_RATES_API_URL.to_string()),
            summary_image_path: lookup("SUMMARY_IMAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_IMAGE_PATH)),
            summary_font_path: lookup("SUMMARY_FONT_PATH").map(PathBuf::from),
        })
    }

    /// Postgres connection URL assembled from the `DB_*` settings
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            utf8_percent_encode(&self.db_user, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.db_password, NON_ALPHANUMERIC),
            self.db_host,
            self.db_port,
            self.db_name
        )
    }
}
