//! Clients for the two external data sources.
//!
//! The country source returns the list of countries with their currencies, the
//! exchange-rate source returns USD-relative rates keyed by currency code. Both are plain
//! JSON over HTTPS fetched with a shared `reqwest` client using a fixed timeout.

pub mod model;

use std::time::Duration;

use crate::server::{
    config::Config,
    error::{external::ExternalError, Error},
    external::model::{ExchangeRates, ExternalCountry},
};

/// Timeout applied to every outbound request
pub const SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

static USER_AGENT: &str = concat!("currency-atlas/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the country and exchange-rate sources
#[derive(Clone, Debug)]
pub struct SourceClient {
    http: reqwest::Client,
    countries_url: String,
    exchange_rates_url: String,
}

impl SourceClient {
    /// Builds a client for the given source URLs
    ///
    /// # Returns
    /// - `Ok(SourceClient)` - Client ready for use
    /// - `Err(Error::HttpClientError)` - The TLS backend could not be initialised
    pub fn new(
        countries_url: impl Into<String>,
        exchange_rates_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(SOURCE_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            countries_url: countries_url.into(),
            exchange_rates_url: exchange_rates_url.into(),
        })
    }

    /// Builds a client from the configured source URLs
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(&config.countries_api_url, &config.exchange_rates_api_url)
    }

    /// Fetches every country with its currencies, in source order
    pub async fn fetch_countries(&self) -> Result<Vec<ExternalCountry>, ExternalError> {
        self.get_json(&self.countries_url)
            .await
            .map_err(ExternalError::CountriesUnavailable)
    }

    /// Fetches the USD exchange-rate mapping
    pub async fn fetch_exchange_rates(&self) -> Result<ExchangeRates, ExternalError> {
        self.get_json(&self.exchange_rates_url)
            .await
            .map_err(ExternalError::ExchangeRatesUnavailable)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, reqwest::Error> {
        self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}
