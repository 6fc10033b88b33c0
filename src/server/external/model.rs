use std::collections::HashMap;

use serde::Deserialize;

/// A country as returned by the country source
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExternalCountry {
    pub name: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub population: i64,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub currencies: Vec<ExternalCurrency>,
}

/// A currency entry of [`ExternalCountry`]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExternalCurrency {
    #[serde(default)]
    pub code: Option<String>,
}

/// Body of the exchange-rate source
///
/// Rates are units of the currency per USD. A code may be listed with a `null` rate.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExchangeRates {
    pub rates: HashMap<String, Option<f64>>,
}
