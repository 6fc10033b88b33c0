use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A country as stored after the latest refresh
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CountryDto {
    pub id: i32,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    /// First currency code listed for the country, if any
    pub currency_code: Option<String>,
    /// Units of `currency_code` per USD
    pub exchange_rate: Option<f64>,
    /// Synthetic GDP estimate; `0` without a currency, `null` when the currency has no rate
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
}

impl From<entity::country::Model> for CountryDto {
    fn from(model: entity::country::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            capital: model.capital,
            region: model.region,
            population: model.population,
            currency_code: model.currency_code,
            exchange_rate: model.exchange_rate,
            estimated_gdp: model.estimated_gdp,
            flag_url: model.flag_url,
            last_refreshed_at: model.last_refreshed_at,
        }
    }
}

/// Query parameters accepted by `GET /countries`
#[derive(Deserialize, Debug, Default, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCountriesQuery {
    /// Only return countries in this region (exact match)
    pub region: Option<String>,
    /// Only return countries using this currency code (exact match)
    pub currency: Option<String>,
    /// One of `gdp_desc`, `gdp_asc`, `population_desc`, `population_asc`, `name_asc`,
    /// `name_desc`; anything else keeps insertion order
    pub sort: Option<String>,
}

/// Orderings supported when listing countries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySort {
    GdpDesc,
    GdpAsc,
    PopulationDesc,
    PopulationAsc,
    NameAsc,
    NameDesc,
}

impl CountrySort {
    /// Parses a `sort` query value, returning `None` for unknown keys
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gdp_desc" => Some(Self::GdpDesc),
            "gdp_asc" => Some(Self::GdpAsc),
            "population_desc" => Some(Self::PopulationDesc),
            "population_asc" => Some(Self::PopulationAsc),
            "name_asc" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            _ => None,
        }
    }
}

/// Response of `POST /countries/refresh`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RefreshDto {
    pub message: String,
    /// Number of countries stored after the refresh
    pub total: u64,
    /// Countries created by this refresh
    pub inserted: u64,
    /// Existing countries updated by this refresh
    pub updated: u64,
    /// UTC time the refresh finished, `%Y-%m-%d %H:%M:%S`
    pub last_refreshed_at: String,
}

/// Response of `GET /status`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StatusDto {
    pub total_countries: u64,
    /// Most recent row refresh time, `%Y-%m-%d %H:%M:%S`, or `null` when no countries are stored
    pub last_refreshed_at: Option<String>,
}

/// Response of `GET /`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ServiceInfoDto {
    pub message: String,
    pub version: String,
    /// Endpoint name to `METHOD path`
    pub endpoints: BTreeMap<String, String>,
}
