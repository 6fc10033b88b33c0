//! Database fixtures for the `country` table.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{error::TestError, fixtures::country::CountryFixtures};

/// Attributes for a country row inserted directly into the database.
#[derive(Clone, Debug, Default)]
pub struct MockCountry {
    pub name: String,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
}

impl MockCountry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: 1_000_000,
            ..Default::default()
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn population(mut self, population: i64) -> Self {
        self.population = population;
        self
    }

    pub fn currency(mut self, code: impl Into<String>, exchange_rate: Option<f64>) -> Self {
        self.currency_code = Some(code.into());
        self.exchange_rate = exchange_rate;
        self
    }

    pub fn gdp(mut self, estimated_gdp: Option<f64>) -> Self {
        self.estimated_gdp = estimated_gdp;
        self
    }
}

impl<'a> CountryFixtures<'a> {
    /// Insert a country row without going through the refresh flow.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted row
    /// - `Err(TestError::DbErr)` - Insert failed, e.g. table missing or duplicate name
    pub async fn insert_mock_country(
        &mut self,
        country: MockCountry,
    ) -> Result<entity::country::Model, TestError> {
        let model = entity::country::ActiveModel {
            name_key: ActiveValue::Set(country.name.to_lowercase()),
            name: ActiveValue::Set(country.name),
            capital: ActiveValue::Set(None),
            region: ActiveValue::Set(country.region),
            population: ActiveValue::Set(country.population),
            currency_code: ActiveValue::Set(country.currency_code),
            exchange_rate: ActiveValue::Set(country.exchange_rate),
            estimated_gdp: ActiveValue::Set(country.estimated_gdp),
            flag_url: ActiveValue::Set(None),
            last_refreshed_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(model)
    }
}
