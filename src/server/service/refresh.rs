//! Country refresh.
//!
//! Pulls both external sources, merges each country with its exchange rate, writes the
//! result into the country table and redraws the summary image.

use chrono::{NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::country::{CountryRepository, CountryUpsert, UpsertOutcome},
    error::Error,
    external::{
        model::{ExchangeRates, ExternalCountry},
        SourceClient,
    },
    service::{
        gdp::{estimate_gdp, resolve_currency, MultiplierSource},
        summary_image::{Summary, SummaryImageRenderer, TopCountry},
    },
    util::time::format_timestamp,
};

/// Number of countries listed on the summary image
pub const TOP_COUNTRIES: u64 = 5;

/// Outcome of a completed refresh
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSummary {
    /// Countries stored after the refresh, including ones the sources no longer list
    pub total: u64,
    pub inserted: u64,
    pub updated: u64,
    pub last_refreshed_at: NaiveDateTime,
}

pub struct RefreshService<'a> {
    db: &'a DatabaseConnection,
    sources: &'a SourceClient,
    summary_image: &'a SummaryImageRenderer,
}

impl<'a> RefreshService<'a> {
    /// Creates a new instance of [`RefreshService`]
    pub fn new(
        db: &'a DatabaseConnection,
        sources: &'a SourceClient,
        summary_image: &'a SummaryImageRenderer,
    ) -> Self {
        Self {
            db,
            sources,
            summary_image,
        }
    }

    /// Refreshes every country from the external sources
    ///
    /// Both sources are fetched before anything is written, so a source failure leaves the
    /// store untouched. Rows are then written one at a time without a surrounding
    /// transaction; a database error stops the refresh and keeps the rows already written.
    ///
    /// # Arguments
    /// - `multipliers` - Source of the GDP multiplier, one draw per country with a usable rate
    ///
    /// # Returns
    /// - `Ok(RefreshSummary)` - Counts and the time the refresh finished
    /// - `Err(Error::ExternalError)` - A source could not be fetched or parsed
    /// - `Err(Error::DbErr)` - A row could not be written or the aggregates not read
    /// - `Err(Error::RenderError)` / `Err(Error::IoError)` - The summary image could not be written
    pub async fn refresh_countries<M: MultiplierSource>(
        &self,
        multipliers: &mut M,
    ) -> Result<RefreshSummary, Error> {
        tracing::info!("Refreshing countries from external sources");

        let countries = self.sources.fetch_countries().await?;
        let rates = self.sources.fetch_exchange_rates().await?;

        tracing::debug!(
            "Fetched {} countries and {} exchange rates",
            countries.len(),
            rates.rates.len()
        );

        let repo = CountryRepository::new(self.db);

        let mut inserted = 0;
        let mut updated = 0;

        for country in countries {
            let upsert = merge_country(country, &rates, multipliers);

            match repo.upsert(upsert).await?.1 {
                UpsertOutcome::Inserted => inserted += 1,
                UpsertOutcome::Updated => updated += 1,
            }
        }

        let total = repo.count().await?;
        let top_countries = repo
            .top_by_gdp(TOP_COUNTRIES)
            .await?
            .into_iter()
            .map(TopCountry::from)
            .collect();

        let last_refreshed_at = Utc::now().naive_utc();

        self.summary_image
            .render(Summary {
                total,
                last_refreshed_at: format_timestamp(last_refreshed_at),
                top_countries,
            })
            .await?;

        tracing::info!(
            "Refreshed countries: {} inserted, {} updated, {} total",
            inserted,
            updated,
            total
        );

        Ok(RefreshSummary {
            total,
            inserted,
            updated,
            last_refreshed_at,
        })
    }
}

/// Combines a source country with its exchange rate into the row to store
pub fn merge_country<M: MultiplierSource>(
    country: ExternalCountry,
    rates: &ExchangeRates,
    multipliers: &mut M,
) -> CountryUpsert {
    let currency = resolve_currency(&country.currencies, rates);
    let estimated_gdp = estimate_gdp(country.population, currency.rate, multipliers);

    CountryUpsert {
        name: country.name,
        capital: country.capital,
        region: country.region,
        population: country.population,
        currency_code: currency.currency_code,
        exchange_rate: currency.exchange_rate,
        estimated_gdp,
        flag_url: country.flag,
    }
}
