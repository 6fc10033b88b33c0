use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::{
    model::country::{CountrySort, ListCountriesQuery},
    server::{
        data::country::{CountryFilter, CountryRepository},
        error::{country::CountryError, Error},
        model::db::CountryModel,
    },
};

/// Aggregate state of the country store
#[derive(Debug, Clone, PartialEq)]
pub struct CountryStatus {
    pub total_countries: u64,
    /// Most recent write to any country, `None` when the store is empty
    pub last_refreshed_at: Option<NaiveDateTime>,
}

pub struct CountryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CountryService<'a> {
    /// Creates a new instance of [`CountryService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists countries matching the query filters
    ///
    /// An unknown `sort` value is ignored and rows are returned in insertion order.
    pub async fn list(&self, query: ListCountriesQuery) -> Result<Vec<CountryModel>, Error> {
        let sort = query.sort.as_deref().and_then(CountrySort::parse);
        let filter = CountryFilter {
            region: query.region,
            currency_code: query.currency,
        };

        let countries = CountryRepository::new(self.db).list(&filter, sort).await?;

        Ok(countries)
    }

    /// Get a country by name, ignoring case
    ///
    /// # Returns
    /// - `Ok(CountryModel)` - The stored country
    /// - `Err(Error::CountryError)` - No country has that name
    /// - `Err(Error::DbErr)` - Query failed
    pub async fn get(&self, name: &str) -> Result<CountryModel, Error> {
        CountryRepository::new(self.db)
            .find_by_name(name)
            .await?
            .ok_or_else(|| CountryError::NotFound(name.to_string()).into())
    }

    /// Deletes a country by name, ignoring case
    ///
    /// # Returns
    /// - `Ok(())` - At least one row was deleted
    /// - `Err(Error::CountryError)` - No country has that name
    /// - `Err(Error::DbErr)` - Query failed
    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        let result = CountryRepository::new(self.db).delete_by_name(name).await?;

        if result.rows_affected == 0 {
            return Err(CountryError::NotFound(name.to_string()).into());
        }

        tracing::info!("Deleted country {:?}", name);

        Ok(())
    }

    /// Row count and latest refresh time
    pub async fn status(&self) -> Result<CountryStatus, Error> {
        let repo = CountryRepository::new(self.db);

        Ok(CountryStatus {
            total_countries: repo.count().await?,
            last_refreshed_at: repo.latest_refresh().await?,
        })
    }
}
