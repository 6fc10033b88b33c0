use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::{NullOrdering, Order},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::country::CountrySort;

/// Case-folded form of a country name used as its identity
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Attributes written for a country on refresh
#[derive(Debug, Clone, PartialEq)]
pub struct CountryUpsert {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
}

/// Whether an upsert created a new row or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Optional equality filters for listing countries, combined with AND
#[derive(Debug, Clone, Default)]
pub struct CountryFilter {
    pub region: Option<String>,
    pub currency_code: Option<String>,
}

pub struct CountryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CountryRepository<'a, C> {
    /// Creates a new instance of [`CountryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get a country by name, ignoring case
    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::country::Model>, DbErr> {
        entity::prelude::Country::find()
            .filter(entity::country::Column::NameKey.eq(name_key(name)))
            .one(self.db)
            .await
    }

    /// Updates the country matching `country.name` case-insensitively, or inserts it
    ///
    /// All mutable columns are overwritten on update and `last_refreshed_at` is set to now
    /// either way. The stored display name of an existing row is kept.
    pub async fn upsert(
        &self,
        country: CountryUpsert,
    ) -> Result<(entity::country::Model, UpsertOutcome), DbErr> {
        let now = Utc::now().naive_utc();

        if let Some(existing) = self.find_by_name(&country.name).await? {
            let mut country_am = existing.into_active_model();
            country_am.capital = ActiveValue::Set(country.capital);
            country_am.region = ActiveValue::Set(country.region);
            country_am.population = ActiveValue::Set(country.population);
            country_am.currency_code = ActiveValue::Set(country.currency_code);
            country_am.exchange_rate = ActiveValue::Set(country.exchange_rate);
            country_am.estimated_gdp = ActiveValue::Set(country.estimated_gdp);
            country_am.flag_url = ActiveValue::Set(country.flag_url);
            country_am.last_refreshed_at = ActiveValue::Set(now);

            let updated = country_am.update(self.db).await?;

            return Ok((updated, UpsertOutcome::Updated));
        }

        let country_am = entity::country::ActiveModel {
            name_key: ActiveValue::Set(name_key(&country.name)),
            name: ActiveValue::Set(country.name),
            capital: ActiveValue::Set(country.capital),
            region: ActiveValue::Set(country.region),
            population: ActiveValue::Set(country.population),
            currency_code: ActiveValue::Set(country.currency_code),
            exchange_rate: ActiveValue::Set(country.exchange_rate),
            estimated_gdp: ActiveValue::Set(country.estimated_gdp),
            flag_url: ActiveValue::Set(country.flag_url),
            last_refreshed_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let inserted = country_am.insert(self.db).await?;

        Ok((inserted, UpsertOutcome::Inserted))
    }

    /// Lists countries matching `filter`
    ///
    /// GDP orderings place countries without an estimate last. Without a sort the rows come
    /// back in insertion order.
    pub async fn list(
        &self,
        filter: &CountryFilter,
        sort: Option<CountrySort>,
    ) -> Result<Vec<entity::country::Model>, DbErr> {
        use entity::country::Column;

        let mut query = entity::prelude::Country::find();

        if let Some(region) = &filter.region {
            query = query.filter(Column::Region.eq(region.as_str()));
        }
        if let Some(currency_code) = &filter.currency_code {
            query = query.filter(Column::CurrencyCode.eq(currency_code.as_str()));
        }

        query = match sort {
            Some(CountrySort::GdpDesc) => {
                query.order_by_with_nulls(Column::EstimatedGdp, Order::Desc, NullOrdering::Last)
            }
            Some(CountrySort::GdpAsc) => {
                query.order_by_with_nulls(Column::EstimatedGdp, Order::Asc, NullOrdering::Last)
            }
            Some(CountrySort::PopulationDesc) => query.order_by_desc(Column::Population),
            Some(CountrySort::PopulationAsc) => query.order_by_asc(Column::Population),
            Some(CountrySort::NameAsc) => query.order_by_asc(Column::Name),
            Some(CountrySort::NameDesc) => query.order_by_desc(Column::Name),
            None => query,
        };

        query.order_by_asc(Column::Id).all(self.db).await
    }

    /// Countries with the highest estimated GDP, countries without an estimate last
    pub async fn top_by_gdp(&self, limit: u64) -> Result<Vec<entity::country::Model>, DbErr> {
        use entity::country::Column;

        entity::prelude::Country::find()
            .order_by_with_nulls(Column::EstimatedGdp, Order::Desc, NullOrdering::Last)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Total number of stored countries
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Country::find().count(self.db).await
    }

    /// Most recent `last_refreshed_at` across all countries, `None` when empty
    pub async fn latest_refresh(&self) -> Result<Option<NaiveDateTime>, DbErr> {
        let latest = entity::prelude::Country::find()
            .order_by_desc(entity::country::Column::LastRefreshedAt)
            .one(self.db)
            .await?;

        Ok(latest.map(|country| country.last_refreshed_at))
    }

    /// Deletes every country matching `name` case-insensitively
    ///
    /// Returns OK regardless of a match, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete_by_name(&self, name: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::Country::delete_many()
            .filter(entity::country::Column::NameKey.eq(name_key(name)))
            .exec(self.db)
            .await
    }
}
