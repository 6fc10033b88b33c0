use atlas_test_utils::prelude::*;

use crate::server::data::country::{CountryFilter, CountryRepository, CountryUpsert, UpsertOutcome};

mod top_by_gdp;

/// Refresh payload with every optional attribute populated
fn country_upsert(name: &str) -> CountryUpsert {
    CountryUpsert {
        name: name.to_string(),
        capital: Some("Paris".to_string()),
        region: Some("Europe".to_string()),
        population: 67_391_582,
        currency_code: Some("EUR".to_string()),
        exchange_rate: Some(0.92),
        estimated_gdp: Some(109_876_543.21),
        flag_url: Some("https://flagcdn.com/fr.svg".to_string()),
    }
}
