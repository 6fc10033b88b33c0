//! Payload factories for the external data sources.
//!
//! These build JSON bodies shaped like the RestCountries v2 and open.er-api v6
//! responses so tests can serve them from the mock server.

use serde_json::{json, Map, Value};

/// A country record as returned by the country source, with one entry per currency code.
pub fn external_country(name: &str, population: i64, currency_codes: &[&str]) -> Value {
    let currencies: Vec<Value> = currency_codes
        .iter()
        .map(|code| json!({ "code": code, "name": format!("{} currency", code), "symbol": "$" }))
        .collect();

    json!({
        "name": name,
        "capital": format!("{} City", name),
        "region": "Africa",
        "population": population,
        "flag": format!("https://flagcdn.com/{}.svg", name.to_lowercase()),
        "currencies": currencies,
        "independent": false
    })
}

/// A country record in a specific region.
pub fn external_country_in_region(
    name: &str,
    region: &str,
    population: i64,
    currency_codes: &[&str],
) -> Value {
    let mut country = external_country(name, population, currency_codes);
    country["region"] = Value::String(region.to_string());
    country
}

/// A country record without a `currencies` field at all.
pub fn external_country_without_currencies(name: &str, population: i64) -> Value {
    json!({
        "name": name,
        "capital": null,
        "region": "Antarctic",
        "population": population,
        "flag": null
    })
}

/// An exchange-rate response body with the given `code -> rate` entries.
pub fn exchange_rates(rates: &[(&str, f64)]) -> Value {
    let mut map = Map::new();
    for (code, rate) in rates {
        map.insert(code.to_string(), json!(rate));
    }

    json!({
        "result": "success",
        "base_code": "USD",
        "time_last_update_unix": 1760918551,
        "rates": map
    })
}
