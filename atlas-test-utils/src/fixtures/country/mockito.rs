//! Mock HTTP endpoints for the external data sources.

use mockito::Mock;
use serde_json::Value;

use crate::{
    constant::{COUNTRIES_PATH, EXCHANGE_RATES_PATH},
    fixtures::country::CountryFixtures,
};

impl<'a> CountryFixtures<'a> {
    /// Create a mock HTTP endpoint for the country list.
    ///
    /// Sets up a mock GET endpoint at [`COUNTRIES_PATH`] returning `countries` as a JSON
    /// array. The mock verifies it was called exactly `expected_requests` times.
    pub fn create_countries_endpoint(
        &mut self,
        countries: Vec<Value>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", COUNTRIES_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(countries).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint for the exchange-rate mapping.
    ///
    /// `body` is served verbatim, usually built with
    /// [`exchange_rates`](crate::fixtures::country::factory::exchange_rates).
    pub fn create_exchange_rates_endpoint(&mut self, body: Value, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("GET", EXCHANGE_RATES_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint at `path` that always answers with `status` and an error body.
    pub fn create_failing_endpoint(
        &mut self,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"upstream failure"}"#)
            .expect(expected_requests)
            .create()
    }
}
