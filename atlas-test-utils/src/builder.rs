//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, fixtures::country::data::MockCountry, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// country rows, and mock HTTP endpoints for the external data sources. Methods can be
/// chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_country_table: bool,

    // Database fixtures to insert
    countries: Vec<MockCountry>,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    countries_endpoints: Vec<(Vec<Value>, usize)>, // (countries, expected_requests)
    exchange_rate_endpoints: Vec<(Value, usize)>,
    failing_endpoints: Vec<(&'static str, usize, usize)>, // (path, status, expected_requests)
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_country_table: false,
            countries: Vec::new(),
            mock_builders: Vec::new(),
            countries_endpoints: Vec::new(),
            exchange_rate_endpoints: Vec::new(),
            failing_endpoints: Vec::new(),
        }
    }

    /// Add the `country` table to the test database.
    pub fn with_country_table(mut self) -> Self {
        self.include_country_table = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a country row into the database during `build()`.
    ///
    /// This only creates the database record and does not set up any mock HTTP endpoints.
    pub fn with_mock_country(mut self, country: MockCountry) -> Self {
        self.countries.push(country);
        self
    }

    /// Add a mock country source endpoint to the test server.
    ///
    /// # Arguments
    /// - `countries` - Country records to return, see [`factory`](crate::fixtures::country::factory)
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_countries_endpoint(mut self, countries: Vec<Value>, expected_requests: usize) -> Self {
        self.countries_endpoints.push((countries, expected_requests));
        self
    }

    /// Add a mock exchange-rate source endpoint to the test server.
    ///
    /// # Arguments
    /// - `body` - Response body, usually from [`factory::exchange_rates`](crate::fixtures::country::factory::exchange_rates)
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_exchange_rates_endpoint(mut self, body: Value, expected_requests: usize) -> Self {
        self.exchange_rate_endpoints.push((body, expected_requests));
        self
    }

    /// Add a mock endpoint that always fails with `status`.
    ///
    /// # Arguments
    /// - `path` - Usually [`COUNTRIES_PATH`](crate::constant::COUNTRIES_PATH) or
    ///   [`EXCHANGE_RATES_PATH`](crate::constant::EXCHANGE_RATES_PATH)
    /// - `status` - HTTP status code to respond with
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_failing_endpoint(
        mut self,
        path: &'static str,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.failing_endpoints.push((path, status, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// Use this for failure responses or payloads not covered by the helpers.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test setup by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables
    /// 2. Inserts country rows
    /// 3. Creates mock HTTP endpoints (custom endpoints first)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    /// - `Err(TestError::IoError)` - Temporary image directory could not be created
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_country_table {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.push(schema.create_table_from_entity(entity::prelude::Country));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for country in self.countries {
            setup.country().insert_mock_country(country).await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints are created first so mockito matches them before the helpers
        // when a test registers several mocks for the same path.
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (countries, expected) in self.countries_endpoints {
            mocks.push(setup.country().create_countries_endpoint(countries, expected));
        }

        for (body, expected) in self.exchange_rate_endpoints {
            mocks.push(setup.country().create_exchange_rates_endpoint(body, expected));
        }

        for (path, status, expected) in self.failing_endpoints {
            mocks.push(setup.country().create_failing_endpoint(path, status, expected));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
