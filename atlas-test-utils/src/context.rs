//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context owns an
//! in-memory SQLite database, a mock HTTP server for both external data sources and a
//! temporary directory the summary image is written to.

use std::path::PathBuf;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;

use crate::{
    constant::{COUNTRIES_PATH, EXCHANGE_RATES_PATH, SUMMARY_IMAGE_FILE},
    error::TestError,
};

/// Test context structure returned by `TestBuilder`
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather
/// than constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new().with_country_table().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Point a source client at the mock server
/// let countries_url = test.countries_url();
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,

    /// Mock HTTP server for the external data sources
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
    /// Directory holding the rendered summary image, removed on drop
    image_dir: TempDir,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    /// - `Err(TestError::IoError)` - Temporary directory could not be created
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;
        let image_dir = tempfile::tempdir()?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
            image_dir,
        })
    }

    /// Create database tables from schema statements.
    ///
    /// # Arguments
    /// - `stmts` - Vector of CREATE TABLE statements to execute
    ///
    /// # Returns
    /// - `Ok(())` - All tables created successfully
    /// - `Err(TestError::DbErr)` - Table creation failed
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Full URL of the mock country source
    pub fn countries_url(&self) -> String {
        format!("{}{}", self.server.url(), COUNTRIES_PATH)
    }

    /// Full URL of the mock exchange-rate source
    pub fn exchange_rates_url(&self) -> String {
        format!("{}{}", self.server.url(), EXCHANGE_RATES_PATH)
    }

    /// Location the summary image is rendered to for this test
    ///
    /// The file does not exist until a refresh has rendered it.
    pub fn summary_image_path(&self) -> PathBuf {
        self.image_dir.path().join(SUMMARY_IMAGE_FILE)
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
