use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::Error, external::SourceClient, model::app::AppState,
    service::summary_image::SummaryImageRenderer,
};

/// Install the global `tracing` subscriber
///
/// The filter is read from `RUST_LOG` and defaults to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(config.database_url());
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!(
        "Connected to database {} on {}:{}",
        config.db_name,
        config.db_host,
        config.db_port
    );

    Ok(db)
}

/// Build the application state shared by all handlers
pub async fn build_app_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;
    let sources = SourceClient::from_config(config)?;
    let summary_image = SummaryImageRenderer::from_config(config);

    Ok(AppState {
        db,
        sources,
        summary_image,
    })
}
