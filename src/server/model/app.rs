use sea_orm::DatabaseConnection;

use crate::server::{external::SourceClient, service::summary_image::SummaryImageRenderer};

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sources: SourceClient,
    pub summary_image: SummaryImageRenderer,
}
