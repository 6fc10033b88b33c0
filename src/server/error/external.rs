use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failure to obtain data from one of the external sources.
///
/// Covers connection errors, timeouts, non-success statuses and malformed bodies; all of
/// them abort a refresh before anything is written.
#[derive(Error, Debug)]
pub enum ExternalError {
    #[error("Could not fetch data from the country API: {0}")]
    CountriesUnavailable(#[source] reqwest::Error),
    #[error("Could not fetch data from the exchange rates API: {0}")]
    ExchangeRatesUnavailable(#[source] reqwest::Error),
}

impl IntoResponse for ExternalError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorDto {
                error: "External data source unavailable".to_string(),
                details: Some(self.to_string()),
            }),
        )
            .into_response()
    }
}
