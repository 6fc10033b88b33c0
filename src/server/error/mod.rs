//! Error types for the Currency Atlas server.
//!
//! This module aggregates the domain error types (configuration, country lookups, external
//! data sources) and library errors into a single [`Error`]. Every error implements
//! `IntoResponse` so handlers can return `Result<_, Error>` directly.

pub mod config;
pub mod country;
pub mod external;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, country::CountryError, external::ExternalError},
};

/// Main error type for the Currency Atlas server.
///
/// Uses `thiserror`'s `#[from]` attribute so the `?` operator converts underlying errors.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Country errors (unknown country name, missing summary image)
/// - External source errors (country or exchange-rate API unavailable)
/// - Library errors (database, filesystem, HTTP client construction, rendering)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Country lookup error (not found, image not rendered yet).
    #[error(transparent)]
    CountryError(#[from] CountryError),
    /// An external data source could not be fetched or parsed.
    #[error(transparent)]
    ExternalError(#[from] ExternalError),
    /// Summary image rendering failed.
    #[error("Failed to render summary image: {0}")]
    RenderError(String),
    /// Internal error indicating a bug, such as a panicked blocking task.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Filesystem error while reading or writing the summary image.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// HTTP client could not be constructed.
    #[error(transparent)]
    HttpClientError(#[from] reqwest::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - Unknown country or missing summary image
/// - 503 Service Unavailable - External data source failure
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::CountryError(err) => err.into_response(),
            Self::ExternalError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
