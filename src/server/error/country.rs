use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum CountryError {
    #[error("Country {0:?} not found")]
    NotFound(String),
    #[error("Summary image has not been rendered yet")]
    SummaryImageNotFound,
}

impl IntoResponse for CountryError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let message = match self {
            Self::NotFound(_) => "Country not found",
            Self::SummaryImageNotFound => "Summary image not found",
        };

        (StatusCode::NOT_FOUND, Json(ErrorDto::new(message))).into_response()
    }
}
