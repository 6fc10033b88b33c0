use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        country::{ServiceInfoDto, StatusDto},
    },
    server::{
        error::Error, model::app::AppState, service::country::CountryService,
        util::time::format_timestamp,
    },
};

pub static STATUS_TAG: &str = "status";

static ENDPOINTS: &[(&str, &str)] = &[
    ("refresh", "POST /countries/refresh"),
    ("list", "GET /countries"),
    ("get", "GET /countries/{name}"),
    ("delete", "DELETE /countries/{name}"),
    ("image", "GET /countries/image"),
    ("status", "GET /status"),
    ("docs", "GET /api/docs"),
];

/// Liveness check listing the available endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Service is running", body = ServiceInfoDto)
    ),
)]
pub async fn service_info() -> impl IntoResponse {
    let endpoints: BTreeMap<String, String> = ENDPOINTS
        .iter()
        .map(|(name, route)| (name.to_string(), route.to_string()))
        .collect();

    Json(ServiceInfoDto {
        message: "Endpoint is working".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// Number of stored countries and the latest refresh time
#[utoipa::path(
    get,
    path = "/status",
    tag = STATUS_TAG,
    responses(
        (status = 200, description = "Store status", body = StatusDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_status(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let status = CountryService::new(&state.db).status().await?;

    Ok((
        StatusCode::OK,
        Json(StatusDto {
            total_countries: status.total_countries,
            last_refreshed_at: status.last_refreshed_at.map(format_timestamp),
        }),
    ))
}
