use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        country::{CountryDto, ListCountriesQuery, RefreshDto},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{
            country::CountryService, gdp::RandomMultiplier, refresh::RefreshService,
        },
        util::time::format_timestamp,
    },
};

pub static COUNTRY_TAG: &str = "country";

/// Refresh all countries from the external sources
///
/// Fetches the country list and exchange rates, stores every country with its estimated GDP
/// and redraws the summary image.
///
/// # Responses
/// - 200 (Success): Refresh completed, counts of inserted and updated countries
/// - 503 (Service Unavailable): A source could not be fetched; nothing was written
/// - 500 (Internal Server Error): Database or image rendering failure
#[utoipa::path(
    post,
    path = "/countries/refresh",
    tag = COUNTRY_TAG,
    responses(
        (status = 200, description = "Countries refreshed", body = RefreshDto),
        (status = 503, description = "External data source unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh_countries(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let refresh_service = RefreshService::new(&state.db, &state.sources, &state.summary_image);

    let mut multipliers = RandomMultiplier::new();
    let summary = refresh_service.refresh_countries(&mut multipliers).await?;

    Ok((
        StatusCode::OK,
        Json(RefreshDto {
            message: "Countries refreshed successfully".to_string(),
            total: summary.total,
            inserted: summary.inserted,
            updated: summary.updated,
            last_refreshed_at: format_timestamp(summary.last_refreshed_at),
        }),
    ))
}

/// List stored countries
///
/// Filters by exact `region` and `currency` code; `sort` orders the result.
#[utoipa::path(
    get,
    path = "/countries",
    tag = COUNTRY_TAG,
    params(ListCountriesQuery),
    responses(
        (status = 200, description = "Countries matching the filters", body = Vec<CountryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_countries(
    State(state): State<AppState>,
    Query(query): Query<ListCountriesQuery>,
) -> Result<impl IntoResponse, Error> {
    let countries = CountryService::new(&state.db).list(query).await?;

    let country_dtos: Vec<CountryDto> = countries.into_iter().map(CountryDto::from).collect();

    Ok((StatusCode::OK, Json(country_dtos)))
}

/// Get a country by name, ignoring case
#[utoipa::path(
    get,
    path = "/countries/{name}",
    tag = COUNTRY_TAG,
    params(("name" = String, Path, description = "Country name, case-insensitive")),
    responses(
        (status = 200, description = "The country", body = CountryDto),
        (status = 404, description = "Country not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_country(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let country = CountryService::new(&state.db).get(&name).await?;

    Ok((StatusCode::OK, Json(CountryDto::from(country))))
}

/// Delete a country by name, ignoring case
#[utoipa::path(
    delete,
    path = "/countries/{name}",
    tag = COUNTRY_TAG,
    params(("name" = String, Path, description = "Country name, case-insensitive")),
    responses(
        (status = 200, description = "Country deleted", body = MessageDto),
        (status = 404, description = "Country not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_country(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    CountryService::new(&state.db).delete(&name).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("{} deleted successfully", name),
        }),
    ))
}

/// Get the summary image drawn by the last refresh
///
/// The image is never drawn on demand; call the refresh route first.
///
/// # Responses
/// - 200 (Success): PNG image
/// - 404 (Not Found): No refresh has rendered the image yet
#[utoipa::path(
    get,
    path = "/countries/image",
    tag = COUNTRY_TAG,
    responses(
        (status = 200, description = "Summary image", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Summary image not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_summary_image(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let image = state.summary_image.read().await?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], image))
}
