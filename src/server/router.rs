//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. Every endpoint is registered here with its OpenAPI specification, and
//! Swagger UI is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /` - Liveness check and endpoint listing
/// - `GET /status` - Country count and latest refresh time
/// - `POST /countries/refresh` - Refresh from the external sources
/// - `GET /countries` - List countries with optional filters and sort
/// - `GET /countries/image` - Summary image of the last refresh
/// - `GET /countries/{name}` - Get a country by name
/// - `DELETE /countries/{name}` - Delete a country by name
///
/// The static `/countries/image` and `/countries/refresh` routes take precedence over the
/// `/countries/{name}` capture, so no country can be looked up under those two names.
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, sources, summary_image };
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Currency Atlas", description = "Currency Atlas API"), tags(
        (name = controller::country::COUNTRY_TAG, description = "Country data, refresh and summary image routes"),
        (name = controller::status::STATUS_TAG, description = "Service status routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::status::service_info))
        .routes(routes!(controller::status::get_status))
        .routes(routes!(controller::country::refresh_countries))
        .routes(routes!(controller::country::list_countries))
        .routes(routes!(controller::country::get_summary_image))
        .routes(routes!(
            controller::country::get_country,
            controller::country::delete_country
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
