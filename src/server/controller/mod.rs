//! HTTP controller endpoints for the Currency Atlas API.
//!
//! Axum handlers for the country routes and the status routes. Handlers delegate to the
//! services, convert results into DTOs and rely on [`Error`](crate::server::error::Error)'s
//! `IntoResponse` implementation for failures. Each handler carries a utoipa annotation for
//! the OpenAPI document.

pub mod country;
pub mod status;
