use atlas_test_utils::prelude::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use currency_atlas::server::controller::country::{delete_country, get_country};

use crate::util::{body_json, TestContextExt};

/// Tests deleting a stored country.
///
/// Verifies the confirmation echoes the requested name and a subsequent get fails.
///
/// Expected: 200 then 404
#[tokio::test]
async fn deletes_country_and_confirms() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_mock_country(MockCountry::new("Gabon"))
        .build()
        .await?;

    let state = test.into_app_state();

    let result = delete_country(State(state.clone()), Path("gabon".to_string())).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({ "message": "gabon deleted successfully" })
    );

    let result = get_country(State(state), Path("Gabon".to_string())).await;
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 404 when no country has the name
#[tokio::test]
async fn returns_not_found_for_unknown_country() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_mock_country(MockCountry::new("Gabon"))
        .build()
        .await?;

    let result = delete_country(State(test.into_app_state()), Path("Gambia".to_string())).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "Country not found");

    Ok(())
}
