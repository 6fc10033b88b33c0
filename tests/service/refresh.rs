//! Tests for RefreshService::refresh_countries method.
//!
//! This module verifies the merge of country and exchange-rate data, the three GDP
//! estimate branches, case-insensitive upserts, summary image rendering, and that a
//! failing source aborts the refresh before anything is written.

use atlas_test_utils::{
    constant::{COUNTRIES_PATH, EXCHANGE_RATES_PATH},
    prelude::*,
};
use currency_atlas::server::{
    data::country::CountryRepository,
    error::{external::ExternalError, Error},
    service::{
        gdp::{FixedMultiplier, RandomMultiplier},
        refresh::RefreshService,
    },
};
use serde_json::json;

use crate::util::{png_dimensions, TestContextExt};

/// Tests a refresh storing new countries with their estimates.
///
/// Verifies the first currency is used, the estimate is population times multiplier
/// divided by the rate, and that every country is reported as inserted.
///
/// Expected: Ok with 2 inserted countries
#[tokio::test]
async fn stores_new_countries_with_estimates() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![
                factory::external_country("Nigeria", 2_000, &["NGN", "USD"]),
                factory::external_country("Ghana", 3_000, &["GHS"]),
            ],
            1,
        )
        .with_exchange_rates_endpoint(
            factory::exchange_rates(&[("USD", 1.0), ("NGN", 1_600.0), ("GHS", 12.0)]),
            1,
        )
        .build()
        .await?;

    let state = test.into_app_state();
    let refresh_service = RefreshService::new(&state.db, &state.sources, &state.summary_image);
    let result = refresh_service
        .refresh_countries(&mut FixedMultiplier::constant(1_200))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let summary = result.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.updated, 0);

    let repo = CountryRepository::new(&test.db);
    let nigeria = repo.find_by_name("Nigeria").await?.unwrap();
    assert_eq!(nigeria.currency_code.as_deref(), Some("NGN"));
    assert_eq!(nigeria.exchange_rate, Some(1_600.0));
    assert_eq!(nigeria.estimated_gdp, Some(1_500.0));
    assert_eq!(nigeria.capital.as_deref(), Some("Nigeria City"));
    assert_eq!(nigeria.region.as_deref(), Some("Africa"));
    assert_eq!(nigeria.flag_url.as_deref(), Some("https://flagcdn.com/nigeria.svg"));

    let ghana = repo.find_by_name("Ghana").await?.unwrap();
    assert_eq!(ghana.estimated_gdp, Some(300_000.0));

    test.assert_mocks();

    Ok(())
}

/// Tests random estimates stay within the multiplier bounds.
///
/// Expected: Ok with GDP between population*1000/rate and population*2000/rate
#[tokio::test]
async fn random_estimate_within_multiplier_range() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![factory::external_country("Kenya", 1_000_000, &["KES"])],
            1,
        )
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("KES", 2.0)]), 1)
        .build()
        .await?;

    let state = test.into_app_state();
    RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();

    let kenya = CountryRepository::new(&test.db)
        .find_by_name("Kenya")
        .await?
        .unwrap();
    let gdp = kenya.estimated_gdp.unwrap();
    assert!((500_000_000.0..=1_000_000_000.0).contains(&gdp), "GDP {}", gdp);

    Ok(())
}

/// Tests repeated refreshes drawing a fresh multiplier each time.
///
/// Refreshes the same country several times with the random multiplier and records the
/// stored estimate after each run.
///
/// Expected: Ok with every GDP in range and not all estimates equal
#[tokio::test]
async fn random_estimate_varies_across_refreshes() -> Result<(), TestError> {
    const REFRESHES: usize = 5;

    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![factory::external_country("Kenya", 1_000_000, &["KES"])],
            REFRESHES,
        )
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("KES", 2.0)]), REFRESHES)
        .build()
        .await?;

    let state = test.into_app_state();
    let service = RefreshService::new(&state.db, &state.sources, &state.summary_image);
    let mut multiplier = RandomMultiplier::new();
    let repository = CountryRepository::new(&test.db);

    let mut estimates = Vec::with_capacity(REFRESHES);
    for _ in 0..REFRESHES {
        service.refresh_countries(&mut multiplier).await.unwrap();

        let kenya = repository.find_by_name("Kenya").await?.unwrap();
        let gdp = kenya.estimated_gdp.unwrap();
        assert!((500_000_000.0..=1_000_000_000.0).contains(&gdp), "GDP {}", gdp);
        estimates.push(gdp);
    }

    assert!(
        estimates.iter().any(|gdp| *gdp != estimates[0]),
        "estimates never changed: {:?}",
        estimates
    );
    test.assert_mocks();

    Ok(())
}

/// Tests countries without currencies.
///
/// Expected: Ok with estimated GDP exactly 0 and no currency or rate
#[tokio::test]
async fn country_without_currencies_has_zero_gdp() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![factory::external_country_without_currencies("Antarctica", 1_000)],
            1,
        )
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("USD", 1.0)]), 1)
        .build()
        .await?;

    let state = test.into_app_state();
    RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();

    let antarctica = CountryRepository::new(&test.db)
        .find_by_name("Antarctica")
        .await?
        .unwrap();
    assert_eq!(antarctica.estimated_gdp, Some(0.0));
    assert!(antarctica.currency_code.is_none());
    assert!(antarctica.exchange_rate.is_none());
    assert!(antarctica.capital.is_none());

    Ok(())
}

/// Tests a currency missing from the rate mapping.
///
/// Expected: Ok with the currency code stored and rate and GDP null
#[tokio::test]
async fn unlisted_currency_has_null_gdp() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![factory::external_country("Wakanda", 5_000_000, &["WKD"])],
            1,
        )
        .with_exchange_rates_endpoint(
            factory::exchange_rates(&[("USD", 1.0), ("NGN", 1_600.0)]),
            1,
        )
        .build()
        .await?;

    let state = test.into_app_state();
    RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();

    let wakanda = CountryRepository::new(&test.db)
        .find_by_name("wakanda")
        .await?
        .unwrap();
    assert_eq!(wakanda.currency_code.as_deref(), Some("WKD"));
    assert!(wakanda.exchange_rate.is_none());
    assert!(wakanda.estimated_gdp.is_none());

    Ok(())
}

/// Tests a rate listed as null by the exchange-rate source.
///
/// Expected: Ok with GDP 0 rather than null
#[tokio::test]
async fn null_rate_estimates_zero() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![factory::external_country("Zimbabwe", 15_000_000, &["ZWL"])],
            1,
        )
        .with_exchange_rates_endpoint(
            json!({ "result": "success", "rates": { "USD": 1.0, "ZWL": null } }),
            1,
        )
        .build()
        .await?;

    let state = test.into_app_state();
    RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();

    let zimbabwe = CountryRepository::new(&test.db)
        .find_by_name("Zimbabwe")
        .await?
        .unwrap();
    assert_eq!(zimbabwe.currency_code.as_deref(), Some("ZWL"));
    assert!(zimbabwe.exchange_rate.is_none());
    assert_eq!(zimbabwe.estimated_gdp, Some(0.0));

    Ok(())
}

/// Tests names differing only in case within one refresh.
///
/// Verifies "France" followed by "france" produce a single row keeping the first name.
///
/// Expected: Ok with 1 inserted, 1 updated and 1 total
#[tokio::test]
async fn case_variants_produce_one_row() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![
                factory::external_country_in_region("France", "Europe", 67_000_000, &["EUR"]),
                factory::external_country_in_region("france", "Europe", 68_000_000, &["EUR"]),
            ],
            1,
        )
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("EUR", 0.92)]), 1)
        .build()
        .await?;

    let state = test.into_app_state();
    let summary = RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.updated, 1);

    let france = CountryRepository::new(&test.db)
        .find_by_name("FRANCE")
        .await?
        .unwrap();
    assert_eq!(france.name, "France");
    assert_eq!(france.population, 68_000_000);

    Ok(())
}

/// Tests a second refresh of the same data.
///
/// Verifies existing rows are updated and stored countries no longer listed by the source
/// are kept and counted.
///
/// Expected: Ok with only updates on the second refresh
#[tokio::test]
async fn repeated_refresh_updates_existing_rows() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_mock_country(MockCountry::new("Atlantis").region("Atlantic"))
        .with_countries_endpoint(
            vec![
                factory::external_country("Mali", 20_000_000, &["XOF"]),
                factory::external_country("Chad", 16_000_000, &["XAF"]),
            ],
            2,
        )
        .with_exchange_rates_endpoint(
            factory::exchange_rates(&[("XOF", 600.0), ("XAF", 600.0)]),
            2,
        )
        .build()
        .await?;

    let state = test.into_app_state();
    let refresh_service = RefreshService::new(&state.db, &state.sources, &state.summary_image);

    let first = refresh_service
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();
    assert_eq!(first.inserted, 2);
    assert_eq!(first.updated, 0);
    assert_eq!(first.total, 3);

    let second = refresh_service
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 2);
    assert_eq!(second.total, 3);
    assert!(second.last_refreshed_at >= first.last_refreshed_at);

    let atlantis = CountryRepository::new(&test.db)
        .find_by_name("Atlantis")
        .await?;
    assert!(atlantis.is_some());

    test.assert_mocks();

    Ok(())
}

/// Tests the summary image is drawn after a refresh.
///
/// Expected: Ok with a 600x400 PNG at the configured path
#[tokio::test]
async fn renders_summary_image() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_countries_endpoint(
            vec![factory::external_country("Benin", 12_000_000, &["XOF"])],
            1,
        )
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("XOF", 600.0)]), 1)
        .build()
        .await?;

    let state = test.into_app_state();
    RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await
        .unwrap();

    let bytes = std::fs::read(test.summary_image_path())?;
    assert_eq!(png_dimensions(&bytes), (600, 400));

    Ok(())
}

/// Tests a failing country source.
///
/// Verifies the exchange-rate source is never called and nothing is written.
///
/// Expected: Err with ExternalError::CountriesUnavailable
#[tokio::test]
async fn fails_when_countries_source_unavailable() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_failing_endpoint(COUNTRIES_PATH, 500, 1)
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("USD", 1.0)]), 0)
        .build()
        .await?;

    let state = test.into_app_state();
    let result = RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await;

    assert!(matches!(
        result,
        Err(Error::ExternalError(ExternalError::CountriesUnavailable(_)))
    ));
    assert_eq!(CountryRepository::new(&test.db).count().await?, 0);
    assert!(!test.summary_image_path().exists());

    test.assert_mocks();

    Ok(())
}

/// Tests a failing exchange-rate source.
///
/// Verifies stored rows are left untouched even though the country list was fetched.
///
/// Expected: Err with ExternalError::ExchangeRatesUnavailable
#[tokio::test]
async fn fails_when_exchange_rates_unavailable() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_mock_country(MockCountry::new("Togo").population(8_000_000))
        .with_countries_endpoint(
            vec![factory::external_country("Togo", 9_000_000, &["XOF"])],
            1,
        )
        .with_failing_endpoint(EXCHANGE_RATES_PATH, 503, 1)
        .build()
        .await?;

    let state = test.into_app_state();
    let result = RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await;

    assert!(matches!(
        result,
        Err(Error::ExternalError(ExternalError::ExchangeRatesUnavailable(_)))
    ));

    let togo = CountryRepository::new(&test.db)
        .find_by_name("Togo")
        .await?
        .unwrap();
    assert_eq!(togo.population, 8_000_000);

    test.assert_mocks();

    Ok(())
}

/// Tests a country source answering with a malformed body.
///
/// Expected: Err with ExternalError::CountriesUnavailable
#[tokio::test]
async fn fails_when_countries_body_malformed() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", COUNTRIES_PATH)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"status":404,"message":"Not Found"}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let state = test.into_app_state();
    let result = RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await;

    assert!(matches!(
        result,
        Err(Error::ExternalError(ExternalError::CountriesUnavailable(_)))
    ));

    test.assert_mocks();

    Ok(())
}

/// Tests error handling when database tables are missing.
///
/// Expected: Err with Error::DbErr after both sources were fetched
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_countries_endpoint(
            vec![factory::external_country("Niger", 24_000_000, &["XOF"])],
            1,
        )
        .with_exchange_rates_endpoint(factory::exchange_rates(&[("XOF", 600.0)]), 1)
        .build()
        .await?;

    let state = test.into_app_state();
    let result = RefreshService::new(&state.db, &state.sources, &state.summary_image)
        .refresh_countries(&mut RandomMultiplier::new())
        .await;

    assert!(matches!(result, Err(Error::DbErr(_))));

    Ok(())
}
