//! Tests for CountryRepository::top_by_gdp method.

use super::*;

/// Expect the highest estimates first, limited to the requested amount
#[tokio::test]
async fn returns_highest_estimates_first() -> Result<(), TestError> {
    let mut builder = TestBuilder::new().with_country_table();
    for (name, gdp) in [
        ("A", 10.0),
        ("B", 70.0),
        ("C", 30.0),
        ("D", 60.0),
        ("E", 20.0),
        ("F", 50.0),
        ("G", 40.0),
    ] {
        builder = builder.with_mock_country(MockCountry::new(name).gdp(Some(gdp)));
    }
    let test = builder.build().await?;

    let repo = CountryRepository::new(&test.db);
    let top = repo.top_by_gdp(5).await?;

    let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["B", "D", "F", "G", "C"]);

    Ok(())
}

/// Expect countries without an estimate only after every estimated one
#[tokio::test]
async fn places_unknown_estimates_last() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_country_table()
        .with_mock_country(MockCountry::new("Unknown").gdp(None))
        .with_mock_country(MockCountry::new("Zero").gdp(Some(0.0)))
        .with_mock_country(MockCountry::new("Rich").gdp(Some(1_000.0)))
        .build()
        .await?;

    let repo = CountryRepository::new(&test.db);
    let top = repo.top_by_gdp(5).await?;

    let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rich", "Zero", "Unknown"]);

    Ok(())
}
