/// Path the mock country source is served from
pub static COUNTRIES_PATH: &str = "/v2/all";
/// Path the mock exchange-rate source is served from
pub static EXCHANGE_RATES_PATH: &str = "/v6/latest/USD";
/// File name of the summary image inside the test context's temporary directory
pub static SUMMARY_IMAGE_FILE: &str = "summary.png";
