//! Test utilities for building application state from a [`TestContext`]

use atlas_test_utils::TestContext;
use axum::{body::to_bytes, response::Response};
use currency_atlas::server::{
    external::SourceClient, model::app::AppState, service::summary_image::SummaryImageRenderer,
};
use serde_json::Value;

/// Extension trait for TestContext to create AppState pointing at the mock sources
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        let sources = SourceClient::new(self.countries_url(), self.exchange_rates_url())
            .expect("Failed to build source client");

        AppState {
            db: self.db.clone(),
            sources,
            summary_image: SummaryImageRenderer::new(self.summary_image_path(), None),
        }
    }
}

/// Reads a response body as JSON
pub async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Reads a response body as raw bytes
pub async fn body_bytes(resp: Response) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

/// Asserts `bytes` is a PNG and returns its `(width, height)` from the IHDR chunk
pub fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert!(bytes.len() > 24, "PNG is truncated");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "Missing PNG signature");

    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);

    (width, height)
}
