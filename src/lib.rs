//! Currency Atlas
//!
//! HTTP service that refreshes country and exchange-rate data from two external APIs,
//! stores the merged result with an estimated GDP per country and renders a summary image.

pub mod model;
pub mod server;
