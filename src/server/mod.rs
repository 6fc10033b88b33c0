//! Server application core modules.
//!
//! This module contains all server-side functionality for Currency Atlas: configuration,
//! HTTP routing and controllers, the refresh and query services, the country repository,
//! the external source client and error handling.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod external;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
