//! Shared test harness for Currency Atlas.
//!
//! Provides a declarative [`TestBuilder`] that prepares an in-memory SQLite database,
//! a mockito server standing in for the country and exchange-rate APIs, and a temporary
//! directory for the rendered summary image.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::country::{data::MockCountry, factory},
        TestBuilder, TestContext, TestError,
    };
}
