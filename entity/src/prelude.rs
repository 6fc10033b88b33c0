//! `SeaORM` Entity prelude

pub use super::country::Entity as Country;
