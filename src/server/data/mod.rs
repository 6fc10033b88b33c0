//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries behind methods named after what they do. They are
//! generic over `ConnectionTrait` so a caller may pass a pooled connection or a transaction.

pub mod country;
