//! Database model type aliases.
//!
//! Short names for the SeaORM entity models used across repositories and services.

/// Type alias for the country database model.
///
/// One row per country, identified case-insensitively by `name_key`.
///
/// # Fields (from `entity::country::Model`)
/// - `id` - Primary key, assigned on insert
/// - `name` - Display name as first stored
/// - `name_key` - Lowercased name, unique
/// - `capital` / `region` - Optional descriptive attributes
/// - `population` - Population reported by the country source
/// - `currency_code` - First currency code of the country (nullable)
/// - `exchange_rate` - Units of the currency per USD (nullable)
/// - `estimated_gdp` - Synthetic GDP estimate (nullable)
/// - `flag_url` - Flag image URL (nullable)
/// - `last_refreshed_at` - Time of the last write to the row
pub type CountryModel = entity::country::Model;
