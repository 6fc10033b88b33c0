//! Business logic services.
//!
//! Services sit between the HTTP controllers and the repositories. They combine repository
//! calls, the external source client and the summary image renderer into the operations
//! exposed by the API.

pub mod country;
pub mod gdp;
pub mod refresh;
pub mod summary_image;
