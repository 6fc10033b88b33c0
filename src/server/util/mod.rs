//! Utility functions shared by services and controllers.
//!
//! Currently only timestamp formatting, used wherever a refresh time is reported to clients
//! or drawn on the summary image.

pub mod time;
