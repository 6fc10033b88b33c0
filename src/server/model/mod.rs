//! Server application models and type definitions.
//!
//! This module contains the application state shared by handlers and type aliases for the
//! database entity models.

pub mod app;
pub mod db;
