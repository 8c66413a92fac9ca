//! # Folio Common Library
//!
//! Shared code for the Folio content tools including:
//! - Error and result types
//! - TOML configuration loading
//! - Credentials and session token storage
//! - API resource paths and wire types
//! - Date parsing and content hashing helpers

pub mod api;
pub mod config;
pub mod error;
pub mod hash;
pub mod time;

pub use error::{Error, Result};
