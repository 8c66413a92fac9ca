//! API module for shared HTTP API functionality
//!
//! Provides credentials, token storage, and wire types used by the
//! content client and by anything else talking to the REST API.
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure types and functions (no HTTP client dependencies)
//! - Token file persistence
//!
//! The HTTP client in `folio-content` wraps these with `reqwest`.

pub mod auth;
pub mod types;

pub use auth::{Credentials, TokenStore};
pub use types::{ApiErrorBody, LoginRequest, LoginResponse, Resource};
