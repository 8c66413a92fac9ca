//! folio-content - Hybrid content resolver library
//!
//! Fetches article-like records from the content REST API, normalizes the
//! heterogeneous upstream shapes into [`model::CanonicalArticle`], and
//! merges them with bundled fixtures when server data is incomplete.
//!
//! Pipeline: [`fetcher`] → [`normalizer`] → [`completeness`] →
//! [`merger`], wired together by [`resolver`] and held per screen by
//! [`screen`].

pub mod client;
pub mod completeness;
pub mod fetcher;
pub mod fixtures;
pub mod logging;
pub mod merger;
pub mod model;
pub mod normalizer;
pub mod resolver;
pub mod screen;
pub mod validation;

pub use client::{ApiClient, FetchError};
pub use fetcher::FetchOutcome;
pub use model::{Author, CanonicalArticle, Category, Section, SourceKind};
pub use resolver::{resolve, Resolution, ResolveOptions, Strategy};
pub use screen::{ContentScreen, ScreenState};
