//! Hybrid content resolution
//!
//! Combines the normalizer, completeness predicate and merger:
//! a non-empty server list where every record is complete is shown alone,
//! sorted newest first; anything else is merged over the fixtures.

use crate::completeness::{is_complete, missing_fields};
use crate::merger::merge;
use crate::model::{CanonicalArticle, Section, SourceKind};
use crate::normalizer::normalize_all;
use serde_json::Value;
use tracing::{debug, info};

/// How the visible list was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Complete server data, no fixtures
    ServerOnly,
    /// Fixtures overlaid with whatever the server returned
    Hybrid,
}

/// Resolution options
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Keep only records in this section
    pub section: Option<Section>,
    /// Merge fixtures when server data is incomplete (default: true)
    pub fixture_fallback: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            section: None,
            fixture_fallback: true,
        }
    }
}

/// Resolved list and the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub articles: Vec<CanonicalArticle>,
    pub strategy: Strategy,
}

/// Sort newest first; undated records keep their order at the end
pub fn sort_by_published_desc(articles: &mut [CanonicalArticle]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Resolve server and fixture records into the list to display
pub fn resolve(
    server: &[Value],
    fixtures: &[Value],
    kind: SourceKind,
    options: &ResolveOptions,
) -> Resolution {
    let server_records = normalize_all(server, kind);

    let incomplete = server_records.iter().filter(|r| !is_complete(r)).count();
    for record in server_records.iter().filter(|r| !is_complete(r)) {
        debug!(
            id = %record.article.id,
            missing = ?missing_fields(record),
            "Incomplete server record"
        );
    }

    let server_complete = !server_records.is_empty() && incomplete == 0;

    let (mut articles, strategy) = if server_complete || !options.fixture_fallback {
        let mut articles: Vec<CanonicalArticle> =
            server_records.into_iter().map(|r| r.article).collect();
        sort_by_published_desc(&mut articles);
        (articles, Strategy::ServerOnly)
    } else {
        let fixture_records = normalize_all(fixtures, kind);
        let merged = merge(fixture_records, server_records);
        (
            merged.into_iter().map(|r| r.article).collect(),
            Strategy::Hybrid,
        )
    };

    if let Some(section) = &options.section {
        articles.retain(|a| a.section.as_ref() == Some(section));
    }

    info!(
        server = server.len(),
        incomplete,
        fixtures = fixtures.len(),
        resolved = articles.len(),
        strategy = ?strategy,
        "Resolved content list"
    );

    Resolution { articles, strategy }
}
