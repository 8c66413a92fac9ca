//! Fixture data
//!
//! Static sample records compiled into the binary, shown when live data is
//! missing or incomplete. A JSON file can replace the bundled set.

use folio_common::api::Resource;
use folio_common::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

const ARTICLES_JSON: &str = include_str!("../fixtures/articles.json");
const RESEARCH_JSON: &str = include_str!("../fixtures/research.json");

/// Bundled fixtures for a resource; empty when none are bundled
pub fn bundled(resource: Resource) -> Vec<Value> {
    let raw = match resource {
        Resource::Articles => ARTICLES_JSON,
        Resource::Research => RESEARCH_JSON,
        _ => return Vec::new(),
    };

    match parse_fixture_list(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(resource = %resource, error = %e, "Bundled fixtures unreadable");
            Vec::new()
        }
    }
}

/// Load a fixture file (a JSON array of raw records)
pub fn load_file(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::NotFound(format!("fixture file {}", path.display()))
        }
        _ => Error::Io(e),
    })?;
    let records = parse_fixture_list(&content)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), count = records.len(), "Loaded fixture file");
    Ok(records)
}

/// Fixtures for a resource: the file if given, else the bundled set
pub fn for_resource(resource: Resource, path: Option<&Path>) -> Result<Vec<Value>> {
    match path {
        Some(path) => load_file(path),
        None => Ok(bundled(resource)),
    }
}

fn parse_fixture_list(raw: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(records) => Ok(records),
        _ => Err(Error::InvalidInput(
            "fixture data must be a JSON array".to_string(),
        )),
    }
}
