//! Screen-facing list fetch
//!
//! Transport failures, non-success statuses and malformed bodies all
//! collapse to an empty record list; the message is kept separately for
//! display. No retry.

use crate::client::ApiClient;
use folio_common::api::Resource;
use serde_json::Value;
use tracing::warn;

/// Result of one list fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Raw records; empty when the fetch failed
    pub records: Vec<Value>,
    /// Last error message, if the fetch failed
    pub last_error: Option<String>,
}

impl FetchOutcome {
    pub fn failed(&self) -> bool {
        self.last_error.is_some()
    }
}

impl ApiClient {
    /// Fetch a resource list, never failing
    pub async fn fetch_list(&self, resource: Resource) -> FetchOutcome {
        match self.list(resource).await {
            Ok(records) => FetchOutcome {
                records,
                last_error: None,
            },
            Err(e) => {
                warn!(resource = %resource, error = %e, "List fetch failed, treating as empty");
                FetchOutcome {
                    records: Vec::new(),
                    last_error: Some(e.to_string()),
                }
            }
        }
    }
}
