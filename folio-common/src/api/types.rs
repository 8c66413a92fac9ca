//! Shared API request/response types
//!
//! Resources follow one URL convention: `/api/<resource>` for the
//! collection, `/api/<resource>/<id>` for one record, and
//! `/api/<resource>/title/<title>` for lookup by title.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ========================================
// Resources
// ========================================

/// REST resources exposed by the content API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Articles,
    Research,
    Shop,
    Collected,
    Tot,
    TotMeta,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Articles,
        Resource::Research,
        Resource::Shop,
        Resource::Collected,
        Resource::Tot,
        Resource::TotMeta,
    ];

    /// URL segment under `/api`
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Articles => "articles",
            Resource::Research => "research",
            Resource::Shop => "shop",
            Resource::Collected => "collected",
            Resource::Tot => "tot",
            Resource::TotMeta => "tot-meta",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown resource: {}", s)))
    }
}

// ========================================
// Authentication Types
// ========================================

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response
///
/// Backends name the token field either `token` or `accessToken`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

// ========================================
// Error Response Types
// ========================================

/// Error body returned by the API on non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable message, falling back to the raw body text
    pub fn describe(raw: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(raw)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| raw.trim().to_string())
    }
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names() {
        assert_eq!(Resource::Articles.name(), "articles");
        assert_eq!(Resource::TotMeta.to_string(), "tot-meta");
    }

    #[test]
    fn test_resource_from_str_accepts_variants() {
        assert_eq!("Research".parse::<Resource>().unwrap(), Resource::Research);
        assert_eq!("tot_meta".parse::<Resource>().unwrap(), Resource::TotMeta);
        assert!("podcasts".parse::<Resource>().is_err());
    }

    #[test]
    fn test_login_response_accepts_access_token_alias() {
        let parsed: LoginResponse = serde_json::from_str(r#"{"accessToken": "t1"}"#).unwrap();
        assert_eq!(parsed.token, "t1");
        let parsed: LoginResponse = serde_json::from_str(r#"{"token": "t2", "user": {}}"#).unwrap();
        assert_eq!(parsed.token, "t2");
    }

    #[test]
    fn test_error_body_describe() {
        assert_eq!(ApiErrorBody::describe(r#"{"message": "Nope"}"#), "Nope");
        assert_eq!(ApiErrorBody::describe(r#"{"error": "Bad"}"#), "Bad");
        assert_eq!(ApiErrorBody::describe("  gateway down \n"), "gateway down");
    }
}
