//! Content API client
//!
//! Thin `reqwest` wrapper over the REST convention
//! `/api/<resource>[/:id]`. Credentials are supplied by the caller and
//! attached as a bearer header on every request. Admin operations here
//! propagate errors; the list fetch used by screens collapses them (see
//! [`crate::fetcher`]).

use crate::validation::{validate, ValidationErrors};
use folio_common::api::{ApiErrorBody, Credentials, LoginRequest, LoginResponse, Resource};
use folio_common::config::TomlConfig;
use reqwest::{header, Method, RequestBuilder, Response, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Content API errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Content API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a client for `base_url` (scheme + host, optional path prefix)
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!("{} cannot be a base", base_url)));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            credentials,
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &TomlConfig, credentials: Credentials) -> Result<Self, FetchError> {
        Self::new(
            &config.api_base_url,
            credentials,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Same client with different credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Absolute URL for `/api/<segments...>`
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    // ========================================
    // Auth
    // ========================================

    /// Log in and return bearer credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, FetchError> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        tracing::debug!(url = %url, email = %email, "Logging in");

        let response = self
            .send(self.http_client.post(url).json(&body))
            .await?;
        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        let credentials = Credentials::bearer(login.token);
        if !credentials.is_authenticated() {
            return Err(FetchError::Parse("login response carried an empty token".to_string()));
        }

        tracing::info!(email = %email, "Logged in");
        Ok(credentials)
    }

    // ========================================
    // Reads
    // ========================================

    /// List all records of a resource
    pub async fn list(&self, resource: Resource) -> Result<Vec<Value>, FetchError> {
        let url = self.endpoint(&[resource.name()])?;
        tracing::debug!(resource = %resource, url = %url, "Listing records");

        let body = self.request_json(Method::GET, url, None).await?;
        let records = extract_list(body, resource)?;

        tracing::debug!(resource = %resource, count = records.len(), "Listed records");
        Ok(records)
    }

    pub async fn get_by_id(&self, resource: Resource, id: &str) -> Result<Value, FetchError> {
        let url = self.endpoint(&[resource.name(), id])?;
        extract_record(self.request_json(Method::GET, url, None).await?)
    }

    pub async fn get_by_title(&self, resource: Resource, title: &str) -> Result<Value, FetchError> {
        let url = self.endpoint(&[resource.name(), "title", title])?;
        extract_record(self.request_json(Method::GET, url, None).await?)
    }

    // ========================================
    // Writes
    // ========================================

    /// Create a record; the payload is validated before sending
    pub async fn create(&self, resource: Resource, payload: &Value) -> Result<Value, FetchError> {
        validate(resource, payload)?;
        let url = self.endpoint(&[resource.name()])?;
        let created = extract_record(self.request_json(Method::POST, url, Some(payload)).await?)?;
        tracing::info!(resource = %resource, "Created record");
        Ok(created)
    }

    /// Replace a record; the payload is validated before sending
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        payload: &Value,
    ) -> Result<Value, FetchError> {
        validate(resource, payload)?;
        let url = self.endpoint(&[resource.name(), id])?;
        let updated = extract_record(self.request_json(Method::PUT, url, Some(payload)).await?)?;
        tracing::info!(resource = %resource, id = %id, "Updated record");
        Ok(updated)
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), FetchError> {
        let url = self.endpoint(&[resource.name(), id])?;
        self.send(self.http_client.delete(url)).await?;
        tracing::info!(resource = %resource, id = %id, "Deleted record");
        Ok(())
    }

    // ========================================
    // Plumbing
    // ========================================

    async fn request_json(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, FetchError> {
        let mut builder = self.http_client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.send(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Attach credentials, send, and map non-success statuses to errors
    async fn send(&self, builder: RequestBuilder) -> Result<Response, FetchError> {
        let builder = match self.credentials.authorization_header() {
            Some(value) => builder.header(header::AUTHORIZATION, value),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let message = ApiErrorBody::describe(&error_text);
        Err(match status.as_u16() {
            401 | 403 => FetchError::Unauthorized(message),
            404 => FetchError::NotFound(message),
            code => FetchError::Status(code, message),
        })
    }
}

/// Pull the record array out of a list response
///
/// Accepts a bare array or an object wrapping it under `data`, `items`,
/// `results`, or the resource name.
pub(crate) fn extract_list(body: Value, resource: Resource) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in ["data", "items", "results", resource.name()] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }
            Err(FetchError::Parse(format!(
                "expected a JSON array of {} records",
                resource
            )))
        }
        other => Err(FetchError::Parse(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Pull a single record out of a read/write response
pub(crate) fn extract_record(body: Value) -> Result<Value, FetchError> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => Ok(inner),
            Some(other) => {
                map.insert("data".to_string(), other);
                Ok(Value::Object(map))
            }
            None => Ok(Value::Object(map)),
        },
        other => Err(FetchError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Credentials::anonymous(), None).unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let c = client("http://localhost:5000");
        assert_eq!(
            c.endpoint(&["articles", "42"]).unwrap().as_str(),
            "http://localhost:5000/api/articles/42"
        );

        let prefixed = client("https://example.com/cms/");
        assert_eq!(
            prefixed.endpoint(&["research"]).unwrap().as_str(),
            "https://example.com/cms/api/research"
        );
    }

    #[test]
    fn test_endpoint_encodes_titles() {
        let c = client("http://localhost:5000");
        let url = c.endpoint(&["articles", "title", "Hello World/2"]).unwrap();
        assert_eq!(url.path(), "/api/articles/title/Hello%20World%2F2");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", Credentials::anonymous(), None),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:a@b.c", Credentials::anonymous(), None),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_extract_list_shapes() {
        assert_eq!(extract_list(json!([1]), Resource::Articles).unwrap(), vec![json!(1)]);
        assert_eq!(
            extract_list(json!({"data": [2]}), Resource::Articles).unwrap(),
            vec![json!(2)]
        );
        assert_eq!(
            extract_list(json!({"research": [3]}), Resource::Research).unwrap(),
            vec![json!(3)]
        );
        assert!(extract_list(json!({"data": {}}), Resource::Articles).is_err());
        assert!(extract_list(json!("nope"), Resource::Articles).is_err());
    }

    #[test]
    fn test_extract_record_unwraps_data() {
        assert_eq!(
            extract_record(json!({"data": {"id": 1}})).unwrap(),
            json!({"id": 1})
        );
        assert_eq!(extract_record(json!({"id": 2})).unwrap(), json!({"id": 2}));
        assert!(extract_record(json!([])).is_err());
    }
}
