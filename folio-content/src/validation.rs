//! Request body validation
//!
//! One schema per resource. Validation collects every violation instead of
//! stopping at the first, so an admin form can show them all at once. The
//! same functions serve the admin client (before sending) and any server
//! handler that accepts these bodies.

use crate::model::Section;
use folio_common::api::Resource;
use folio_common::time::parse_date_value;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

const MAX_TITLE_LEN: usize = 300;
const ARTICLE_DATE_KEYS: &[&str] = &["publishedAt", "published_at", "date", "research_date"];
const ARTICLE_TEXT_KEYS: &[&str] = &["category", "image", "pdfUrl", "excerpt", "slug"];

/// One violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All violations found in a payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any violation concerns `field`
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a create/update body for `resource`
pub fn validate(resource: Resource, payload: &Value) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(fields) = payload.as_object() else {
        errors.push("body", "must be a JSON object");
        return errors.into_result();
    };

    match resource {
        Resource::Articles | Resource::Research => validate_article(fields, &mut errors),
        Resource::Tot | Resource::TotMeta => validate_tot(fields, &mut errors),
        Resource::Shop => validate_shop(fields, &mut errors),
        Resource::Collected => require_text(fields, "title", &mut errors),
    }

    errors.into_result()
}

fn validate_article(fields: &Map<String, Value>, errors: &mut ValidationErrors) {
    require_text(fields, "title", errors);
    if let Some(Value::String(title)) = fields.get("title") {
        if title.chars().count() > MAX_TITLE_LEN {
            errors.push("title", format!("must be at most {} characters", MAX_TITLE_LEN));
        }
    }

    match present(fields, "section") {
        None => {}
        Some(Value::String(raw)) => {
            if !Section::parse(raw).is_known() {
                let known: Vec<&str> = Section::KNOWN.iter().map(|s| s.as_str()).collect();
                errors.push("section", format!("must be one of: {}", known.join(", ")));
            }
        }
        Some(_) => errors.push("section", "must be a string"),
    }

    for key in ARTICLE_TEXT_KEYS {
        optional_text(fields, key, errors);
    }

    for key in ARTICLE_DATE_KEYS {
        if let Some(value) = present(fields, key) {
            if parse_date_value(value).is_none() {
                errors.push(key, "must be a valid date");
            }
        }
    }

    if let Some(value) = present(fields, "featured") {
        if !value.is_boolean() {
            errors.push("featured", "must be a boolean");
        }
    }

    if let Some(value) = present(fields, "content") {
        if !(value.is_array() || value.is_string()) {
            errors.push("content", "must be an array of blocks or a string");
        }
    }
}

fn validate_tot(fields: &Map<String, Value>, errors: &mut ValidationErrors) {
    require_text(fields, "title", errors);
    optional_text(fields, "description", errors);

    let date = present(fields, "date");
    let year = present(fields, "year");

    if date.is_none() && year.is_none() {
        errors.push("date", "date or year is required");
    }
    if let Some(value) = date {
        if parse_date_value(value).is_none() {
            errors.push("date", "must be a valid date");
        }
    }
    if let Some(value) = year {
        match value.as_i64() {
            Some(y) if (1000..=9999).contains(&y) => {}
            _ => errors.push("year", "must be an integer between 1000 and 9999"),
        }
    }
}

fn validate_shop(fields: &Map<String, Value>, errors: &mut ValidationErrors) {
    require_text(fields, "name", errors);
    optional_text(fields, "image", errors);

    match present(fields, "price").and_then(Value::as_f64) {
        Some(price) if price >= 0.0 => {}
        _ => errors.push("price", "must be a non-negative number"),
    }

    if let Some(value) = present(fields, "stock") {
        if value.as_u64().is_none() {
            errors.push("stock", "must be a non-negative integer");
        }
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn require_text(fields: &Map<String, Value>, key: &str, errors: &mut ValidationErrors) {
    match present(fields, key) {
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        Some(Value::String(_)) | None => errors.push(key, "is required"),
        Some(_) => errors.push(key, "must be a string"),
    }
}

fn optional_text(fields: &Map<String, Value>, key: &str, errors: &mut ValidationErrors) {
    if let Some(value) = present(fields, key) {
        if !value.is_string() {
            errors.push(key, "must be a string");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_article() {
        let body = json!({
            "title": "Hello",
            "section": "Pop Culture",
            "category": "Highlight",
            "date": "2024-01-01",
            "featured": true,
            "content": [{"type": "paragraph", "text": "x"}]
        });
        assert!(validate(Resource::Articles, &body).is_ok());
    }

    #[test]
    fn test_article_collects_all_errors() {
        let body = json!({
            "title": "  ",
            "section": "podcasts",
            "date": "whenever",
            "featured": "yes",
            "image": 5
        });
        let errors = validate(Resource::Articles, &body).unwrap_err();
        for field in ["title", "section", "date", "featured", "image"] {
            assert!(errors.has(field), "expected error on {}: {}", field, errors);
        }
    }

    #[test]
    fn test_title_length_limit() {
        let body = json!({"title": "x".repeat(301)});
        let errors = validate(Resource::Research, &body).unwrap_err();
        assert!(errors.has("title"));
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate(Resource::Shop, &json!([1, 2])).unwrap_err();
        assert!(errors.has("body"));
    }

    #[test]
    fn test_tot_needs_date_or_year() {
        assert!(validate(Resource::Tot, &json!({"title": "Founding", "year": 1998})).is_ok());
        assert!(validate(Resource::TotMeta, &json!({"title": "F", "date": "1998-05-01"})).is_ok());

        let errors = validate(Resource::Tot, &json!({"title": "F"})).unwrap_err();
        assert!(errors.has("date"));

        let errors = validate(Resource::Tot, &json!({"title": "F", "year": 98})).unwrap_err();
        assert!(errors.has("year"));
    }

    #[test]
    fn test_shop_price_and_stock() {
        assert!(validate(Resource::Shop, &json!({"name": "Tote", "price": 12.5, "stock": 3})).is_ok());

        let errors =
            validate(Resource::Shop, &json!({"name": "Tote", "price": -1, "stock": -2})).unwrap_err();
        assert!(errors.has("price"));
        assert!(errors.has("stock"));

        let errors = validate(Resource::Shop, &json!({"name": "Tote"})).unwrap_err();
        assert!(errors.has("price"));
    }

    #[test]
    fn test_display_joins_errors() {
        let errors = validate(Resource::Collected, &json!({"title": 3})).unwrap_err();
        assert_eq!(errors.to_string(), "title: must be a string");
    }
}
