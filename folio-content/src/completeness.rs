//! Completeness predicate
//!
//! A record is complete when it can be rendered without fixture data:
//! title, section, category, publish date and image are all present.
//! Only the merge strategy depends on this; incomplete records are never
//! rejected.

use crate::normalizer::NormalizedRecord;

/// Names of the display fields a record is missing
pub fn missing_fields(record: &NormalizedRecord) -> Vec<&'static str> {
    let article = &record.article;
    let mut missing = Vec::new();

    if !record.provenance.title {
        missing.push("title");
    }
    if article.section.is_none() {
        missing.push("section");
    }
    if article.category.is_none() {
        missing.push("category");
    }
    if article.published_at.is_none() {
        missing.push("publishedAt");
    }
    if article.image.is_none() {
        missing.push("image");
    }

    missing
}

pub fn is_complete(record: &NormalizedRecord) -> bool {
    missing_fields(record).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;
    use crate::normalizer::normalize_record;
    use serde_json::json;

    #[test]
    fn test_complete_record() {
        let record = normalize_record(
            &json!({
                "title": "T",
                "section": "magazine",
                "category": "news",
                "date": "2024-01-01",
                "image": "/t.png"
            }),
            SourceKind::Article,
        );
        assert!(is_complete(&record));
    }

    #[test]
    fn test_derived_title_is_not_complete() {
        let record = normalize_record(
            &json!({
                "id": 9,
                "section": "magazine",
                "category": "news",
                "date": "2024-01-01",
                "image": "/t.png"
            }),
            SourceKind::Article,
        );
        assert_eq!(record.article.title, "9");
        assert_eq!(missing_fields(&record), vec!["title"]);
    }

    #[test]
    fn test_unparseable_date_counts_as_missing() {
        let record = normalize_record(
            &json!({
                "title": "T",
                "section": "magazine",
                "category": "news",
                "date": "someday",
            }),
            SourceKind::Article,
        );
        assert_eq!(missing_fields(&record), vec!["publishedAt", "image"]);
    }

    #[test]
    fn test_research_default_section_counts() {
        let record = normalize_record(
            &json!({
                "research_title": "R",
                "category": "essay",
                "research_date": "2020-02-02",
                "thumbnail": "/r.png"
            }),
            SourceKind::Research,
        );
        assert!(is_complete(&record));
    }
}
