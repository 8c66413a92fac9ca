//! Raw record normalization
//!
//! Maps heterogeneous upstream records onto [`CanonicalArticle`]. Each field
//! has a fixed list of candidate keys tried in order; the first present,
//! non-empty value wins. Missing or malformed fields are absorbed silently:
//! normalization never fails.

use crate::model::{Author, CanonicalArticle, Category, Section, SourceKind};
use folio_common::hash::derived_id;
use folio_common::time::parse_date_value;
use serde_json::{json, Map, Value};

const ID_KEYS: &[&str] = &["id", "_id", "uuid"];
const SLUG_KEYS: &[&str] = &["slug", "handle"];
const TITLE_KEYS: &[&str] = &["title", "research_title", "tot_title", "name", "headline"];
const SECTION_KEYS: &[&str] = &["section", "type", "content_type"];
const CATEGORY_KEYS: &[&str] = &["category", "category_name", "label", "tag"];
const IMAGE_KEYS: &[&str] = &[
    "image",
    "cover",
    "thumbnail",
    "cover_image",
    "image_url",
    "imageUrl",
    "research_image",
];
const EXCERPT_KEYS: &[&str] = &[
    "excerpt",
    "summary",
    "description",
    "research_abstract",
    "subtitle",
];
const AUTHOR_NAME_KEYS: &[&str] = &["author_name", "authorName"];
const AVATAR_KEYS: &[&str] = &["avatar", "image", "photo"];
const DATE_KEYS: &[&str] = &[
    "publishedAt",
    "published_at",
    "date",
    "research_date",
    "tot_date",
    "created_at",
    "createdAt",
];
const FEATURED_KEYS: &[&str] = &["featured", "is_featured", "isFeatured"];
const PDF_KEYS: &[&str] = &["pdfUrl", "pdf_url", "pdf", "research_pdf"];
const CONTENT_KEYS: &[&str] = &["content", "blocks", "body"];

/// Which identity fields were present upstream rather than derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Provenance {
    pub id: bool,
    pub slug: bool,
    pub title: bool,
    pub featured: bool,
}

/// A canonical article together with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub article: CanonicalArticle,
    pub provenance: Provenance,
}

/// Derive a URL slug from free text
///
/// # Examples
///
/// ```
/// use folio_content::normalizer::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("  Ideas & Tradition -- 2024 "), "ideas-tradition-2024");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Normalize one raw record into a canonical article
pub fn normalize(raw: &Value, kind: SourceKind) -> CanonicalArticle {
    normalize_record(raw, kind).article
}

/// Normalize a list of raw records
pub fn normalize_all(raws: &[Value], kind: SourceKind) -> Vec<NormalizedRecord> {
    raws.iter().map(|raw| normalize_record(raw, kind)).collect()
}

/// Normalize one raw record, keeping provenance for the merger
pub fn normalize_record(raw: &Value, kind: SourceKind) -> NormalizedRecord {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let explicit_id = first_text(fields, ID_KEYS);
    let explicit_slug = first_text(fields, SLUG_KEYS);
    let explicit_title = first_text(fields, TITLE_KEYS);

    let title_slug = explicit_title
        .as_deref()
        .map(slugify)
        .filter(|s| !s.is_empty());

    let id = explicit_id
        .clone()
        .or_else(|| explicit_slug.clone())
        .or_else(|| title_slug.clone())
        .unwrap_or_else(|| derived_id(raw));

    let slug = explicit_slug
        .clone()
        .or(title_slug)
        .unwrap_or_else(|| {
            let from_id = slugify(&id);
            if from_id.is_empty() {
                id.clone()
            } else {
                from_id
            }
        });

    let title = explicit_title.clone().unwrap_or_else(|| id.clone());

    let section = first_text(fields, SECTION_KEYS)
        .map(|s| Section::parse(&s))
        .or_else(|| kind.default_section());

    let featured = first_present(fields, FEATURED_KEYS).and_then(parse_flag);

    let article = CanonicalArticle {
        id,
        slug,
        title,
        section,
        category: first_text(fields, CATEGORY_KEYS).map(|c| Category::parse(&c)),
        image: first_text(fields, IMAGE_KEYS),
        excerpt: first_text(fields, EXCERPT_KEYS),
        author: resolve_author(fields),
        published_at: DATE_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(parse_date_value),
        featured: featured.unwrap_or(false),
        pdf_url: first_text(fields, PDF_KEYS),
        content: first_present(fields, CONTENT_KEYS).and_then(content_blocks),
    };

    NormalizedRecord {
        article,
        provenance: Provenance {
            id: explicit_id.is_some(),
            slug: explicit_slug.is_some(),
            title: explicit_title.is_some(),
            featured: featured.is_some(),
        },
    }
}

/// First candidate key holding a non-null value
fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// First candidate key holding a non-blank string or a number
fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(text_of)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn resolve_author(fields: &Map<String, Value>) -> Option<Author> {
    let from_author = fields.get("author").and_then(|value| match value {
        Value::Object(profile) => {
            first_text(profile, &["name"]).map(|name| Author::Profile {
                name,
                avatar: first_text(profile, AVATAR_KEYS),
            })
        }
        other => text_of(other).map(Author::Name),
    });

    from_author.or_else(|| first_text(fields, AUTHOR_NAME_KEYS).map(Author::Name))
}

fn content_blocks(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(blocks) => Some(blocks.clone()),
        Value::String(text) if !text.trim().is_empty() => {
            Some(vec![json!({"type": "paragraph", "text": text})])
        }
        _ => None,
    }
}
