//! Canonical content model
//!
//! Every record the site renders (articles, research items, ToT entries)
//! is normalized into a [`CanonicalArticle`]. Section and category values
//! go through fixed lookup tables; values outside the tables are kept
//! verbatim in the `Other` variants rather than rejected.

use chrono::{DateTime, Utc};
use folio_common::api::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lookup key used by the section and category tables
///
/// Case-insensitive; `-`, `_` and runs of whitespace collapse to one space,
/// `&` reads as "and".
pub(crate) fn lookup_key(raw: &str) -> String {
    raw.to_lowercase()
        .replace('&', " and ")
        .replace(&['-', '_'][..], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ========================================
// Section
// ========================================

/// Site section a record belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Section {
    Magazine,
    Research,
    Monologues,
    PopCultures,
    ReadingGuides,
    IdeasTradition,
    /// Unrecognized section, kept as received
    Other(String),
}

impl Section {
    pub const KNOWN: [Section; 6] = [
        Section::Magazine,
        Section::Research,
        Section::Monologues,
        Section::PopCultures,
        Section::ReadingGuides,
        Section::IdeasTradition,
    ];

    /// Normalize a raw section value
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_content::model::Section;
    ///
    /// assert_eq!(Section::parse("Pop  Culture"), Section::PopCultures);
    /// assert_eq!(Section::parse("Ideas & Tradition"), Section::IdeasTradition);
    /// assert_eq!(Section::parse("Podcasts"), Section::Other("Podcasts".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Section {
        match lookup_key(raw).as_str() {
            "magazine" | "magazines" => Section::Magazine,
            "research" | "research paper" | "research papers" => Section::Research,
            "monologue" | "monologues" => Section::Monologues,
            "pop culture" | "pop cultures" | "popculture" | "popcultures" => Section::PopCultures,
            "reading guide" | "reading guides" => Section::ReadingGuides,
            "ideas tradition" | "ideas and tradition" | "ideas and traditions"
            | "idea and tradition" => Section::IdeasTradition,
            _ => Section::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Section::Magazine => "magazine",
            Section::Research => "research",
            Section::Monologues => "monologues",
            Section::PopCultures => "pop-cultures",
            Section::ReadingGuides => "reading-guides",
            Section::IdeasTradition => "ideas-tradition",
            Section::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Section::Other(_))
    }
}

impl From<String> for Section {
    fn from(raw: String) -> Self {
        Section::parse(&raw)
    }
}

impl From<Section> for String {
    fn from(section: Section) -> Self {
        section.as_str().to_string()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Category
// ========================================

/// Display category label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Highlight,
    Featured,
    EditorsPick,
    Trending,
    Latest,
    Interview,
    Opinion,
    Review,
    Essay,
    News,
    /// Unrecognized category, kept as received
    Other(String),
}

impl Category {
    /// Normalize a raw category value
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_content::model::Category;
    ///
    /// assert_eq!(Category::parse("  HIGHLIGHT ").as_str(), "Highlight");
    /// assert_eq!(Category::parse("editors-pick").as_str(), "Editor's Pick");
    /// ```
    pub fn parse(raw: &str) -> Category {
        match lookup_key(raw).replace('\'', "").as_str() {
            "highlight" | "highlights" => Category::Highlight,
            "featured" => Category::Featured,
            "editors pick" | "editor pick" | "editors picks" => Category::EditorsPick,
            "trending" => Category::Trending,
            "latest" | "new" => Category::Latest,
            "interview" | "interviews" => Category::Interview,
            "opinion" | "opinions" => Category::Opinion,
            "review" | "reviews" => Category::Review,
            "essay" | "essays" => Category::Essay,
            "news" => Category::News,
            _ => Category::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Highlight => "Highlight",
            Category::Featured => "Featured",
            Category::EditorsPick => "Editor's Pick",
            Category::Trending => "Trending",
            Category::Latest => "Latest",
            Category::Interview => "Interview",
            Category::Opinion => "Opinion",
            Category::Review => "Review",
            Category::Essay => "Essay",
            Category::News => "News",
            Category::Other(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Author
// ========================================

/// Record author: a bare name or a profile with avatar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Profile {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        avatar: Option<String>,
    },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Author::Name(name) => name,
            Author::Profile { name, .. } => name,
        }
    }
}

// ========================================
// Source kind
// ========================================

/// Which upstream collection a raw record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Article,
    Research,
    Tot,
    Other,
}

impl SourceKind {
    /// Section assumed when the record names none
    pub fn default_section(&self) -> Option<Section> {
        match self {
            SourceKind::Research => Some(Section::Research),
            _ => None,
        }
    }
}

impl From<Resource> for SourceKind {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Articles => SourceKind::Article,
            Resource::Research => SourceKind::Research,
            Resource::Tot | Resource::TotMeta => SourceKind::Tot,
            Resource::Shop | Resource::Collected => SourceKind::Other,
        }
    }
}

// ========================================
// Canonical article
// ========================================

/// Normalized content record
///
/// `id` and `title` are never empty. Serialized keys are the first keys
/// the normalizer reads, so a serialized article normalizes to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalArticle {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "folio_common::time::iso_millis_option"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_collapses() {
        assert_eq!(lookup_key("  Reading__Guides "), "reading guides");
        assert_eq!(lookup_key("Ideas&Tradition"), "ideas and tradition");
    }

    #[test]
    fn test_known_sections_parse_to_themselves() {
        for section in Section::KNOWN {
            assert_eq!(Section::parse(section.as_str()), section);
        }
    }

    #[test]
    fn test_unknown_category_kept_verbatim() {
        assert_eq!(
            Category::parse(" Deep Dive"),
            Category::Other(" Deep Dive".to_string())
        );
    }

    #[test]
    fn test_author_untagged_shapes() {
        let name: Author = serde_json::from_str(r#""Ada""#).unwrap();
        assert_eq!(name, Author::Name("Ada".to_string()));

        let profile: Author =
            serde_json::from_str(r#"{"name": "Ada", "avatar": "/a.png"}"#).unwrap();
        assert_eq!(profile.name(), "Ada");
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            serde_json::json!({"name": "Ada", "avatar": "/a.png"})
        );
    }

    #[test]
    fn test_source_kind_from_resource() {
        assert_eq!(SourceKind::from(Resource::Research), SourceKind::Research);
        assert_eq!(SourceKind::from(Resource::TotMeta), SourceKind::Tot);
        assert_eq!(
            SourceKind::Research.default_section(),
            Some(Section::Research)
        );
        assert_eq!(SourceKind::Article.default_section(), None);
    }
}
