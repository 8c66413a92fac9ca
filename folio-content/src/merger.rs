//! Hybrid merge of fixture and server records
//!
//! Records are keyed by an explicit [`MergeKey`]. Fixtures seed the map,
//! server records overlay it field by field: a field the server defines
//! wins, a field it omits is filled from the fixture. Output keeps
//! first-insertion order.

use crate::model::CanonicalArticle;
use crate::normalizer::{NormalizedRecord, Provenance};
use std::collections::HashMap;

/// Identity used to match a server record with a fixture
///
/// Variants never compare equal to each other, so a slug that happens to
/// equal some other record's id does not merge the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MergeKey {
    ById(String),
    BySlug(String),
    ByTitle(String),
}

impl MergeKey {
    /// Key from the record's upstream identity: id, else slug, else title
    ///
    /// A record with none of the three is keyed by its derived content id.
    pub fn for_record(record: &NormalizedRecord) -> MergeKey {
        let article = &record.article;
        let provenance = &record.provenance;

        if provenance.id {
            MergeKey::ById(article.id.clone())
        } else if provenance.slug {
            MergeKey::BySlug(article.slug.clone())
        } else if provenance.title {
            MergeKey::ByTitle(article.title.clone())
        } else {
            MergeKey::ById(article.id.clone())
        }
    }
}

/// Overlay `top` onto `base`, field by field
pub fn overlay(base: NormalizedRecord, top: NormalizedRecord) -> NormalizedRecord {
    let (b, bp) = (base.article, base.provenance);
    let (t, tp) = (top.article, top.provenance);

    // Derived identity values only win when neither side has an upstream one
    let pick = |top_defined: bool, base_defined: bool, top_value: String, base_value: String| {
        if top_defined || !base_defined {
            top_value
        } else {
            base_value
        }
    };

    let merged = CanonicalArticle {
        id: pick(tp.id, bp.id, t.id, b.id),
        slug: pick(tp.slug, bp.slug, t.slug, b.slug),
        title: pick(tp.title, bp.title, t.title, b.title),
        section: t.section.or(b.section),
        category: t.category.or(b.category),
        image: t.image.or(b.image),
        excerpt: t.excerpt.or(b.excerpt),
        author: t.author.or(b.author),
        published_at: t.published_at.or(b.published_at),
        featured: if tp.featured || !bp.featured {
            t.featured
        } else {
            b.featured
        },
        pdf_url: t.pdf_url.or(b.pdf_url),
        content: t.content.or(b.content),
    };

    NormalizedRecord {
        article: merged,
        provenance: Provenance {
            id: tp.id || bp.id,
            slug: tp.slug || bp.slug,
            title: tp.title || bp.title,
            featured: tp.featured || bp.featured,
        },
    }
}

/// Keyed union of fixtures and server records, server fields winning
pub fn merge(
    fixtures: Vec<NormalizedRecord>,
    server: Vec<NormalizedRecord>,
) -> Vec<NormalizedRecord> {
    let mut order: Vec<Option<NormalizedRecord>> = Vec::with_capacity(fixtures.len() + server.len());
    let mut index: HashMap<MergeKey, usize> = HashMap::new();

    for record in fixtures.into_iter().chain(server) {
        let key = MergeKey::for_record(&record);
        match index.get(&key) {
            Some(&slot) => {
                if let Some(existing) = order[slot].take() {
                    order[slot] = Some(overlay(existing, record));
                }
            }
            None => {
                index.insert(key, order.len());
                order.push(Some(record));
            }
        }
    }

    order.into_iter().flatten().collect()
}
