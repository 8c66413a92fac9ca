//! Stable content hashing for records that carry no identifier
//!
//! Records without an id, slug, or title still need a key that survives
//! re-fetching. The key is derived from the canonical JSON of the record,
//! so field order in the upstream payload does not change it.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest
const DERIVED_ID_HEX_LEN: usize = 12;

/// Convert JSON to canonical form (sorted keys, no whitespace)
///
/// # Examples
///
/// ```
/// use folio_common::hash::to_canonical_json;
/// use serde_json::json;
///
/// let json = json!({"z": 3, "a": 1, "m": 2});
/// let canonical = to_canonical_json(&json);
///
/// assert!(canonical.starts_with("{\"a\":"));
/// assert!(canonical.contains("\"m\":"));
/// assert!(canonical.contains("\"z\":"));
/// ```
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by_key(|(k, _)| *k);
            let items: Vec<String> = pairs
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), to_canonical_json(v)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        // serde_json's own string encoding handles escapes and control characters
        other => other.to_string(),
    }
}

/// Full SHA-256 of the canonical JSON, as 64 hex characters
pub fn sha256_hex(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(to_canonical_json(value).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Derived identifier for a record with no usable id, slug, or title
///
/// # Examples
///
/// ```
/// use folio_common::hash::derived_id;
/// use serde_json::json;
///
/// let id = derived_id(&json!({"excerpt": "no title here"}));
/// assert!(id.starts_with("item-"));
/// assert_eq!(id.len(), "item-".len() + 12);
/// ```
pub fn derived_id(value: &Value) -> String {
    let digest = sha256_hex(value);
    format!("item-{}", &digest[..DERIVED_ID_HEX_LEN])
}
