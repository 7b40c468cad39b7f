//! Query construction for the OpenSearch cluster
//!
//! Pure builders that turn user text into the JSON documents the engine
//! expects. Product matches use a weighted multi_match with AUTO
//! fuzziness (0 edits for terms up to 2 chars, 1 edit up to 5, 2 edits
//! beyond); completions use the suggest API against a dedicated
//! completion field with a fixed tolerance of one edit.

use serde_json::{json, Value};

/// Result cap for product searches
pub const PRODUCT_RESULT_SIZE: usize = 12;

/// Default number of completions asked of the suggester
pub const DEFAULT_SUGGEST_SIZE: usize = 6;

/// Name of the suggester block in suggest requests and responses
pub const VOCAB_SUGGESTER: &str = "vocab_suggest";

/// Field in the vocabulary index carrying completion data
pub const COMPLETION_FIELD: &str = "suggest";

/// Build a fuzzy product query for `text`
///
/// Matches against `name` (weighted 3x) and `description`, with edit
/// tolerance scaled to term length by the engine.
pub fn product_query(text: &str) -> Value {
    json!({
        "query": {
            "multi_match": {
                "query": text,
                "fields": ["name^3", "description"],
                "fuzziness": "AUTO"
            }
        },
        "size": PRODUCT_RESULT_SIZE
    })
}

/// Build a prefix-completion query for `prefix`, asking for at most
/// `size` terms
///
/// Callers are expected to gate prefixes shorter than two characters; a
/// single character fans out to most of the vocabulary.
pub fn suggest_query(prefix: &str, size: usize) -> Value {
    json!({
        "suggest": {
            VOCAB_SUGGESTER: {
                "prefix": prefix,
                "completion": {
                    "field": COMPLETION_FIELD,
                    "fuzzy": { "fuzziness": 1 },
                    "size": size
                }
            }
        }
    })
}
