//! Engine response normalization
//!
//! The engine is an untrusted boundary: these functions accept any JSON
//! document, including null and garbage, and produce a possibly empty
//! list instead of failing. A degraded engine response degrades to "no
//! results", never to an error surfaced to the caller.

use super::Product;
use crate::query::VOCAB_SUGGESTER;
use serde_json::Value;

/// Extract products from a `_search` response, preserving the engine's
/// relevance order
///
/// Hits without a usable `_source` document are dropped.
pub fn products(response: &Value) -> Vec<Product> {
    response
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(|hits| hits.as_array())
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| hit.get("_source"))
                .filter_map(|source| serde_json::from_value(source.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Extract completion texts from a suggest response, in engine order
pub fn suggestions(response: &Value) -> Vec<String> {
    response
        .get("suggest")
        .and_then(|suggest| suggest.get(VOCAB_SUGGESTER))
        .and_then(|groups| groups.as_array())
        .and_then(|groups| groups.first())
        .and_then(|group| group.get("options"))
        .and_then(|options| options.as_array())
        .map(|options| {
            options
                .iter()
                .filter_map(|option| option.get("text").and_then(|text| text.as_str()))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
