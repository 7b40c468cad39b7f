//! Result type definitions

use serde::{Deserialize, Serialize};

/// A product document as stored in the products index
///
/// Read-only projection of whatever the indexer wrote; the service never
/// mutates products or writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable document identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Longer descriptive text
    #[serde(default)]
    pub description: String,
    /// Image reference; absent for unillustrated products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price, non-negative
    #[serde(default)]
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_round_trips() {
        let product: Product = serde_json::from_value(json!({
            "id": "1",
            "name": "Apple",
            "description": "Fresh red apple",
            "image": "/images/apple.jpg",
            "price": 1.2
        }))
        .unwrap();
        assert_eq!(product.name, "Apple");
        assert_eq!(product.image.as_deref(), Some("/images/apple.jpg"));

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], 1.2);
    }

    #[test]
    fn test_sparse_document_fills_defaults() {
        let product: Product = serde_json::from_value(json!({
            "id": "9",
            "name": "Crate"
        }))
        .unwrap();
        assert_eq!(product.description, "");
        assert!(product.image.is_none());
        assert_eq!(product.price, 0.0);

        // Absent image stays out of the serialized form
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("image").is_none());
    }
}
