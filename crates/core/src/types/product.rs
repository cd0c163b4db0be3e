//! Product data model.
//!
//! A product lives in the remote document store as a record id plus a bag of
//! fields. [`ProductFields`] is that serialized bag; [`Product`] is the
//! rehydrated in-memory form the rest of the application works with.
//!
//! Stored documents are not trusted to be complete: older records may lack a
//! `display_id` (or even a name), so deserialization is lenient and fills
//! missing fields with empty values instead of rejecting the record. The
//! mutation path enforces the real invariants (non-empty `name` and
//! `category`) before anything is written.

use serde::{Deserialize, Serialize};

use super::{DisplayId, RecordId};

/// The stored fields of a product document (everything except the
/// store-assigned record id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Short human-facing code, independent of the store's record id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<DisplayId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Image URL; empty when the product has no image.
    #[serde(default)]
    pub image: String,
    /// External purchase link; `None` suppresses the visit action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// A catalog product: the store-assigned record id combined with the stored
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Opaque per-record handle assigned by the store on creation. The only
    /// key update and delete operations accept.
    pub record_id: RecordId,
    /// Short human-facing code; `None` for records written before the code
    /// scheme existed.
    pub display_id: Option<DisplayId>,
    pub name: String,
    pub category: String,
    pub image: String,
    pub link: Option<String>,
    pub description: String,
}

impl Product {
    /// Rehydrate a product from a record id and its stored fields.
    #[must_use]
    pub fn from_parts(record_id: RecordId, fields: ProductFields) -> Self {
        Self {
            record_id,
            display_id: fields.display_id,
            name: fields.name,
            category: fields.category,
            image: fields.image,
            link: fields.link,
            description: fields.description,
        }
    }

    /// The stored-field form of this product, as written back on update.
    #[must_use]
    pub fn to_fields(&self) -> ProductFields {
        ProductFields {
            display_id: self.display_id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_deserialize_leniently() {
        // A minimal legacy document: no display_id, no image, no link.
        let fields: ProductFields =
            serde_json::from_value(serde_json::json!({"name": "Oxford Shirt", "category": "Shirts"}))
                .unwrap();

        assert_eq!(fields.name, "Oxford Shirt");
        assert_eq!(fields.display_id, None);
        assert_eq!(fields.image, "");
        assert_eq!(fields.link, None);
    }

    #[test]
    fn test_fields_roundtrip() {
        let fields = ProductFields {
            display_id: Some(DisplayId::new("ab12cd")),
            name: "Oxford Shirt".to_owned(),
            category: "Shirts".to_owned(),
            image: "https://img.example/oxford.jpg".to_owned(),
            link: Some("https://shop.example/oxford".to_owned()),
            description: "A crisp oxford.".to_owned(),
        };

        let value = serde_json::to_value(&fields).unwrap();
        let back: ProductFields = serde_json::from_value(value).unwrap();
        assert_eq!(back, fields);
    }

    #[test]
    fn test_absent_link_is_not_serialized() {
        let fields = ProductFields {
            display_id: None,
            name: "Plain Tee".to_owned(),
            category: "Shirts".to_owned(),
            image: String::new(),
            link: None,
            description: String::new(),
        };

        let value = serde_json::to_value(&fields).unwrap();
        assert!(value.get("link").is_none());
        assert!(value.get("display_id").is_none());
    }

    #[test]
    fn test_from_parts_and_back() {
        let fields = ProductFields {
            display_id: Some(DisplayId::new("ab12cd")),
            name: "Oxford Shirt".to_owned(),
            category: "Shirts".to_owned(),
            image: String::new(),
            link: None,
            description: String::new(),
        };

        let product = Product::from_parts(RecordId::new("rec-1"), fields.clone());
        assert_eq!(product.record_id, RecordId::new("rec-1"));
        assert_eq!(product.to_fields(), fields);
    }
}
