//! Product catalog entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::Entity;

/// A catalog product row.
///
/// Wire field names are camelCase to match the backend columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Generated by the backend on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Stock on hand, in `unit`s.
    #[serde(default)]
    pub quantity_owned: Option<f64>,

    /// Picklist-backed: allowed values come from the backend `Unit` enum.
    #[serde(default)]
    pub unit: Option<String>,

    /// Public URL of the uploaded product image.
    #[serde(default)]
    pub picture_url: Option<String>,
}

impl Product {
    /// A new unsaved product with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Entity for Product {
    const OBJECT_NAME: &'static str = "Product";
    const PICKLISTS: &'static [(&'static str, &'static str)] = &[("unit", "Unit")];

    fn id_value(&self) -> Option<Value> {
        self.id.map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsaved_product_serializes_without_id() {
        let product = Product::new("Widget");
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value.get("name"), Some(&json!("Widget")));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let row = json!({
            "id": 1,
            "name": "Widget",
            "quantityOwned": 2.5,
            "unit": "kg",
            "pictureUrl": "https://cdn.example/widget.png"
        });
        let product: Product = serde_json::from_value(row).unwrap();
        assert_eq!(product.quantity_owned, Some(2.5));
        assert_eq!(product.picture_url.as_deref(), Some("https://cdn.example/widget.png"));
        assert_eq!(product.id_value(), Some(json!(1)));
    }
}
