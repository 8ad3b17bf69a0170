//! Lunch item domain types.

use serde::{Deserialize, Serialize};

use budget_lunch_core::ItemId;

/// A purchasable food item in the catalog.
///
/// Wire format matches the original lunch database rows: the image URL field
/// is serialized as `imageurl` and may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique ID, assigned by the store on creation.
    pub id: ItemId,
    /// Display name. Emptiness is deliberately not enforced.
    pub name: String,
    /// Price in dollars. Negative values are deliberately accepted.
    pub price: f64,
    /// Optional image URL.
    #[serde(default)]
    pub imageurl: Option<String>,
}

/// Fields for a new item, before the store assigns an ID.
#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub imageurl: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_serializes_imageurl_field() {
        let item = Item {
            id: ItemId::new(1),
            name: "pizza".to_string(),
            price: 6.99,
            imageurl: Some("https://example.com/pizza.jpg".to_string()),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "pizza");
        assert_eq!(json["imageurl"], "https://example.com/pizza.jpg");
    }

    #[test]
    fn test_item_deserializes_missing_imageurl() {
        let item: Item =
            serde_json::from_str(r#"{"id": 2, "name": "soda", "price": 1.99}"#).unwrap();
        assert_eq!(item.imageurl, None);
    }

    #[test]
    fn test_item_accepts_negative_price() {
        let item: Item =
            serde_json::from_str(r#"{"id": 3, "name": "iou", "price": -1.5, "imageurl": null}"#)
                .unwrap();
        assert!(item.price < 0.0);
    }
}
