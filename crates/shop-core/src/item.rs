//! # Catalog Items
//!
//! Items are stored in the `items` table and created only through the
//! admin endpoint. The `cost` column is display text; real pricing lives
//! with the payment provider behind `price_id`.

use serde::{Deserialize, Serialize};

/// A purchasable item in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Database id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Image reference shown on the catalog and cart pages
    pub image_path: String,

    /// Display cost (text, e.g. "19.99")
    pub cost: String,

    /// Provider price identifier (e.g. a Stripe `price_...` id)
    pub price_id: String,
}

/// Payload for creating a new catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub image_path: String,
    pub cost: String,
    pub price_id: String,
}

impl NewItem {
    /// Validate that every field is present and non-empty.
    /// All item fields are required.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("name", &self.name),
            ("description", &self.description),
            ("image_path", &self.image_path),
            ("cost", &self.cost),
            ("price_id", &self.price_id),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }

        Ok(())
    }
}
