//! # Session Cart
//!
//! The cart keeps two parallel representations of its contents:
//! display entries (name/cost/image, shown on the cart page) and
//! checkout lines (provider price id + quantity, sent to the gateway).
//! Both are appended on every add, so the lists always have equal
//! length. Adding the same item twice produces two lines rather than
//! incrementing a quantity.
//!
//! Carts are serialized into the visitor's session, so each browser
//! session has its own cart.

use crate::item::Item;
use serde::{Deserialize, Serialize};

/// Human-readable cart line shown on the cart page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub image_path: String,
    pub name: String,
    pub cost: String,
}

/// Provider-facing cart line sent to the checkout gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutEntry {
    /// Provider price identifier
    pub price_id: String,
    /// Always 1; repeated adds accumulate as separate lines
    pub quantity: u32,
}

/// A visitor's shopping cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    display: Vec<DisplayEntry>,
    checkout: Vec<CheckoutEntry>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy an item into both cart representations
    pub fn add(&mut self, item: &Item) {
        self.display.push(DisplayEntry {
            image_path: item.image_path.clone(),
            name: item.name.clone(),
            cost: item.cost.clone(),
        });
        self.checkout.push(CheckoutEntry {
            price_id: item.price_id.clone(),
            quantity: 1,
        });
    }

    /// Empty both lists
    pub fn clear(&mut self) {
        self.display.clear();
        self.checkout.clear();
    }

    /// Number of lines in the cart
    pub fn len(&self) -> usize {
        self.display.len()
    }

    /// True when no items have been added
    pub fn is_empty(&self) -> bool {
        self.checkout.is_empty()
    }

    /// Display lines for the cart page
    pub fn display_lines(&self) -> &[DisplayEntry] {
        &self.display
    }

    /// Checkout lines for the gateway
    pub fn checkout_lines(&self) -> &[CheckoutEntry] {
        &self.checkout
    }
}
