//! Record types persisted by the storefront.
//!
//! Each collection is stored as a JSON array under a fixed key. Field names
//! match the ones the storefront pages have always written, so existing
//! stored data decodes without migration:
//!
//! ```rust
//! use offline_storefront_core::records::Order;
//!
//! let stored = r#"[{"id":"O123456","name":"Shoe","price":"$10","image":"x.png","date":"1/1/2024, 9:00:00 AM"}]"#;
//! let orders: Vec<Order> = serde_json::from_str(stored)?;
//! assert_eq!(orders[0].name, "Shoe");
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// Storage key of the single registered account.
pub const USER_KEY: &str = "demo_user";
pub const WISHLIST_KEY: &str = "wishlist";
pub const ORDERS_KEY: &str = "orders";
pub const REVIEWS_KEY: &str = "reviews";
pub const REPORTS_KEY: &str = "reports";

/// The one locally registered account.
///
/// Stored and compared in plaintext. This is a demo credential, not an
/// authentication system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// What a host extracts from a clicked product card: the visible name, the
/// price label exactly as displayed, and the image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub name: String,
    pub price: String,
    pub image: String,
}

/// A saved product. Two items are the same item when their names are equal,
/// regardless of `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl WishlistItem {
    pub fn same_product(&self, other: &WishlistItem) -> bool {
        self.name == other.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    /// Local time the order was placed, e.g. `3/14/2024, 2:05:09 PM`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    pub text: String,
    /// Local date only, e.g. `3/14/2024`.
    pub date: String,
}

/// A contact-form submission. Its `id` doubles as the reference number shown
/// to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub email: String,
    pub message: String,
    pub date: String,
}
