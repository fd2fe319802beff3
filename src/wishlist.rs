//! Wishlist: products saved by name, toggled from product cards.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::collection::{PersistedCollection, Renderer};
use crate::local_store::KeyValueStore;
use crate::record_id::{create_id, WISHLIST_PREFIX};
use crate::records::{ProductCard, WishlistItem, WISHLIST_KEY};

/// Result of toggling a product: the saved items and whether the product
/// is now on the list (drives the card's add/remove button).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistToggle {
    pub items: Vec<WishlistItem>,
    pub added: bool,
}

pub struct Wishlist<'s> {
    items: PersistedCollection<'s, WishlistItem>,
}

impl<'s> Wishlist<'s> {
    pub fn new(store: &'s dyn KeyValueStore, renderer: Option<&'s Renderer<WishlistItem>>) -> Self {
        Self {
            items: PersistedCollection::new(store, WISHLIST_KEY).with_renderer(renderer),
        }
    }

    pub fn toggle(&self, card: ProductCard) -> Result<WishlistToggle, AppResponse> {
        let item = WishlistItem {
            id: create_id(WISHLIST_PREFIX),
            name: card.name,
            price: card.price,
            image: card.image,
        };
        let (items, added) = self.items.upsert_or_toggle(item, WishlistItem::same_product)?;
        Ok(WishlistToggle { items, added })
    }

    pub fn remove(&self, name: &str) -> Result<Vec<WishlistItem>, AppResponse> {
        self.items.remove_where(|item| item.name == name)
    }

    pub fn items(&self) -> Vec<WishlistItem> {
        self.items.load()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.load().iter().any(|item| item.name == name)
    }
}
