//! The storefront facade: one backend, the registered render callbacks, and
//! short-lived feature views over them.

use log::info;

use crate::app_response::AppResponse;
use crate::auth::Accounts;
use crate::local_store::{KeyValueStore, LmdbStore, MemoryStore};
use crate::orders::Orders;
use crate::records::{Order, Report, Review, WishlistItem};
use crate::reports::Reports;
use crate::reviews::Reviews;
use crate::store_config::StoreConfig;
use crate::wishlist::Wishlist;

type BoxedRenderer<R> = Box<dyn Fn(&[R])>;

pub struct Storefront {
    store: Box<dyn KeyValueStore>,
    wishlist_renderer: Option<BoxedRenderer<WishlistItem>>,
    orders_renderer: Option<BoxedRenderer<Order>>,
    reviews_renderer: Option<BoxedRenderer<Review>>,
    reports_renderer: Option<BoxedRenderer<Report>>,
}

impl Storefront {
    /// Opens the LMDB-backed storefront described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self, AppResponse> {
        let store = LmdbStore::open(config)?;
        let storefront = Self::with_store(Box::new(store));
        if config.seed_reviews {
            storefront.reviews().ensure_seeded()?;
        }
        info!("Storefront '{}' opened", config.name);
        Ok(storefront)
    }

    /// Volatile storefront; nothing survives the value. Reviews are seeded.
    pub fn in_memory() -> Result<Self, AppResponse> {
        let storefront = Self::with_store(Box::new(MemoryStore::new()));
        storefront.reviews().ensure_seeded()?;
        Ok(storefront)
    }

    /// Wraps an arbitrary backend without seeding anything.
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            wishlist_renderer: None,
            orders_renderer: None,
            reviews_renderer: None,
            reports_renderer: None,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn on_wishlist_change(&mut self, render: impl Fn(&[WishlistItem]) + 'static) {
        self.wishlist_renderer = Some(Box::new(render));
    }

    pub fn on_orders_change(&mut self, render: impl Fn(&[Order]) + 'static) {
        self.orders_renderer = Some(Box::new(render));
    }

    pub fn on_reviews_change(&mut self, render: impl Fn(&[Review]) + 'static) {
        self.reviews_renderer = Some(Box::new(render));
    }

    pub fn on_reports_change(&mut self, render: impl Fn(&[Report]) + 'static) {
        self.reports_renderer = Some(Box::new(render));
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self.store())
    }

    pub fn wishlist(&self) -> Wishlist<'_> {
        Wishlist::new(self.store(), self.wishlist_renderer.as_deref())
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self.store(), self.orders_renderer.as_deref())
    }

    pub fn reviews(&self) -> Reviews<'_> {
        Reviews::new(self.store(), self.reviews_renderer.as_deref())
    }

    pub fn reports(&self) -> Reports<'_> {
        Reports::new(self.store(), self.reports_renderer.as_deref())
    }

    /// Flushes the backend to disk, e.g. before the host app is suspended.
    pub fn sync(&self) -> Result<(), AppResponse> {
        self.store.sync()
    }

    /// Wipes every collection and the stored account.
    pub fn clear_all(&self) -> Result<(), AppResponse> {
        self.store.clear()
    }
}
