//! Persisted, ordered collections of records.
//!
//! [`PersistedCollection`] is the one piece every storefront feature shares:
//! a JSON array stored under a fixed key, mutated by whole-collection
//! load → transform → save round trips, with an optional render callback
//! that receives the fresh collection after each save.
//!
//! Reads never fail. A missing key, text that does not decode, or a backend
//! read error all load as an empty collection.
//!
//! ```rust
//! use offline_storefront_core::collection::PersistedCollection;
//! use offline_storefront_core::local_store::MemoryStore;
//! use offline_storefront_core::records::Order;
//!
//! let store = MemoryStore::new();
//! let orders: PersistedCollection<'_, Order> = PersistedCollection::new(&store, "orders");
//!
//! let order = Order {
//!     id: "O1".to_string(),
//!     name: "Shoe".to_string(),
//!     price: "$10".to_string(),
//!     image: "x.png".to_string(),
//!     date: "2024-01-01".to_string(),
//! };
//! orders.append(order.clone())?;
//! assert_eq!(orders.load(), vec![order]);
//!
//! orders.remove_where(|o| o.id == "O1")?;
//! assert!(orders.load().is_empty());
//! # Ok::<(), offline_storefront_core::app_response::AppResponse>(())
//! ```

use std::marker::PhantomData;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::local_store::KeyValueStore;

/// Callback that rebuilds a display region from the current collection.
pub type Renderer<R> = dyn Fn(&[R]);

pub struct PersistedCollection<'s, R> {
    store: &'s dyn KeyValueStore,
    key: &'s str,
    renderer: Option<&'s Renderer<R>>,
    _records: PhantomData<fn() -> R>,
}

impl<'s, R> PersistedCollection<'s, R>
where
    R: Serialize + DeserializeOwned,
{
    pub fn new(store: &'s dyn KeyValueStore, key: &'s str) -> Self {
        Self {
            store,
            key,
            renderer: None,
            _records: PhantomData,
        }
    }

    pub fn with_renderer(mut self, renderer: Option<&'s Renderer<R>>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn load(&self) -> Vec<R> {
        self.read_existing().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    /// Replaces the stored collection and re-renders.
    pub fn save(&self, records: &[R]) -> Result<(), AppResponse> {
        let json = serde_json::to_string(records)?;
        self.store.put_raw(self.key, &json)?;
        debug!("Saved {} record(s) under '{}'", records.len(), self.key);
        if let Some(render) = self.renderer {
            render(records);
        }
        Ok(())
    }

    /// Removes every record with the same identity as `record`, or appends
    /// `record` when there is none. Returns the new collection and whether
    /// the record is now present.
    pub fn upsert_or_toggle<F>(&self, record: R, same_identity: F) -> Result<(Vec<R>, bool), AppResponse>
    where
        F: Fn(&R, &R) -> bool,
    {
        let mut records = self.load();
        let before = records.len();
        records.retain(|existing| !same_identity(existing, &record));

        let present = records.len() == before;
        if present {
            records.push(record);
        }

        self.save(&records)?;
        Ok((records, present))
    }

    pub fn remove_where<P>(&self, predicate: P) -> Result<Vec<R>, AppResponse>
    where
        P: Fn(&R) -> bool,
    {
        let mut records = self.load();
        records.retain(|record| !predicate(record));
        self.save(&records)?;
        Ok(records)
    }

    /// Inserts at the front, for most-recent-first feeds.
    pub fn prepend(&self, record: R) -> Result<Vec<R>, AppResponse> {
        let mut records = self.load();
        records.insert(0, record);
        self.save(&records)?;
        Ok(records)
    }

    pub fn append(&self, record: R) -> Result<Vec<R>, AppResponse> {
        let mut records = self.load();
        records.push(record);
        self.save(&records)?;
        Ok(records)
    }

    /// Stores `seed()` if the collection has never been written (or what is
    /// stored cannot be read back). An existing empty collection is left alone.
    /// Returns whether the seed was written.
    pub fn ensure_seeded<F>(&self, seed: F) -> Result<bool, AppResponse>
    where
        F: FnOnce() -> Vec<R>,
    {
        if self.read_existing().is_some() {
            return Ok(false);
        }

        let records = seed();
        self.save(&records)?;
        info!("Seeded '{}' with {} record(s)", self.key, records.len());
        Ok(true)
    }

    fn read_existing(&self) -> Option<Vec<R>> {
        let raw = match self.store.get_raw(self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Reading '{}' failed, treating as empty: {e}", self.key);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("Stored '{}' does not decode, treating as empty: {e}", self.key);
                None
            }
        }
    }
}

/// A single optional record under one key, such as the registered account.
pub struct PersistedSlot<'s, T> {
    store: &'s dyn KeyValueStore,
    key: &'s str,
    _value: PhantomData<fn() -> T>,
}

impl<'s, T> PersistedSlot<'s, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'s dyn KeyValueStore, key: &'s str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    pub fn load(&self) -> Option<T> {
        let raw = match self.store.get_raw(self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Reading '{}' failed, treating as absent: {e}", self.key);
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| warn!("Stored '{}' does not decode, treating as absent: {e}", self.key))
            .ok()
    }

    pub fn save(&self, value: &T) -> Result<(), AppResponse> {
        let json = serde_json::to_string(value)?;
        self.store.put_raw(self.key, &json)
    }
}
