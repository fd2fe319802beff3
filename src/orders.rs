//! Orders, kept in the order they were placed.

use log::info;

use crate::app_response::AppResponse;
use crate::collection::{PersistedCollection, Renderer};
use crate::local_store::KeyValueStore;
use crate::record_id::{create_id, ORDER_PREFIX};
use crate::records::{Order, ProductCard, ORDERS_KEY};
use crate::timestamps::timestamp;

pub struct Orders<'s> {
    orders: PersistedCollection<'s, Order>,
}

impl<'s> Orders<'s> {
    pub fn new(store: &'s dyn KeyValueStore, renderer: Option<&'s Renderer<Order>>) -> Self {
        Self {
            orders: PersistedCollection::new(store, ORDERS_KEY).with_renderer(renderer),
        }
    }

    /// Places an order for the card's product and returns it; its id is the
    /// confirmation number.
    pub fn place(&self, card: ProductCard) -> Result<Order, AppResponse> {
        let order = Order {
            id: create_id(ORDER_PREFIX),
            name: card.name,
            price: card.price,
            image: card.image,
            date: timestamp(),
        };
        self.orders.append(order.clone())?;
        info!("Order placed: {}", order.id);
        Ok(order)
    }

    /// Unknown ids are not an error; the list is simply unchanged.
    pub fn cancel(&self, id: &str) -> Result<Vec<Order>, AppResponse> {
        self.orders.remove_where(|order| order.id == id)
    }

    pub fn list(&self) -> Vec<Order> {
        self.orders.load()
    }
}
