use barra_common::gateway::PersistenceGateway;
use barra_common::order::{LineItem, NewOrder, Order, OrderId, StatusChange};
use barra_common::validation::ValidationError;
use tracing::{debug, info};

use crate::error::StoreError;

/// Cached orders in the order the backend returned them (creation time
/// ascending). Pending and received are views filtered on status; nothing
/// here re-sorts. Every mutation is applied only after the backend
/// acknowledged it.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cached order, in backend order.
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn pending(&self) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.is_pending()).collect()
    }

    pub fn received(&self) -> Vec<&Order> {
        self.orders.iter().filter(|o| !o.is_pending()).collect()
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == *id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Replace the cache with the backend's full list.
    ///
    /// On failure the cache stays as it was.
    pub async fn list<G: PersistenceGateway>(&mut self, gateway: &G) -> Result<(), StoreError> {
        let orders = gateway.list_orders().await.map_err(StoreError::Fetch)?;
        let pending = orders.iter().filter(|o| o.is_pending()).count();
        debug!(pending, received = orders.len() - pending, "orders loaded");
        self.orders = orders;
        Ok(())
    }

    /// Persist a new order and append the backend's copy.
    ///
    /// An empty item list is rejected before the gateway is called.
    pub async fn create<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        items: Vec<LineItem>,
    ) -> Result<Order, StoreError> {
        let request = NewOrder::new(items)?;
        let order = gateway.create_order(&request).await?;
        info!(id = %order.id, items = order.items.len(), "order created");
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Move an order from pending to received.
    ///
    /// `comment` and `received_by` must be non-blank. The backend's copy
    /// replaces the cached one where it stands, so the id is received exactly
    /// once; an order that was not cached is appended.
    pub async fn mark_received<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &OrderId,
        comment: &str,
        received_by: &str,
    ) -> Result<Order, StoreError> {
        let change = StatusChange::received(comment, received_by)?;
        if self.get(id).is_some_and(|o| !o.is_pending()) {
            return Err(ValidationError::AlreadyReceived { id: id.to_string() }.into());
        }
        let order = gateway.set_order_status(id, &change).await?;
        info!(%id, received_by, "order received");
        match self.orders.iter().position(|o| o.id == *id) {
            Some(index) => self.orders[index] = order.clone(),
            None => self.orders.push(order.clone()),
        }
        Ok(order)
    }

    pub async fn delete<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &OrderId,
    ) -> Result<(), StoreError> {
        gateway.delete_order(id).await?;
        info!(%id, "order deleted");
        self.orders.retain(|o| o.id != *id);
        Ok(())
    }
}
