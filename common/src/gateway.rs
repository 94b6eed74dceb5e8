use thiserror::Error;

use crate::drink::{Drink, DrinkId, NewDrink};
use crate::order::{NewOrder, Order, OrderId, StatusChange};
use crate::premix::{NewPremix, PendingChange, Premix, PremixId};
use crate::shortage::{NewShortage, ShortageEntry, ShortageId};

/// Errors from the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// The backend answered with a non-success status.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The backend has no record with this id.
    #[error("not found: {0}")]
    NotFound(String),
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The bar backend: source of truth for every entity.
///
/// One method per entity operation. Identifiers are assigned by the backend;
/// the returned records carry them along with server-side timestamps.
/// Implementations:
/// - `HttpGateway` talks to the REST backend
/// - `MemoryGateway` keeps everything in process (development and tests)
#[allow(async_fn_in_trait)]
pub trait PersistenceGateway {
    async fn list_orders(&self) -> Result<Vec<Order>, PersistenceError>;

    async fn create_order(&self, order: &NewOrder) -> Result<Order, PersistenceError>;

    async fn set_order_status(
        &self,
        id: &OrderId,
        change: &StatusChange,
    ) -> Result<Order, PersistenceError>;

    async fn delete_order(&self, id: &OrderId) -> Result<(), PersistenceError>;

    async fn list_premixes(&self) -> Result<Vec<Premix>, PersistenceError>;

    async fn create_premix(&self, premix: &NewPremix) -> Result<Premix, PersistenceError>;

    async fn set_premix_pending(
        &self,
        id: &PremixId,
        change: PendingChange,
    ) -> Result<Premix, PersistenceError>;

    async fn delete_premix(&self, id: &PremixId) -> Result<(), PersistenceError>;

    async fn list_drinks(&self) -> Result<Vec<Drink>, PersistenceError>;

    async fn create_drink(&self, drink: &NewDrink) -> Result<Drink, PersistenceError>;

    async fn update_drink(&self, id: &DrinkId, drink: &NewDrink) -> Result<Drink, PersistenceError>;

    async fn delete_drink(&self, id: &DrinkId) -> Result<(), PersistenceError>;

    async fn list_shortages(&self) -> Result<Vec<ShortageEntry>, PersistenceError>;

    async fn add_shortage(&self, entry: &NewShortage) -> Result<ShortageEntry, PersistenceError>;

    async fn delete_shortage(&self, id: &ShortageId) -> Result<(), PersistenceError>;

    /// Human-readable backend name (e.g. "http", "memory").
    fn gateway_name(&self) -> &str;
}
