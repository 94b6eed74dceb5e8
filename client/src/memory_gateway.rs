use std::sync::{Mutex, MutexGuard, PoisonError};

use barra_common::drink::{Drink, DrinkId, NewDrink};
use barra_common::gateway::{PersistenceError, PersistenceGateway};
use barra_common::order::{NewOrder, Order, OrderId, OrderStatus, StatusChange};
use barra_common::premix::{NewPremix, PendingChange, Premix, PremixId};
use barra_common::shortage::{NewShortage, ShortageEntry, ShortageId};
use chrono::Utc;

/// A request as the memory gateway received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListOrders,
    CreateOrder(NewOrder),
    SetOrderStatus(OrderId, StatusChange),
    DeleteOrder(OrderId),
    ListPremixes,
    CreatePremix(NewPremix),
    SetPremixPending(PremixId, PendingChange),
    DeletePremix(PremixId),
    ListDrinks,
    CreateDrink(NewDrink),
    UpdateDrink(DrinkId, NewDrink),
    DeleteDrink(DrinkId),
    ListShortages,
    AddShortage(NewShortage),
    DeleteShortage(ShortageId),
}

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<Order>,
    premixes: Vec<Premix>,
    drinks: Vec<Drink>,
    shortages: Vec<ShortageEntry>,
    next_order: u64,
    next_premix: u64,
    next_drink: u64,
    next_shortage: u64,
    calls: Vec<GatewayCall>,
    failures_pending: usize,
    offline: bool,
}

/// In-process backend for development and tests.
///
/// Assigns ids (`o1`, `p1`, `d1`, `s1`, ...) and creation timestamps the way
/// the real backend does, records every call, and can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: Mutex<Tables>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` calls with [`PersistenceError::Unreachable`].
    pub fn fail_next(&self, count: usize) {
        self.tables().failures_pending += count;
    }

    /// While offline every call fails.
    pub fn set_offline(&self, offline: bool) {
        self.tables().offline = offline;
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.tables().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.tables().calls.len()
    }

    pub fn clear_calls(&self) {
        self.tables().calls.clear();
    }

    /// Server-side orders, bypassing the call log.
    pub fn orders(&self) -> Vec<Order> {
        self.tables().orders.clone()
    }

    pub fn premixes(&self) -> Vec<Premix> {
        self.tables().premixes.clone()
    }

    pub fn drinks(&self) -> Vec<Drink> {
        self.tables().drinks.clone()
    }

    pub fn shortages(&self) -> Vec<ShortageEntry> {
        self.tables().shortages.clone()
    }

    /// Seed a premix directly, e.g. one toggled from another session.
    pub fn insert_premix(&self, premix: Premix) {
        self.tables().premixes.push(premix);
    }

    pub fn insert_order(&self, order: Order) {
        self.tables().orders.push(order);
    }

    pub fn insert_shortage(&self, entry: ShortageEntry) {
        self.tables().shortages.push(entry);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log the call and apply any injected failure.
    fn begin(&self, call: GatewayCall) -> Result<MutexGuard<'_, Tables>, PersistenceError> {
        let mut tables = self.tables();
        tracing::debug!(?call, "memory gateway call");
        tables.calls.push(call);
        if tables.offline {
            return Err(PersistenceError::Unreachable("memory gateway is offline".into()));
        }
        if tables.failures_pending > 0 {
            tables.failures_pending -= 1;
            return Err(PersistenceError::Unreachable("injected failure".into()));
        }
        Ok(tables)
    }
}

fn next_id(counter: &mut u64, prefix: &str) -> String {
    *counter += 1;
    format!("{prefix}{counter}")
}

fn not_found(id: &impl std::fmt::Display) -> PersistenceError {
    PersistenceError::NotFound(id.to_string())
}

impl PersistenceGateway for MemoryGateway {
    async fn list_orders(&self) -> Result<Vec<Order>, PersistenceError> {
        let tables = self.begin(GatewayCall::ListOrders)?;
        Ok(tables.orders.clone())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, PersistenceError> {
        let mut tables = self.begin(GatewayCall::CreateOrder(order.clone()))?;
        let id = next_id(&mut tables.next_order, "o");
        let created = Order {
            id: OrderId(id),
            created_at: Utc::now(),
            items: order.items.clone(),
            status: OrderStatus::Pending,
            received_comment: None,
            received_by: None,
        };
        tables.orders.push(created.clone());
        Ok(created)
    }

    async fn set_order_status(
        &self,
        id: &OrderId,
        change: &StatusChange,
    ) -> Result<Order, PersistenceError> {
        let mut tables = self.begin(GatewayCall::SetOrderStatus(id.clone(), change.clone()))?;
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or_else(|| not_found(id))?;
        if !order.status.can_transition_to(change.status) {
            return Err(PersistenceError::Rejected {
                status: 409,
                message: format!("order {id} cannot move from {:?} to {:?}", order.status, change.status),
            });
        }
        order.status = change.status;
        order.received_comment = change.comment.clone();
        order.received_by = change.received_by.clone();
        Ok(order.clone())
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), PersistenceError> {
        let mut tables = self.begin(GatewayCall::DeleteOrder(id.clone()))?;
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != *id);
        if tables.orders.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_premixes(&self) -> Result<Vec<Premix>, PersistenceError> {
        let tables = self.begin(GatewayCall::ListPremixes)?;
        Ok(tables.premixes.clone())
    }

    async fn create_premix(&self, premix: &NewPremix) -> Result<Premix, PersistenceError> {
        let mut tables = self.begin(GatewayCall::CreatePremix(premix.clone()))?;
        let id = next_id(&mut tables.next_premix, "p");
        let created = Premix {
            id: PremixId(id),
            name: premix.name.clone(),
            description: premix.description.clone(),
            instructions: premix.instructions.clone(),
            image: premix.image.clone(),
            ingredients: premix.ingredients.clone(),
            pending: premix.pending,
        };
        tables.premixes.push(created.clone());
        Ok(created)
    }

    async fn set_premix_pending(
        &self,
        id: &PremixId,
        change: PendingChange,
    ) -> Result<Premix, PersistenceError> {
        let mut tables = self.begin(GatewayCall::SetPremixPending(id.clone(), change))?;
        let premix = tables
            .premixes
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| not_found(id))?;
        premix.pending = change.pending;
        Ok(premix.clone())
    }

    async fn delete_premix(&self, id: &PremixId) -> Result<(), PersistenceError> {
        let mut tables = self.begin(GatewayCall::DeletePremix(id.clone()))?;
        let before = tables.premixes.len();
        tables.premixes.retain(|p| p.id != *id);
        if tables.premixes.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_drinks(&self) -> Result<Vec<Drink>, PersistenceError> {
        let tables = self.begin(GatewayCall::ListDrinks)?;
        Ok(tables.drinks.clone())
    }

    async fn create_drink(&self, drink: &NewDrink) -> Result<Drink, PersistenceError> {
        let mut tables = self.begin(GatewayCall::CreateDrink(drink.clone()))?;
        let id = next_id(&mut tables.next_drink, "d");
        let created = Drink {
            id: DrinkId(id),
            name: drink.name.clone(),
            instructions: drink.instructions.clone(),
            image: drink.image.clone(),
            ingredients: drink.ingredients.clone(),
        };
        tables.drinks.push(created.clone());
        Ok(created)
    }

    async fn update_drink(&self, id: &DrinkId, drink: &NewDrink) -> Result<Drink, PersistenceError> {
        let mut tables = self.begin(GatewayCall::UpdateDrink(id.clone(), drink.clone()))?;
        let stored = tables
            .drinks
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or_else(|| not_found(id))?;
        stored.name = drink.name.clone();
        stored.instructions = drink.instructions.clone();
        stored.image = drink.image.clone();
        stored.ingredients = drink.ingredients.clone();
        Ok(stored.clone())
    }

    async fn delete_drink(&self, id: &DrinkId) -> Result<(), PersistenceError> {
        let mut tables = self.begin(GatewayCall::DeleteDrink(id.clone()))?;
        let before = tables.drinks.len();
        tables.drinks.retain(|d| d.id != *id);
        if tables.drinks.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_shortages(&self) -> Result<Vec<ShortageEntry>, PersistenceError> {
        let tables = self.begin(GatewayCall::ListShortages)?;
        Ok(tables.shortages.clone())
    }

    async fn add_shortage(&self, entry: &NewShortage) -> Result<ShortageEntry, PersistenceError> {
        let mut tables = self.begin(GatewayCall::AddShortage(entry.clone()))?;
        let id = next_id(&mut tables.next_shortage, "s");
        let created = ShortageEntry {
            id: ShortageId(id),
            name: entry.name.clone(),
            quantity: entry.quantity,
            unit: entry.unit.clone(),
        };
        tables.shortages.push(created.clone());
        Ok(created)
    }

    async fn delete_shortage(&self, id: &ShortageId) -> Result<(), PersistenceError> {
        let mut tables = self.begin(GatewayCall::DeleteShortage(id.clone()))?;
        let before = tables.shortages.len();
        tables.shortages.retain(|s| s.id != *id);
        if tables.shortages.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn gateway_name(&self) -> &str {
        "memory"
    }
}
