//! Shared application state for the bar.
//!
//! `Bar` owns one store per entity, the unsaved order draft and the
//! notification slot. Views read through the accessors and mutate only
//! through the operations below, each of which reports its outcome as a
//! notification instead of returning the error.

use barra_common::drink::{Drink, DrinkId, DrinkInput};
use barra_common::gateway::PersistenceGateway;
use barra_common::notification::Notification;
use barra_common::order::{LineItem, LineItemInput, Order, OrderDraft, OrderId};
use barra_common::premix::{Premix, PremixId, PremixInput};
use barra_common::shortage::{ShortageEntry, ShortageId};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::confirm::Confirm;
use crate::drink_store::DrinkStore;
use crate::error::StoreError;
use crate::notifier::Notifier;
use crate::order_store::OrderStore;
use crate::premix_store::PremixStore;
use crate::shortage_store::ShortageStore;

/// What the home screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub shortages: &'a [ShortageEntry],
    pub pending_premixes: Vec<&'a Premix>,
    /// Every cached order in backend order.
    pub orders: Vec<OrderLine<'a>>,
}

/// An order with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    pub label: String,
    pub order: &'a Order,
}

pub struct Bar<G, C> {
    gateway: G,
    confirm: C,
    notifier: Notifier,
    orders: OrderStore,
    premixes: PremixStore,
    drinks: DrinkStore,
    shortages: ShortageStore,
    draft: OrderDraft,
}

impl<G: PersistenceGateway, C: Confirm> Bar<G, C> {
    pub fn new(gateway: G, confirm: C) -> Self {
        Self::with_notifier(gateway, confirm, Notifier::new())
    }

    pub fn with_notifier(gateway: G, confirm: C, notifier: Notifier) -> Self {
        debug!(gateway = gateway.gateway_name(), "bar state created");
        Self {
            gateway,
            confirm,
            notifier,
            orders: OrderStore::new(),
            premixes: PremixStore::new(),
            drinks: DrinkStore::new(),
            shortages: ShortageStore::new(),
            draft: OrderDraft::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn premixes(&self) -> &PremixStore {
        &self.premixes
    }

    pub fn drinks(&self) -> &DrinkStore {
        &self.drinks
    }

    pub fn shortages(&self) -> &ShortageStore {
        &self.shortages
    }

    pub fn draft(&self) -> &[LineItem] {
        self.draft.items()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.notifier.subscribe()
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard {
            shortages: self.shortages.all(),
            pending_premixes: self.premixes.pending().collect(),
            orders: self
                .orders
                .all()
                .iter()
                .map(|order| OrderLine {
                    label: order.label(),
                    order,
                })
                .collect(),
        }
    }

    // Loading

    /// Load every collection. A failed load leaves that cache stale and
    /// raises its own error; the others still load.
    pub async fn refresh_all(&mut self) -> bool {
        let shortages = self.load_shortages().await;
        let premixes = self.load_premixes().await;
        let orders = self.load_orders().await;
        let drinks = self.load_drinks().await;
        shortages && premixes && orders && drinks
    }

    pub async fn load_orders(&mut self) -> bool {
        let result = self.orders.list(&self.gateway).await;
        self.report_load(result, "Failed to load orders.")
    }

    pub async fn load_premixes(&mut self) -> bool {
        let result = self.premixes.list(&self.gateway).await;
        self.report_load(result, "Failed to load premixes.")
    }

    pub async fn load_drinks(&mut self) -> bool {
        let result = self.drinks.list(&self.gateway).await;
        self.report_load(result, "Failed to load drinks.")
    }

    pub async fn load_shortages(&mut self) -> bool {
        let result = self.shortages.list(&self.gateway).await;
        self.report_load(result, "Failed to load the shortage list.")
    }

    // Orders

    /// Append a line item to the unsaved draft.
    pub fn add_line_item(&mut self, input: &LineItemInput) -> bool {
        let result = self.draft.add_line_item(input).map(drop).map_err(StoreError::from);
        self.report(result, "Line item added.", "Failed to add the line item.")
            .is_some()
    }

    /// Send the draft as a new order. The draft is cleared only on success.
    pub async fn create_order(&mut self) -> Option<Order> {
        let items = self.draft.items().to_vec();
        let result = self.orders.create(&self.gateway, items).await;
        let order = self.report(result, "Order created.", "Failed to create the order.")?;
        self.draft.clear();
        Some(order)
    }

    pub async fn mark_received(
        &mut self,
        id: &OrderId,
        comment: &str,
        received_by: &str,
    ) -> Option<Order> {
        let result = self
            .orders
            .mark_received(&self.gateway, id, comment, received_by)
            .await;
        self.report(
            result,
            "Order marked as received.",
            "Failed to update the order.",
        )
    }

    pub async fn delete_order(&mut self, id: &OrderId) -> bool {
        if !self.confirmed("Delete this order?").await {
            return false;
        }
        let result = self.orders.delete(&self.gateway, id).await;
        self.report(result, "Order deleted.", "Failed to delete the order.")
            .is_some()
    }

    // Premixes

    pub async fn create_premix(&mut self, input: &PremixInput) -> Option<Premix> {
        let result = self.premixes.create(&self.gateway, input).await;
        self.report(result, "Premix created.", "Failed to create the premix.")
    }

    pub async fn toggle_premix(&mut self, id: &PremixId) -> Option<Premix> {
        match self.premixes.toggle_status(&self.gateway, id).await {
            Ok(premix) => {
                let message = if premix.pending {
                    "Premix marked as pending."
                } else {
                    "Premix marked as ready."
                };
                self.notifier.success(message);
                Some(premix)
            }
            Err(err) => {
                self.fail(err, "Failed to update the premix status.");
                None
            }
        }
    }

    pub async fn delete_premix(&mut self, id: &PremixId) -> bool {
        if !self.confirmed("Delete this premix?").await {
            return false;
        }
        let result = self.premixes.delete(&self.gateway, id).await;
        self.report(result, "Premix deleted.", "Failed to delete the premix.")
            .is_some()
    }

    // Drinks

    pub async fn create_drink(&mut self, input: &DrinkInput) -> Option<Drink> {
        let result = self.drinks.create(&self.gateway, input).await;
        self.report(result, "Drink created.", "Failed to create the drink.")
    }

    pub async fn update_drink(&mut self, id: &DrinkId, input: &DrinkInput) -> Option<Drink> {
        let result = self.drinks.update(&self.gateway, id, input).await;
        self.report(result, "Drink updated.", "Failed to update the drink.")
    }

    pub async fn delete_drink(&mut self, id: &DrinkId) -> bool {
        if !self.confirmed("Delete this drink?").await {
            return false;
        }
        let result = self.drinks.delete(&self.gateway, id).await;
        self.report(result, "Drink deleted.", "Failed to delete the drink.")
            .is_some()
    }

    // Shortages

    /// Quick-add one unit of `name`.
    pub async fn add_shortage(&mut self, name: &str) -> Option<ShortageEntry> {
        let result = self.shortages.add_quick(&self.gateway, name).await;
        self.report(
            result,
            "Added to the shortage list.",
            "Failed to add to the shortage list.",
        )
    }

    pub async fn add_shortage_with(
        &mut self,
        name: &str,
        quantity: impl Into<f64>,
        unit: &str,
    ) -> Option<ShortageEntry> {
        let result = self.shortages.add(&self.gateway, name, quantity, unit).await;
        self.report(
            result,
            "Added to the shortage list.",
            "Failed to add to the shortage list.",
        )
    }

    pub async fn delete_shortage(&mut self, id: &ShortageId) -> bool {
        if !self.confirmed("Remove this item from the shortage list?").await {
            return false;
        }
        let result = self.shortages.delete(&self.gateway, id).await;
        self.report(
            result,
            "Removed from the shortage list.",
            "Failed to remove from the shortage list.",
        )
        .is_some()
    }

    // Reporting

    async fn confirmed(&self, prompt: &str) -> bool {
        let answer = self.confirm.confirm(prompt).await;
        if !answer {
            debug!(prompt, "cancelled");
        }
        answer
    }

    fn report<T>(&mut self, result: Result<T, StoreError>, success: &str, failure: &str) -> Option<T> {
        match result {
            Ok(value) => {
                self.notifier.success(success);
                Some(value)
            }
            Err(err) => {
                self.fail(err, failure);
                None
            }
        }
    }

    /// Loads stay quiet when they succeed.
    fn report_load(&mut self, result: Result<(), StoreError>, failure: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.fail(err, failure);
                false
            }
        }
    }

    fn fail(&mut self, err: StoreError, failure: &str) {
        match err {
            StoreError::Validation(err) => self.notifier.error(sentence(&err.to_string())),
            err => {
                warn!(%err, "{failure}");
                self.notifier.error(failure);
            }
        }
    }
}

/// Capitalize and terminate a validation message for display.
fn sentence(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
