use barra_common::gateway::PersistenceGateway;
use barra_common::premix::{PendingChange, Premix, PremixId, PremixInput};
use barra_common::validation::ValidationError;
use tracing::{debug, info};

use crate::error::StoreError;

/// Cached premixes in backend order.
#[derive(Debug, Clone, Default)]
pub struct PremixStore {
    premixes: Vec<Premix>,
}

impl PremixStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Premix] {
        &self.premixes
    }

    pub fn get(&self, id: &PremixId) -> Option<&Premix> {
        self.premixes.iter().find(|p| p.id == *id)
    }

    /// Premixes that still have to be made.
    pub fn pending(&self) -> impl Iterator<Item = &Premix> {
        self.premixes.iter().filter(|p| p.pending)
    }

    pub async fn list<G: PersistenceGateway>(&mut self, gateway: &G) -> Result<(), StoreError> {
        let premixes = gateway.list_premixes().await.map_err(StoreError::Fetch)?;
        debug!(count = premixes.len(), "premixes loaded");
        self.premixes = premixes;
        Ok(())
    }

    pub async fn create<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        input: &PremixInput,
    ) -> Result<Premix, StoreError> {
        let request = input.validate()?;
        let premix = gateway.create_premix(&request).await?;
        info!(id = %premix.id, name = %premix.name, "premix created");
        self.premixes.push(premix.clone());
        Ok(premix)
    }

    /// Flip `pending` by sending the negation of the cached value, then adopt
    /// whatever the backend returns.
    ///
    /// Two toggles racing on a stale cached value both send the same negation;
    /// the last response to arrive wins.
    pub async fn toggle_status<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &PremixId,
    ) -> Result<Premix, StoreError> {
        let current = self
            .get(id)
            .ok_or_else(|| ValidationError::NotLoaded { id: id.to_string() })?;
        let change = PendingChange {
            pending: !current.pending,
        };
        let updated = gateway.set_premix_pending(id, change).await?;
        info!(%id, pending = updated.pending, "premix status changed");
        self.replace(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &PremixId,
    ) -> Result<(), StoreError> {
        gateway.delete_premix(id).await?;
        info!(%id, "premix deleted");
        self.premixes.retain(|p| p.id != *id);
        Ok(())
    }

    fn replace(&mut self, id: &PremixId, premix: Premix) {
        match self.premixes.iter_mut().find(|p| p.id == *id) {
            Some(slot) => *slot = premix,
            None => self.premixes.push(premix),
        }
    }
}
