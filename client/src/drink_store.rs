use barra_common::drink::{Drink, DrinkId, DrinkInput};
use barra_common::gateway::PersistenceGateway;
use tracing::{debug, info};

use crate::error::StoreError;

/// Cached drink catalog in backend order.
#[derive(Debug, Clone, Default)]
pub struct DrinkStore {
    drinks: Vec<Drink>,
}

impl DrinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn get(&self, id: &DrinkId) -> Option<&Drink> {
        self.drinks.iter().find(|d| d.id == *id)
    }

    pub async fn list<G: PersistenceGateway>(&mut self, gateway: &G) -> Result<(), StoreError> {
        let drinks = gateway.list_drinks().await.map_err(StoreError::Fetch)?;
        debug!(count = drinks.len(), "drinks loaded");
        self.drinks = drinks;
        Ok(())
    }

    pub async fn create<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        input: &DrinkInput,
    ) -> Result<Drink, StoreError> {
        let request = input.validate()?;
        let drink = gateway.create_drink(&request).await?;
        info!(id = %drink.id, name = %drink.name, "drink created");
        self.drinks.push(drink.clone());
        Ok(drink)
    }

    /// Validate like `create`, then replace the cached drink with the backend's copy.
    pub async fn update<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &DrinkId,
        input: &DrinkInput,
    ) -> Result<Drink, StoreError> {
        let request = input.validate()?;
        let drink = gateway.update_drink(id, &request).await?;
        info!(%id, "drink updated");
        match self.drinks.iter_mut().find(|d| d.id == *id) {
            Some(slot) => *slot = drink.clone(),
            None => self.drinks.push(drink.clone()),
        }
        Ok(drink)
    }

    pub async fn delete<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &DrinkId,
    ) -> Result<(), StoreError> {
        gateway.delete_drink(id).await?;
        info!(%id, "drink deleted");
        self.drinks.retain(|d| d.id != *id);
        Ok(())
    }
}
