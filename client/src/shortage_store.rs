use barra_common::gateway::PersistenceGateway;
use barra_common::shortage::{NewShortage, ShortageEntry, ShortageId};
use tracing::{debug, info};

use crate::error::StoreError;

/// Cached restock list in backend order.
#[derive(Debug, Clone, Default)]
pub struct ShortageStore {
    entries: Vec<ShortageEntry>,
}

impl ShortageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[ShortageEntry] {
        &self.entries
    }

    pub fn contains(&self, id: &ShortageId) -> bool {
        self.entries.iter().any(|e| e.id == *id)
    }

    pub async fn list<G: PersistenceGateway>(&mut self, gateway: &G) -> Result<(), StoreError> {
        let entries = gateway.list_shortages().await.map_err(StoreError::Fetch)?;
        debug!(count = entries.len(), "shortages loaded");
        self.entries = entries;
        Ok(())
    }

    /// Add `name` with the given quantity and unit. Blank names never reach the gateway.
    pub async fn add<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        name: &str,
        quantity: impl Into<f64>,
        unit: &str,
    ) -> Result<ShortageEntry, StoreError> {
        let request = NewShortage::new(name, quantity, unit)?;
        self.submit(gateway, request).await
    }

    /// Add one unit of `name`.
    pub async fn add_quick<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        name: &str,
    ) -> Result<ShortageEntry, StoreError> {
        let request = NewShortage::quick(name)?;
        self.submit(gateway, request).await
    }

    /// Deleting an id that is not cached leaves the cache as it is,
    /// whatever the backend answers.
    pub async fn delete<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        id: &ShortageId,
    ) -> Result<(), StoreError> {
        gateway.delete_shortage(id).await?;
        info!(%id, "shortage deleted");
        self.entries.retain(|e| e.id != *id);
        Ok(())
    }

    async fn submit<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
        request: NewShortage,
    ) -> Result<ShortageEntry, StoreError> {
        let entry = gateway.add_shortage(&request).await?;
        info!(id = %entry.id, name = %entry.name, "shortage added");
        self.entries.push(entry.clone());
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barra_common::quantity::Quantity;

    use crate::memory_gateway::MemoryGateway;

    #[tokio::test]
    async fn blank_name_never_reaches_gateway() {
        let gateway = MemoryGateway::new();
        let mut store = ShortageStore::new();

        let err = store.add_quick(&gateway, "  ").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(gateway.call_count(), 0);
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn quick_add_records_one_unit() {
        let gateway = MemoryGateway::new();
        let mut store = ShortageStore::new();

        let entry = store.add_quick(&gateway, "Ice").await.unwrap();

        assert_eq!(entry.quantity, Quantity::from(1));
        assert_eq!(entry.unit, "unidad");
        assert!(store.contains(&entry.id));
    }

    #[tokio::test]
    async fn add_with_quantity_and_unit() {
        let gateway = MemoryGateway::new();
        let mut store = ShortageStore::new();

        let entry = store.add(&gateway, "Tonic", 24, "botella").await.unwrap();

        assert_eq!(store.all(), [entry]);
        assert_eq!(gateway.shortages()[0].quantity, Quantity::from(24));
    }

    #[tokio::test]
    async fn deleting_uncached_entry_is_a_no_op_either_way() {
        let gateway = MemoryGateway::new();
        let mut store = ShortageStore::new();
        store.add_quick(&gateway, "Ice").await.unwrap();
        let before = store.all().to_vec();
        let ghost = ShortageId::from("s42");

        // Backend says not found.
        assert!(store.delete(&gateway, &ghost).await.is_err());
        assert_eq!(store.all(), before);

        // Backend is down.
        gateway.fail_next(1);
        assert!(store.delete(&gateway, &ghost).await.is_err());
        assert_eq!(store.all(), before);

        // Backend had it even though we never loaded it.
        gateway.insert_shortage(ShortageEntry {
            id: ghost.clone(),
            name: "Limes".into(),
            quantity: Quantity::from(2),
            unit: "kilo".into(),
        });
        store.delete(&gateway, &ghost).await.unwrap();
        assert_eq!(store.all(), before);
    }

    #[tokio::test]
    async fn deleting_cached_entry_removes_it() {
        let gateway = MemoryGateway::new();
        let mut store = ShortageStore::new();
        let entry = store.add_quick(&gateway, "Ice").await.unwrap();

        store.delete(&gateway, &entry.id).await.unwrap();
        assert!(!store.contains(&entry.id));
    }
}
