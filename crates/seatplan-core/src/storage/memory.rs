//! In-process plan store.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::canvas::FloorPlan;
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps plans as serialized JSON, so a load goes through the same
/// `FloorPlan::from_json` path as the file store.
#[derive(Default)]
pub struct MemoryStorage {
    plans: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Other("plan store lock poisoned".to_string())
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, plan: &FloorPlan) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let json = plan.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            self.plans.write().map_err(poisoned)?.insert(id, json);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<FloorPlan>> {
        let id = id.to_string();
        Box::pin(async move {
            let plans = self.plans.read().map_err(poisoned)?;
            let json = plans.get(&id).ok_or_else(|| StorageError::NotFound(id.clone()))?;
            FloorPlan::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.plans.read().map_err(poisoned)?.contains_key(&id)) })
    }
}
