//! Storage abstraction for persisting floor plans.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::canvas::FloorPlan;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Plan not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for floor plan storage backends.
pub trait Storage: Send + Sync {
    /// Save a plan under `id`, replacing any previous version.
    fn save(&self, id: &str, plan: &FloorPlan) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a plan.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<FloorPlan>>;

    /// Check whether a plan is stored under `id`.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
