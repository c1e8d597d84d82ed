//! Repository trait for dog persistence.
//!
//! The trait mirrors the operations of the relational store: list, find by id,
//! create, update and delete. Handlers only see `Arc<dyn DogRepository>`, so the
//! backend (in-memory or Postgres) is chosen once at startup.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::{Dog, DogChanges, DogId, NewDog};

/// Repository trait for dog records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request tasks.
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List every dog, ordered by id.
    async fn list_dogs(&self) -> RepositoryResult<Vec<Dog>>;

    /// Fetch a single dog.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no dog has this id
    async fn get_dog(&self, id: DogId) -> RepositoryResult<Dog>;

    /// Insert a dog and return it with its assigned id.
    async fn create_dog(&self, dog: &NewDog) -> RepositoryResult<Dog>;

    /// Apply `changes` to an existing dog and return the updated record.
    ///
    /// An empty change set returns the current record unchanged.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no dog has this id
    async fn update_dog(&self, id: DogId, changes: &DogChanges) -> RepositoryResult<Dog>;

    /// Remove a dog and return the record as it was before deletion.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no dog has this id
    async fn delete_dog(&self, id: DogId) -> RepositoryResult<Dog>;
}
