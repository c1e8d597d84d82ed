//! In-memory local repository implementation.
//!
//! Dogs are kept in a `BTreeMap` keyed by id, which gives the same ascending
//! id ordering as the Postgres listing. Suitable for unit tests and local
//! development where isolation and speed matter more than durability.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::{DogRepository, RepositoryError, RepositoryResult};
use crate::models::{Dog, DogChanges, DogId, NewDog};

/// In-memory local repository.
///
/// Clones share the same underlying data.
///
/// # Example
/// ```
/// use dog_api::db::repositories::LocalRepository;
/// use dog_api::models::NewDog;
///
/// let repo = LocalRepository::new();
/// let id = repo.insert_dog_impl(NewDog {
///     name: "Rex".into(),
///     breed: "Lab".into(),
///     description: "Friendly".into(),
///     age: 3,
/// });
/// assert_eq!(id, 1);
/// assert!(repo.has_dog(id));
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    dogs: BTreeMap<DogId, Dog>,
    // Ids are never reused, mirroring a SERIAL column
    next_dog_id: DogId,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            dogs: BTreeMap::new(),
            next_dog_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Insert a dog directly, bypassing the health check.
    ///
    /// Helper for setting up test data. Returns the assigned id.
    pub fn insert_dog_impl(&self, dog: NewDog) -> DogId {
        let mut data = self.data.write();
        let id = data.next_dog_id;
        data.next_dog_id += 1;
        data.dogs.insert(id, dog.into_dog(id));
        id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. Id assignment restarts at 1.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of dogs stored.
    pub fn dog_count(&self) -> usize {
        self.data.read().dogs.len()
    }

    /// Check if a dog exists.
    pub fn has_dog(&self, id: DogId) -> bool {
        self.data.read().dogs.contains_key(&id)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DogRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_dogs(&self) -> RepositoryResult<Vec<Dog>> {
        self.check_health()?;
        Ok(self.data.read().dogs.values().cloned().collect())
    }

    async fn get_dog(&self, id: DogId) -> RepositoryResult<Dog> {
        self.check_health()?;
        self.data
            .read()
            .dogs
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::dog_not_found("get_dog", id))
    }

    async fn create_dog(&self, dog: &NewDog) -> RepositoryResult<Dog> {
        self.check_health()?;
        let id = self.insert_dog_impl(dog.clone());
        Ok(dog.clone().into_dog(id))
    }

    async fn update_dog(&self, id: DogId, changes: &DogChanges) -> RepositoryResult<Dog> {
        self.check_health()?;
        let mut data = self.data.write();
        let dog = data
            .dogs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::dog_not_found("update_dog", id))?;
        changes.apply_to(dog);
        Ok(dog.clone())
    }

    async fn delete_dog(&self, id: DogId) -> RepositoryResult<Dog> {
        self.check_health()?;
        self.data
            .write()
            .dogs
            .remove(&id)
            .ok_or_else(|| RepositoryError::dog_not_found("delete_dog", id))
    }
}
