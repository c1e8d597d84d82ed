//! High-level database service layer.
//!
//! Repository-agnostic functions used by the HTTP handlers. They add logging
//! around each repository call so every backend reports writes and failures
//! the same way.
//!
//! # Usage
//!
//! ```no_run
//! use dog_api::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let dogs = services::list_dogs(&repo).await?;
//!     println!("Found {} dogs", dogs.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info, warn};

use super::repository::{DogRepository, RepositoryResult};
use crate::models::{Dog, DogChanges, DogId, NewDog};

/// Log a failed repository call. Not-found is expected traffic and only
/// logged at debug level.
fn log_failure<T>(result: RepositoryResult<T>, operation: &str) -> RepositoryResult<T> {
    if let Err(e) = &result {
        if e.is_not_found() {
            debug!("Service layer: {} found no record: {}", operation, e);
        } else {
            warn!("Service layer: {} failed: {}", operation, e);
        }
    }
    result
}

/// Check if the database connection is healthy.
pub async fn health_check<R: DogRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List every dog, ordered by id.
pub async fn list_dogs<R: DogRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Dog>> {
    debug!("Service layer: listing all dogs");
    log_failure(repo.list_dogs().await, "list_dogs")
}

/// Retrieve a dog by id.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` if no dog has this id
pub async fn get_dog<R: DogRepository + ?Sized>(repo: &R, id: DogId) -> RepositoryResult<Dog> {
    debug!("Service layer: loading dog {}", id);
    log_failure(repo.get_dog(id).await, "get_dog")
}

/// Store a new dog and return it with its assigned id.
pub async fn create_dog<R: DogRepository + ?Sized>(
    repo: &R,
    dog: &NewDog,
) -> RepositoryResult<Dog> {
    let created = log_failure(repo.create_dog(dog).await, "create_dog")?;
    info!(
        "Service layer: created dog {} ('{}', {})",
        created.id, created.name, created.breed
    );
    Ok(created)
}

/// Apply a partial update to a dog.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` if no dog has this id
pub async fn update_dog<R: DogRepository + ?Sized>(
    repo: &R,
    id: DogId,
    changes: &DogChanges,
) -> RepositoryResult<Dog> {
    let updated = log_failure(repo.update_dog(id, changes).await, "update_dog")?;
    info!("Service layer: updated dog {} with {:?}", id, changes);
    Ok(updated)
}

/// Delete a dog and return its last stored state.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` if no dog has this id
pub async fn delete_dog<R: DogRepository + ?Sized>(repo: &R, id: DogId) -> RepositoryResult<Dog> {
    let deleted = log_failure(repo.delete_dog(id).await, "delete_dog")?;
    info!("Service layer: deleted dog {} ('{}')", deleted.id, deleted.name);
    Ok(deleted)
}
