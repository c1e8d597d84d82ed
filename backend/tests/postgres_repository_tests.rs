//! Integration tests for PostgresRepository.
//!
//! Requires a reachable database in `DATABASE_URL`; every test is skipped
//! otherwise.

#![cfg(feature = "postgres-repo")]

mod support;

use dog_api::db::repositories::{PostgresConfig, PostgresRepository};
use dog_api::db::repository::DogRepository;
use dog_api::models::{DogChanges, NewDog};

fn repository() -> Option<PostgresRepository> {
    // Read under the env lock; other tests in this binary modify DATABASE_URL.
    let url = match support::with_scoped_env(&[], || std::env::var("DATABASE_URL")) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        }
    };
    Some(PostgresRepository::new(PostgresConfig::with_url(url)).unwrap())
}

fn new_dog(name: &str) -> NewDog {
    NewDog {
        name: name.to_string(),
        breed: "Greyhound".to_string(),
        description: "Fast".to_string(),
        age: 6,
    }
}

#[test]
fn test_config_from_env() {
    support::with_scoped_env(
        &[
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", Some("postgres://localhost/dogs")),
            ("PG_POOL_MAX", Some("4")),
            ("PG_RETRY_DELAY_MS", Some("not-a-number")),
        ],
        || {
            let config = PostgresConfig::from_env().unwrap();
            assert_eq!(config.database_url, "postgres://localhost/dogs");
            assert_eq!(config.max_pool_size, 4);
            assert_eq!(config.retry_delay_ms, 100);
        },
    );
}

#[test]
fn test_config_from_env_requires_url() {
    support::with_scoped_env(&[("DATABASE_URL", None), ("PG_DATABASE_URL", None)], || {
        assert!(PostgresConfig::from_env().is_err());
    });
}

#[tokio::test]
async fn test_postgres_crud() {
    let Some(repo) = repository() else {
        return;
    };
    assert!(repo.health_check().await.unwrap());

    let created = repo.create_dog(&new_dog("Bolt")).await.unwrap();
    assert_eq!(repo.get_dog(created.id).await.unwrap(), created);

    let changes = DogChanges {
        age: Some(7),
        ..Default::default()
    };
    let updated = repo.update_dog(created.id, &changes).await.unwrap();
    assert_eq!(updated.age, 7);
    assert_eq!(updated.name, "Bolt");

    let unchanged = repo
        .update_dog(created.id, &DogChanges::default())
        .await
        .unwrap();
    assert_eq!(unchanged, updated);

    let listed = repo.list_dogs().await.unwrap();
    assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));

    let deleted = repo.delete_dog(created.id).await.unwrap();
    assert_eq!(deleted, updated);
    assert!(repo.get_dog(created.id).await.unwrap_err().is_not_found());
    assert!(repo.delete_dog(created.id).await.unwrap_err().is_not_found());

    let stats = repo.get_pool_stats();
    assert!(stats.total_queries > 0);
}
