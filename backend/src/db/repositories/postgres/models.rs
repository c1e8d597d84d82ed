use diesel::prelude::*;

use super::schema::dogs;
use crate::models::{Dog, DogChanges, NewDog};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DogRow {
    pub id: i32,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

impl From<DogRow> for Dog {
    fn from(row: DogRow) -> Self {
        Dog {
            id: row.id,
            name: row.name,
            breed: row.breed,
            description: row.description,
            age: row.age,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dogs)]
pub struct NewDogRow {
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

impl From<NewDog> for NewDogRow {
    fn from(dog: NewDog) -> Self {
        NewDogRow {
            name: dog.name,
            breed: dog.breed,
            description: dog.description,
            age: dog.age,
        }
    }
}

/// `None` fields are skipped by the generated `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = dogs)]
pub struct DogChangesRow {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub age: Option<i32>,
}

impl From<DogChanges> for DogChangesRow {
    fn from(changes: DogChanges) -> Self {
        DogChangesRow {
            name: changes.name,
            breed: changes.breed,
            description: changes.description,
            age: changes.age,
        }
    }
}
