//! Dog record types shared by the HTTP layer and the repositories.

use serde::{Deserialize, Serialize};

/// Store-assigned primary key of a dog record.
pub type DogId = i32;

/// A persisted dog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

/// Data required to create a dog. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

impl NewDog {
    pub fn into_dog(self, id: DogId) -> Dog {
        Dog {
            id,
            name: self.name,
            breed: self.breed,
            description: self.description,
            age: self.age,
        }
    }
}

/// Partial update of a dog. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl DogChanges {
    /// True when no field would be modified.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.breed.is_none()
            && self.description.is_none()
            && self.age.is_none()
    }

    /// Apply the present fields to `dog` in place.
    pub fn apply_to(&self, dog: &mut Dog) {
        if let Some(name) = &self.name {
            dog.name = name.clone();
        }
        if let Some(breed) = &self.breed {
            dog.breed = breed.clone();
        }
        if let Some(description) = &self.description {
            dog.description = description.clone();
        }
        if let Some(age) = self.age {
            dog.age = age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rex() -> Dog {
        NewDog {
            name: "Rex".to_string(),
            breed: "Lab".to_string(),
            description: "Friendly".to_string(),
            age: 3,
        }
        .into_dog(1)
    }

    #[test]
    fn test_apply_changes_only_touches_present_fields() {
        let mut dog = rex();
        let changes = DogChanges {
            age: Some(10),
            ..Default::default()
        };
        changes.apply_to(&mut dog);

        assert_eq!(dog.age, 10);
        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.breed, "Lab");
        assert_eq!(dog.description, "Friendly");
    }

    #[test]
    fn test_empty_changes() {
        assert!(DogChanges::default().is_empty());
        assert!(!DogChanges {
            name: Some("Max".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_dog_serializes_with_flat_fields() {
        let value = serde_json::to_value(rex()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "name": "Rex",
                "breed": "Lab",
                "description": "Friendly",
                "age": 3
            })
        );
    }
}
